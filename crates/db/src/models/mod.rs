//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches

pub mod category;
pub mod course;
pub mod enrollment;
pub mod note;
pub mod prerequisite;
pub mod progress;
pub mod section;
pub mod user;
pub mod video;
