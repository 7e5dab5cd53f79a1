//! Prerequisite entity model.
//!
//! Courses reference prerequisites via an id array; there is no cascade on
//! delete.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use coursekit_core::types::{DbId, Timestamp};

/// A row from the `prerequisites` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Prerequisite {
    pub id: DbId,
    pub name: String,
    pub created_at: Timestamp,
}

/// DTO for creating a prerequisite.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreatePrerequisite {
    #[validate(length(min = 1))]
    pub name: String,
}
