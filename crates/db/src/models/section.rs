//! Section entity model and DTOs.
//!
//! Sections belong to exactly one course. `sort_order` is assigned as
//! max+1 at creation time; deletions leave gaps, which is fine -- only the
//! relative order matters for display.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use coursekit_core::types::{DbId, Timestamp};

/// A row from the `sections` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Section {
    pub id: DbId,
    pub course_id: DbId,
    pub title: String,
    pub description: String,
    pub sort_order: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a section. `sort_order` defaults to max+1 within the
/// course when omitted.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateSection {
    pub title: String,
    pub description: Option<String>,
    pub sort_order: Option<i32>,
}

/// DTO for updating a section. All fields are optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateSection {
    pub title: Option<String>,
    pub description: Option<String>,
    pub sort_order: Option<i32>,
}
