//! Lesson note entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use coursekit_core::types::{DbId, Timestamp};

/// A row from the `notes` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Note {
    pub id: DbId,
    pub user_id: DbId,
    pub course_id: DbId,
    pub video_id: DbId,
    pub body: String,
    /// Seconds into the video the note was taken at.
    pub timestamp_secs: i32,
    pub created_at: Timestamp,
}

/// DTO for saving a note.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateNote {
    pub user_id: DbId,
    pub course_id: DbId,
    pub video_id: DbId,
    #[validate(length(min = 1))]
    pub body: String,
    pub timestamp_secs: Option<i32>,
}
