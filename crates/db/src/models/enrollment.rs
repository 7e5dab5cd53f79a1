//! Enrollment entity model and DTOs.
//!
//! At most one enrollment exists per (user, course) pair, enforced by a
//! pre-insert existence query rather than a unique index. There is no
//! unenroll operation.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use coursekit_core::types::{DbId, Timestamp};

/// A row from the `enrollments` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Enrollment {
    pub id: DbId,
    pub user_id: DbId,
    pub course_id: DbId,
    pub enrolled_at: Timestamp,
    /// Flat 0-100 percentage maintained by callers. Can drift from
    /// `completed_videos`; the derived percentage is recomputed on read.
    pub progress: i32,
    pub completed_videos: Vec<DbId>,
    pub last_accessed_at: Timestamp,
}

/// DTO for the progress update operation.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateProgress {
    pub progress: i32,
    pub completed_video_id: Option<DbId>,
}
