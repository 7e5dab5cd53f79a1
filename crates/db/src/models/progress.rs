//! Per-video progress record (legacy/alternate completion model).
//!
//! Keyed by the (user, course, video) triple so writes are idempotent.

use serde::Serialize;
use sqlx::FromRow;

use coursekit_core::types::{DbId, Timestamp};

/// A row from the `progress_records` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProgressRecord {
    pub user_id: DbId,
    pub course_id: DbId,
    pub video_id: DbId,
    pub completed: bool,
    pub completed_at: Option<Timestamp>,
}
