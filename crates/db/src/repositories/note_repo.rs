//! Repository for the `notes` table.

use sqlx::PgPool;

use coursekit_core::types::DbId;

use crate::models::note::{CreateNote, Note};

const COLUMNS: &str = "id, user_id, course_id, video_id, body, timestamp_secs, created_at";

/// Provides operations for lesson notes.
pub struct NoteRepo;

impl NoteRepo {
    /// Save a note, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateNote) -> Result<Note, sqlx::Error> {
        let query = format!(
            "INSERT INTO notes (user_id, course_id, video_id, body, timestamp_secs)
             VALUES ($1, $2, $3, $4, COALESCE($5, 0))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Note>(&query)
            .bind(input.user_id)
            .bind(input.course_id)
            .bind(input.video_id)
            .bind(&input.body)
            .bind(input.timestamp_secs)
            .fetch_one(pool)
            .await
    }

    /// A user's notes for a course, oldest first.
    pub async fn list_by_user_course(
        pool: &PgPool,
        user_id: DbId,
        course_id: DbId,
    ) -> Result<Vec<Note>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM notes
             WHERE user_id = $1 AND course_id = $2
             ORDER BY created_at ASC"
        );
        sqlx::query_as::<_, Note>(&query)
            .bind(user_id)
            .bind(course_id)
            .fetch_all(pool)
            .await
    }
}
