//! Repository for the `progress_records` table.
//!
//! Rows are keyed by the (user, course, video) triple, so marking the same
//! video complete twice is a no-op upsert.

use sqlx::PgPool;

use coursekit_core::types::DbId;

use crate::models::progress::ProgressRecord;

const COLUMNS: &str = "user_id, course_id, video_id, completed, completed_at";

/// Provides operations for per-video progress records.
pub struct ProgressRepo;

impl ProgressRepo {
    /// Mark a video complete for a user. Idempotent.
    pub async fn mark_completed(
        pool: &PgPool,
        user_id: DbId,
        course_id: DbId,
        video_id: DbId,
    ) -> Result<ProgressRecord, sqlx::Error> {
        let query = format!(
            "INSERT INTO progress_records (user_id, course_id, video_id, completed, completed_at)
             VALUES ($1, $2, $3, TRUE, NOW())
             ON CONFLICT (user_id, course_id, video_id)
             DO UPDATE SET completed = TRUE, completed_at = NOW()
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ProgressRecord>(&query)
            .bind(user_id)
            .bind(course_id)
            .bind(video_id)
            .fetch_one(pool)
            .await
    }

    /// All progress records a user has for a course.
    pub async fn list_for_course(
        pool: &PgPool,
        user_id: DbId,
        course_id: DbId,
    ) -> Result<Vec<ProgressRecord>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM progress_records WHERE user_id = $1 AND course_id = $2"
        );
        sqlx::query_as::<_, ProgressRecord>(&query)
            .bind(user_id)
            .bind(course_id)
            .fetch_all(pool)
            .await
    }

    /// Ids of the videos a user has completed in a course.
    pub async fn completed_video_ids(
        pool: &PgPool,
        user_id: DbId,
        course_id: DbId,
    ) -> Result<Vec<DbId>, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT video_id FROM progress_records
             WHERE user_id = $1 AND course_id = $2 AND completed = TRUE",
        )
        .bind(user_id)
        .bind(course_id)
        .fetch_all(pool)
        .await
    }
}
