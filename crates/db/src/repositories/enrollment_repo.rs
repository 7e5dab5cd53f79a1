//! Repository for the `enrollments` table.

use sqlx::PgPool;

use coursekit_core::types::DbId;

use crate::models::enrollment::Enrollment;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, user_id, course_id, enrolled_at, progress, completed_videos, last_accessed_at";

/// Provides operations for enrollments.
pub struct EnrollmentRepo;

impl EnrollmentRepo {
    /// Whether an enrollment exists for this (user, course) pair.
    pub async fn exists(pool: &PgPool, user_id: DbId, course_id: DbId) -> Result<bool, sqlx::Error> {
        let found: Option<i32> = sqlx::query_scalar(
            "SELECT 1 FROM enrollments WHERE user_id = $1 AND course_id = $2 LIMIT 1",
        )
        .bind(user_id)
        .bind(course_id)
        .fetch_optional(pool)
        .await?;
        Ok(found.is_some())
    }

    /// Insert a fresh enrollment with zero progress.
    ///
    /// No uniqueness constraint backs the (user, course) pair; callers run
    /// [`exists`](Self::exists) first.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        course_id: DbId,
    ) -> Result<Enrollment, sqlx::Error> {
        let query = format!(
            "INSERT INTO enrollments (user_id, course_id) VALUES ($1, $2) RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Enrollment>(&query)
            .bind(user_id)
            .bind(course_id)
            .fetch_one(pool)
            .await
    }

    /// Find an enrollment by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Enrollment>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM enrollments WHERE id = $1");
        sqlx::query_as::<_, Enrollment>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// All enrollments for a (user, course) pair. More than one row means
    /// the documented duplication race fired; callers treat the first as
    /// canonical.
    pub async fn find_by_user_course(
        pool: &PgPool,
        user_id: DbId,
        course_id: DbId,
    ) -> Result<Vec<Enrollment>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM enrollments WHERE user_id = $1 AND course_id = $2"
        );
        sqlx::query_as::<_, Enrollment>(&query)
            .bind(user_id)
            .bind(course_id)
            .fetch_all(pool)
            .await
    }

    /// A user's enrollments, most recent first.
    pub async fn list_by_user(pool: &PgPool, user_id: DbId) -> Result<Vec<Enrollment>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM enrollments WHERE user_id = $1 ORDER BY enrolled_at DESC"
        );
        sqlx::query_as::<_, Enrollment>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Write the flat progress percentage, optionally replacing the
    /// completed-video list, and bump `last_accessed_at`.
    pub async fn update_progress(
        pool: &PgPool,
        id: DbId,
        progress: i32,
        completed_videos: Option<&[DbId]>,
    ) -> Result<Option<Enrollment>, sqlx::Error> {
        let query = format!(
            "UPDATE enrollments SET
                progress = $2,
                completed_videos = COALESCE($3, completed_videos),
                last_accessed_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Enrollment>(&query)
            .bind(id)
            .bind(progress)
            .bind(completed_videos)
            .fetch_optional(pool)
            .await
    }
}
