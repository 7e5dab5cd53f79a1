//! Repository for the `videos` table.

use sqlx::types::Json;
use sqlx::PgPool;

use coursekit_core::types::DbId;

use crate::models::video::{Attachment, CreateVideo, UpdateVideo, Video};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, course_id, section_id, title, description, vimeo_id, duration, \
    sort_order, is_free, attachments, created_at, updated_at";

/// Provides CRUD operations for videos.
pub struct VideoRepo;

impl VideoRepo {
    /// Insert a new video under a section.
    ///
    /// `duration` is the already-canonicalized `"HH:MM:SS"` string and
    /// `sort_order` the resolved max+1 position; both are computed in the
    /// authoring layer.
    pub async fn create(
        pool: &PgPool,
        course_id: DbId,
        section_id: DbId,
        input: &CreateVideo,
        duration: &str,
        sort_order: i32,
    ) -> Result<Video, sqlx::Error> {
        let query = format!(
            "INSERT INTO videos
                (course_id, section_id, title, description, vimeo_id, duration,
                 sort_order, is_free)
             VALUES ($1, $2, $3, COALESCE($4, ''), COALESCE($5, ''), $6, $7,
                     COALESCE($8, FALSE))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Video>(&query)
            .bind(course_id)
            .bind(section_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.vimeo_id)
            .bind(duration)
            .bind(sort_order)
            .bind(input.is_free)
            .fetch_one(pool)
            .await
    }

    /// Find a video by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Video>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM videos WHERE id = $1");
        sqlx::query_as::<_, Video>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a section's videos in display order.
    pub async fn list_by_section(
        pool: &PgPool,
        section_id: DbId,
    ) -> Result<Vec<Video>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM videos WHERE section_id = $1 ORDER BY sort_order ASC"
        );
        sqlx::query_as::<_, Video>(&query)
            .bind(section_id)
            .fetch_all(pool)
            .await
    }

    /// Lesson count for one section. The catalog roll-up sums these per
    /// section rather than issuing one grouped query, preserving the
    /// per-subcollection read pattern of the store this replaces.
    pub async fn count_by_section(pool: &PgPool, section_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM videos WHERE section_id = $1")
            .bind(section_id)
            .fetch_one(pool)
            .await
    }

    /// Highest sort position currently used within a section, if any.
    pub async fn max_sort_order(
        pool: &PgPool,
        section_id: DbId,
    ) -> Result<Option<i32>, sqlx::Error> {
        sqlx::query_scalar("SELECT MAX(sort_order) FROM videos WHERE section_id = $1")
            .bind(section_id)
            .fetch_one(pool)
            .await
    }

    /// Update a video. Only non-`None` fields are applied; `duration`
    /// arrives canonicalized from the authoring layer.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateVideo,
        duration: Option<String>,
    ) -> Result<Option<Video>, sqlx::Error> {
        let query = format!(
            "UPDATE videos SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                vimeo_id = COALESCE($4, vimeo_id),
                duration = COALESCE($5, duration),
                sort_order = COALESCE($6, sort_order),
                is_free = COALESCE($7, is_free),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Video>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.vimeo_id)
            .bind(duration)
            .bind(input.sort_order)
            .bind(input.is_free)
            .fetch_optional(pool)
            .await
    }

    /// Replace a video's attachment list.
    pub async fn set_attachments(
        pool: &PgPool,
        id: DbId,
        attachments: &[Attachment],
    ) -> Result<Option<Video>, sqlx::Error> {
        let query = format!(
            "UPDATE videos SET attachments = $2, updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Video>(&query)
            .bind(id)
            .bind(Json(attachments))
            .fetch_optional(pool)
            .await
    }

    /// Delete a video row. Returns `true` if a row was removed. Attachment
    /// blobs are cleaned up first in the authoring layer.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM videos WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
