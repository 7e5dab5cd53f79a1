//! Repository for the `sections` table.

use sqlx::PgPool;

use coursekit_core::types::DbId;

use crate::models::section::{CreateSection, Section, UpdateSection};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, course_id, title, description, sort_order, created_at, updated_at";

/// Provides CRUD operations for sections.
pub struct SectionRepo;

impl SectionRepo {
    /// Insert a new section under a course at the given sort position.
    ///
    /// The max+1 position computation happens in the authoring layer; this
    /// takes the resolved value.
    pub async fn create(
        pool: &PgPool,
        course_id: DbId,
        input: &CreateSection,
        sort_order: i32,
    ) -> Result<Section, sqlx::Error> {
        let query = format!(
            "INSERT INTO sections (course_id, title, description, sort_order)
             VALUES ($1, $2, COALESCE($3, ''), $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Section>(&query)
            .bind(course_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(sort_order)
            .fetch_one(pool)
            .await
    }

    /// Find a section by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Section>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM sections WHERE id = $1");
        sqlx::query_as::<_, Section>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a course's sections in display order.
    pub async fn list_by_course(
        pool: &PgPool,
        course_id: DbId,
    ) -> Result<Vec<Section>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM sections WHERE course_id = $1 ORDER BY sort_order ASC"
        );
        sqlx::query_as::<_, Section>(&query)
            .bind(course_id)
            .fetch_all(pool)
            .await
    }

    /// Highest sort position currently used within a course, if any.
    pub async fn max_sort_order(
        pool: &PgPool,
        course_id: DbId,
    ) -> Result<Option<i32>, sqlx::Error> {
        sqlx::query_scalar("SELECT MAX(sort_order) FROM sections WHERE course_id = $1")
            .bind(course_id)
            .fetch_one(pool)
            .await
    }

    /// Update a section. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateSection,
    ) -> Result<Option<Section>, sqlx::Error> {
        let query = format!(
            "UPDATE sections SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                sort_order = COALESCE($4, sort_order),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Section>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.sort_order)
            .fetch_optional(pool)
            .await
    }

    /// Delete a section row. Returns `true` if a row was removed. Child
    /// videos are deleted first in the authoring layer; positions of the
    /// remaining sections are not renumbered.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM sections WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
