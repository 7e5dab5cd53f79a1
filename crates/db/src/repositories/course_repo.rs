//! Repository for the `courses` table.

use sqlx::PgPool;

use coursekit_core::types::DbId;

use crate::models::course::{Course, CourseFilters, CreateCourse, UpdateCourse};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, slug, description, category_id, instructor_id, price, \
    original_price, level, status, featured, students_count, rating, reviews_count, \
    thumbnail, prerequisites, why_take_this_course, tags, created_at, updated_at";

/// Provides CRUD and catalog queries for courses.
pub struct CourseRepo;

impl CourseRepo {
    /// Insert a new course, returning the created row.
    ///
    /// Aggregate counters start at zero via column defaults; timestamps are
    /// server-assigned.
    pub async fn create(pool: &PgPool, input: &CreateCourse) -> Result<Course, sqlx::Error> {
        let query = format!(
            "INSERT INTO courses
                (title, slug, description, category_id, instructor_id, price,
                 original_price, level, status, featured, thumbnail,
                 prerequisites, why_take_this_course, tags)
             VALUES ($1, COALESCE($2, ''), COALESCE($3, ''), $4, $5,
                     COALESCE($6, 0), COALESCE($7, 0), COALESCE($8, ''),
                     COALESCE($9, 'draft'), COALESCE($10, FALSE),
                     COALESCE($11, ''), COALESCE($12, '{{}}'),
                     COALESCE($13, ''), COALESCE($14, '{{}}'))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Course>(&query)
            .bind(&input.title)
            .bind(&input.slug)
            .bind(&input.description)
            .bind(input.category_id)
            .bind(input.instructor_id)
            .bind(input.price)
            .bind(input.original_price)
            .bind(&input.level)
            .bind(&input.status)
            .bind(input.featured)
            .bind(&input.thumbnail)
            .bind(&input.prerequisites)
            .bind(&input.why_take_this_course)
            .bind(&input.tags)
            .fetch_one(pool)
            .await
    }

    /// Find a course by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Course>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM courses WHERE id = $1");
        sqlx::query_as::<_, Course>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a course by slug. Slugs are unique by convention only, so this
    /// takes the first match.
    pub async fn find_by_slug(pool: &PgPool, slug: &str) -> Result<Option<Course>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM courses WHERE slug = $1 LIMIT 1");
        sqlx::query_as::<_, Course>(&query)
            .bind(slug)
            .fetch_optional(pool)
            .await
    }

    /// List every course, newest first. Unpaginated -- acceptable only at
    /// small catalog scale.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Course>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM courses ORDER BY created_at DESC");
        sqlx::query_as::<_, Course>(&query).fetch_all(pool).await
    }

    /// List courses with optional category/level equality filters and one of
    /// the supported sort orders.
    pub async fn list_filtered(
        pool: &PgPool,
        filters: &CourseFilters,
    ) -> Result<Vec<Course>, sqlx::Error> {
        let order = filters.sort.unwrap_or_default().order_clause();
        let query = format!(
            "SELECT {COLUMNS} FROM courses
             WHERE ($1::bigint IS NULL OR category_id = $1)
               AND ($2::text IS NULL OR level = $2)
             ORDER BY {order}"
        );
        sqlx::query_as::<_, Course>(&query)
            .bind(filters.category)
            .bind(&filters.level)
            .fetch_all(pool)
            .await
    }

    /// Courses flagged as featured, capped at `limit`.
    pub async fn list_featured(pool: &PgPool, limit: i64) -> Result<Vec<Course>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM courses WHERE featured = TRUE LIMIT $1");
        sqlx::query_as::<_, Course>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Most recently created courses.
    pub async fn list_latest(pool: &PgPool, limit: i64) -> Result<Vec<Course>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM courses ORDER BY created_at DESC LIMIT $1");
        sqlx::query_as::<_, Course>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Courses with the most students.
    pub async fn list_popular(pool: &PgPool, limit: i64) -> Result<Vec<Course>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM courses ORDER BY students_count DESC LIMIT $1");
        sqlx::query_as::<_, Course>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Update a course. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateCourse,
    ) -> Result<Option<Course>, sqlx::Error> {
        let query = format!(
            "UPDATE courses SET
                title = COALESCE($2, title),
                slug = COALESCE($3, slug),
                description = COALESCE($4, description),
                category_id = COALESCE($5, category_id),
                instructor_id = COALESCE($6, instructor_id),
                price = COALESCE($7, price),
                original_price = COALESCE($8, original_price),
                level = COALESCE($9, level),
                status = COALESCE($10, status),
                featured = COALESCE($11, featured),
                thumbnail = COALESCE($12, thumbnail),
                prerequisites = COALESCE($13, prerequisites),
                why_take_this_course = COALESCE($14, why_take_this_course),
                tags = COALESCE($15, tags),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Course>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.slug)
            .bind(&input.description)
            .bind(input.category_id)
            .bind(input.instructor_id)
            .bind(input.price)
            .bind(input.original_price)
            .bind(&input.level)
            .bind(&input.status)
            .bind(input.featured)
            .bind(&input.thumbnail)
            .bind(&input.prerequisites)
            .bind(&input.why_take_this_course)
            .bind(&input.tags)
            .fetch_optional(pool)
            .await
    }

    /// Overwrite the student counter. Paired with a prior read in the
    /// enrollment layer; the two statements are deliberately independent.
    pub async fn set_students_count(
        pool: &PgPool,
        id: DbId,
        count: i32,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE courses SET students_count = $2 WHERE id = $1")
            .bind(id)
            .bind(count)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Number of courses referencing a category. Backs the pre-delete guard.
    pub async fn count_by_category(pool: &PgPool, category_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM courses WHERE category_id = $1")
            .bind(category_id)
            .fetch_one(pool)
            .await
    }

    /// Delete a course row. Returns `true` if a row was removed. Child
    /// cleanup happens first in the authoring layer.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM courses WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
