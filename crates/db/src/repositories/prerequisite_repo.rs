//! Repository for the `prerequisites` table.

use sqlx::PgPool;

use crate::models::prerequisite::{CreatePrerequisite, Prerequisite};

const COLUMNS: &str = "id, name, created_at";

/// Provides operations for prerequisite entries.
pub struct PrerequisiteRepo;

impl PrerequisiteRepo {
    /// Insert a new prerequisite, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreatePrerequisite,
    ) -> Result<Prerequisite, sqlx::Error> {
        let query = format!("INSERT INTO prerequisites (name) VALUES ($1) RETURNING {COLUMNS}");
        sqlx::query_as::<_, Prerequisite>(&query)
            .bind(&input.name)
            .fetch_one(pool)
            .await
    }

    /// List all prerequisites ordered by name ascending.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Prerequisite>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM prerequisites ORDER BY name ASC");
        sqlx::query_as::<_, Prerequisite>(&query)
            .fetch_all(pool)
            .await
    }
}
