//! User entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use coursekit_core::types::{DbId, Timestamp};

/// A row from the `users` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub id: DbId,
    pub email: String,
    pub display_name: String,
    pub photo_url: String,
    /// One of `student`, `instructor`, `admin`.
    pub role: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a user on first sign-in.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUser {
    pub email: String,
    pub display_name: Option<String>,
    pub photo_url: Option<String>,
}

/// DTO for self profile edits. All fields are optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateUserProfile {
    pub display_name: Option<String>,
    pub photo_url: Option<String>,
}
