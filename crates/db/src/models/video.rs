//! Video entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;

use coursekit_core::duration::DurationValue;
use coursekit_core::types::{DbId, Timestamp};

/// A row from the `videos` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Video {
    pub id: DbId,
    pub course_id: DbId,
    pub section_id: DbId,
    pub title: String,
    pub description: String,
    /// Opaque id on the video host. Empty until the upload relay reports one.
    pub vimeo_id: String,
    /// Canonical `"HH:MM:SS"` string; normalized before every write.
    pub duration: String,
    pub sort_order: i32,
    pub is_free: bool,
    pub attachments: Json<Vec<Attachment>>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// One attachment entry on a video document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attachment {
    pub name: String,
    pub url: String,
    #[serde(rename = "type")]
    pub content_type: String,
    pub size: i64,
    pub uploaded_at: Timestamp,
}

/// DTO for creating a video. `duration` accepts a colon string or an
/// `{hours, minutes, seconds}` object; `sort_order` defaults to max+1 within
/// the section when omitted.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateVideo {
    pub title: String,
    pub description: Option<String>,
    pub vimeo_id: Option<String>,
    pub duration: Option<DurationValue>,
    pub sort_order: Option<i32>,
    pub is_free: Option<bool>,
}

/// DTO for updating a video. All fields are optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateVideo {
    pub title: Option<String>,
    pub description: Option<String>,
    pub vimeo_id: Option<String>,
    pub duration: Option<DurationValue>,
    pub sort_order: Option<i32>,
    pub is_free: Option<bool>,
}
