//! Handlers for the `/videos` resource: the server-side relay to the video
//! host. The browser never talks to the video host directly; these
//! endpoints carry the platform's credentials.

use axum::extract::{Multipart, Path, State};
use axum::Json;
use serde::Serialize;

use coursekit_core::duration::Clock;
use coursekit_vimeo::Caption;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Caption language used when the form omits one.
const DEFAULT_CAPTION_LANGUAGE: &str = "en";

/// Caption track name used when the form omits one.
const DEFAULT_CAPTION_NAME: &str = "Subtitles";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub success: bool,
    pub vimeo_id: String,
    pub uri: String,
    pub duration: String,
    pub duration_object: Clock,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DurationResponse {
    pub success: bool,
    pub duration: String,
    pub duration_object: Clock,
    pub raw_duration: u64,
}

#[derive(Debug, Serialize)]
pub struct CaptionListResponse {
    pub success: bool,
    pub captions: Vec<Caption>,
}

#[derive(Debug, Serialize)]
pub struct CaptionMutationResponse {
    pub success: bool,
    pub message: String,
}

/// POST /api/v1/videos/upload (multipart: file, courseId, title, description)
///
/// Relays the bytes to the video host, then fetches the transcoded
/// duration. The duration fetch is tolerated to fail (transcoding is
/// asynchronous); the upload still succeeds with a zero duration.
pub async fn upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<Json<UploadResponse>> {
    let mut file: Option<Vec<u8>> = None;
    let mut course_id = String::new();
    let mut title = String::new();
    let mut description = String::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "file" => {
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                file = Some(data.to_vec());
            }
            "courseId" => {
                course_id = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
            }
            "title" => {
                title = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
            }
            "description" => {
                description = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
            }
            _ => {} // ignore unknown fields
        }
    }

    let bytes = file
        .ok_or_else(|| AppError::BadRequest("Multipart field 'file' is required".to_string()))?;
    if title.is_empty() {
        title = "Untitled video".to_string();
    }

    tracing::info!(course_id = %course_id, title = %title, size = bytes.len(), "Relaying video upload");

    let uploaded = state.vimeo.upload_video(bytes, &title, &description).await?;

    // Transcoding may not have produced a duration yet; report zero rather
    // than failing the whole upload.
    let secs = match state.vimeo.duration_secs(&uploaded.vimeo_id).await {
        Ok(secs) => secs,
        Err(err) => {
            tracing::warn!(vimeo_id = %uploaded.vimeo_id, error = %err, "Duration fetch failed after upload");
            0
        }
    };
    let clock = Clock::from_secs(secs);

    Ok(Json(UploadResponse {
        success: true,
        vimeo_id: uploaded.vimeo_id,
        uri: uploaded.uri,
        duration: clock.format(),
        duration_object: clock,
    }))
}

/// GET /api/v1/videos/{id}/duration
pub async fn duration(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<DurationResponse>> {
    let secs = state.vimeo.duration_secs(&id).await?;
    let clock = Clock::from_secs(secs);
    Ok(Json(DurationResponse {
        success: true,
        duration: clock.format(),
        duration_object: clock,
        raw_duration: secs,
    }))
}

/// GET /api/v1/videos/{id}
///
/// Raw provider metadata passthrough, including transcode status.
pub async fn info(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<serde_json::Value>> {
    let info = state.vimeo.video_info(&id).await?;
    Ok(Json(info))
}

/// POST /api/v1/videos/{id}/captions (multipart: file, language, name)
pub async fn upload_caption(
    State(state): State<AppState>,
    Path(id): Path<String>,
    mut multipart: Multipart,
) -> AppResult<Json<CaptionMutationResponse>> {
    let mut content: Option<String> = None;
    let mut language = DEFAULT_CAPTION_LANGUAGE.to_string();
    let mut name = DEFAULT_CAPTION_NAME.to_string();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let field_name = field.name().unwrap_or("").to_string();
        match field_name.as_str() {
            "file" => {
                content = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| AppError::BadRequest(e.to_string()))?,
                );
            }
            "language" => {
                language = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
            }
            "name" => {
                name = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
            }
            _ => {}
        }
    }

    let content = content
        .ok_or_else(|| AppError::BadRequest("Multipart field 'file' is required".to_string()))?;

    state
        .vimeo
        .create_caption(&id, &language, &name, content)
        .await?;

    Ok(Json(CaptionMutationResponse {
        success: true,
        message: format!("Caption '{name}' ({language}) uploaded"),
    }))
}

/// GET /api/v1/videos/{id}/captions/list
///
/// Always fetched live from the video host; no caption metadata is
/// persisted locally.
pub async fn list_captions(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<CaptionListResponse>> {
    let captions = state.vimeo.list_captions(&id).await?;
    Ok(Json(CaptionListResponse {
        success: true,
        captions,
    }))
}

/// DELETE /api/v1/videos/{id}/captions/{caption_id}
pub async fn delete_caption(
    State(state): State<AppState>,
    Path((id, caption_id)): Path<(String, String)>,
) -> AppResult<Json<CaptionMutationResponse>> {
    state.vimeo.delete_caption(&id, &caption_id).await?;
    Ok(Json(CaptionMutationResponse {
        success: true,
        message: "Caption deleted".to_string(),
    }))
}
