//! Handlers for the `/courses/{course_id}/sections/{section_id}/videos`
//! resource, including lesson attachments.

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use coursekit_core::types::DbId;
use coursekit_db::models::video::{CreateVideo, UpdateVideo, Video};
use coursekit_db::repositories::VideoRepo;

use crate::authoring;
use crate::error::{AppError, AppResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct DeleteAttachmentBody {
    pub url: String,
}

/// GET /api/v1/courses/{course_id}/sections/{section_id}/videos
///
/// Videos in display order.
pub async fn list_by_section(
    State(state): State<AppState>,
    Path((_course_id, section_id)): Path<(DbId, DbId)>,
) -> AppResult<Json<Vec<Video>>> {
    let videos = VideoRepo::list_by_section(&state.pool, section_id).await?;
    Ok(Json(videos))
}

/// POST /api/v1/courses/{course_id}/sections/{section_id}/videos
///
/// Duration is normalized to `"HH:MM:SS"` before persisting; position
/// defaults to max+1 within the section.
pub async fn create(
    State(state): State<AppState>,
    Path((course_id, section_id)): Path<(DbId, DbId)>,
    Json(input): Json<CreateVideo>,
) -> AppResult<(StatusCode, Json<Video>)> {
    let video = authoring::create_video(&state.pool, course_id, section_id, &input).await?;
    Ok((StatusCode::CREATED, Json(video)))
}

/// PUT /api/v1/courses/{course_id}/sections/{section_id}/videos/{id}
pub async fn update(
    State(state): State<AppState>,
    Path((_course_id, _section_id, id)): Path<(DbId, DbId, DbId)>,
    Json(input): Json<UpdateVideo>,
) -> AppResult<Json<Video>> {
    let video = authoring::update_video(&state.pool, id, &input).await?;
    Ok(Json(video))
}

/// DELETE /api/v1/courses/{course_id}/sections/{section_id}/videos/{id}
///
/// Attachment blobs are cleaned up best-effort before the row goes.
pub async fn delete(
    State(state): State<AppState>,
    Path((_course_id, _section_id, id)): Path<(DbId, DbId, DbId)>,
) -> AppResult<StatusCode> {
    authoring::delete_video(&state.pool, state.storage.as_ref(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/courses/{course_id}/sections/{section_id}/videos/{id}/attachments
/// (multipart: file)
pub async fn upload_attachment(
    State(state): State<AppState>,
    Path((course_id, _section_id, id)): Path<(DbId, DbId, DbId)>,
    mut multipart: Multipart,
) -> AppResult<(StatusCode, Json<Video>)> {
    let mut file: Option<(String, String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        if field.name() == Some("file") {
            let filename = field.file_name().unwrap_or("attachment").to_string();
            let content_type = field
                .content_type()
                .unwrap_or("application/octet-stream")
                .to_string();
            let data = field
                .bytes()
                .await
                .map_err(|e| AppError::BadRequest(e.to_string()))?;
            file = Some((filename, content_type, data.to_vec()));
        }
    }

    let (filename, content_type, bytes) = file.ok_or_else(|| {
        AppError::BadRequest("Multipart field 'file' is required".to_string())
    })?;

    let video = authoring::upload_attachment(
        &state.pool,
        state.storage.as_ref(),
        course_id,
        id,
        &filename,
        &content_type,
        bytes,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(video)))
}

/// DELETE /api/v1/courses/{course_id}/sections/{section_id}/videos/{id}/attachments
///
/// The attachment is addressed by its public URL in the request body; the
/// blob path is recovered from it.
pub async fn delete_attachment(
    State(state): State<AppState>,
    Path((_course_id, _section_id, id)): Path<(DbId, DbId, DbId)>,
    Json(body): Json<DeleteAttachmentBody>,
) -> AppResult<Json<Video>> {
    let video =
        authoring::delete_attachment(&state.pool, state.storage.as_ref(), id, &body.url).await?;
    Ok(Json(video))
}
