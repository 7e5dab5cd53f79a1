//! Serves blobs for the local storage provider.
//!
//! Local-store public URLs look like `/objects/o/{encoded path}?alt=media`;
//! this handler resolves the decoded path under the storage root and
//! streams the file. With the S3 backend configured, URLs point at the
//! bucket and this route simply never matches anything.

use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::Response;
use tokio_util::io::ReaderStream;

use coursekit_storage::local::resolve_serving_path;

use crate::config::StorageConfig;
use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /objects/o/{path}
pub async fn serve(
    State(state): State<AppState>,
    Path(object_path): Path<String>,
) -> AppResult<Response> {
    let StorageConfig::Local { root, .. } = &state.config.storage else {
        return Err(AppError::NotFound("Local object serving is disabled".into()));
    };

    let file_path = resolve_serving_path(std::path::Path::new(root), &object_path)
        .ok_or_else(|| AppError::BadRequest("Invalid object path".into()))?;

    let file = tokio::fs::File::open(&file_path)
        .await
        .map_err(|_| AppError::NotFound(format!("No object at '{object_path}'")))?;
    let size = file
        .metadata()
        .await
        .map_err(|e| AppError::InternalError(e.to_string()))?
        .len();

    let stream = ReaderStream::new(file);

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type_for(&object_path))
        .header(header::CONTENT_LENGTH, size.to_string())
        .body(Body::from_stream(stream))
        .map_err(|e| AppError::InternalError(e.to_string()))
}

/// Guess a Content-Type from a file extension.
fn content_type_for(path: &str) -> &'static str {
    let ext = path.rsplit('.').next().unwrap_or("").to_lowercase();
    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "webp" => "image/webp",
        "gif" => "image/gif",
        "pdf" => "application/pdf",
        "zip" => "application/zip",
        "txt" | "vtt" | "srt" => "text/plain",
        _ => "application/octet-stream",
    }
}
