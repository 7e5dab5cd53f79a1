//! Route definitions for the video host relay.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::video_host;
use crate::state::AppState;

/// Routes mounted at `/videos`.
///
/// ```text
/// POST   /upload                          -> upload (multipart relay)
/// GET    /{id}                            -> info (raw provider metadata)
/// GET    /{id}/duration                   -> duration
/// POST   /{id}/captions                   -> upload_caption (multipart)
/// GET    /{id}/captions/list              -> list_captions (always live)
/// DELETE /{id}/captions/{caption_id}      -> delete_caption
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/upload", post(video_host::upload))
        .route("/{id}", get(video_host::info))
        .route("/{id}/duration", get(video_host::duration))
        .route("/{id}/captions", post(video_host::upload_caption))
        .route("/{id}/captions/list", get(video_host::list_captions))
        .route(
            "/{id}/captions/{caption_id}",
            axum::routing::delete(video_host::delete_caption),
        )
}
