//! Route definitions for enrollments and progress records.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::enrollments;
use crate::state::AppState;

/// Routes mounted at `/enrollments`.
///
/// ```text
/// POST   /                                -> enroll (idempotent)
/// GET    /check                           -> check
/// PUT    /{enrollment_id}/progress        -> update_progress
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(enrollments::enroll))
        .route("/check", get(enrollments::check))
        .route(
            "/{enrollment_id}/progress",
            put(enrollments::update_progress),
        )
}

/// Routes mounted at `/progress`.
///
/// ```text
/// GET    /            -> list_progress
/// POST   /complete    -> mark_complete (idempotent)
/// ```
pub fn progress_router() -> Router<AppState> {
    Router::new()
        .route("/", get(enrollments::list_progress))
        .route("/complete", post(enrollments::mark_complete))
}
