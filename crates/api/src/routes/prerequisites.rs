//! Route definitions for prerequisites.

use axum::routing::get;
use axum::Router;

use crate::handlers::prerequisites;
use crate::state::AppState;

/// Routes mounted at `/prerequisites`.
///
/// ```text
/// GET    /    -> list
/// POST   /    -> create
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(prerequisites::list).post(prerequisites::create))
}
