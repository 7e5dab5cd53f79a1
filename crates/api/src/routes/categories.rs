//! Route definitions for categories.

use axum::routing::get;
use axum::Router;

use crate::handlers::categories;
use crate::state::AppState;

/// Routes mounted at `/categories`.
///
/// ```text
/// GET    /        -> list (with course counts)
/// POST   /        -> create
/// PUT    /{id}    -> update
/// DELETE /{id}    -> delete (refused while courses reference it)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(categories::list).post(categories::create))
        .route(
            "/{id}",
            axum::routing::put(categories::update).delete(categories::delete),
        )
}
