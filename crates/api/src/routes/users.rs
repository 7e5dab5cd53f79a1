//! Route definitions for users and viewer-scoped reads.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::users;
use crate::state::AppState;

/// Routes mounted at `/users`.
///
/// ```text
/// GET    /                                                    -> list
/// POST   /ensure                                              -> ensure (create on first sign-in)
/// GET    /{user_id}                                           -> get_by_id
/// PUT    /{user_id}                                           -> update_profile
/// PUT    /{user_id}/role                                      -> update_role
/// GET    /{user_id}/enrollments                               -> enrollments
/// GET    /{user_id}/courses                                   -> courses (derived progress)
/// POST   /{user_id}/courses/{course_id}/complete/{video_id}   -> mark_video_complete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(users::list))
        .route("/ensure", post(users::ensure))
        .route(
            "/{user_id}",
            get(users::get_by_id).put(users::update_profile),
        )
        .route("/{user_id}/role", put(users::update_role))
        .route("/{user_id}/enrollments", get(users::enrollments))
        .route("/{user_id}/courses", get(users::courses))
        .route(
            "/{user_id}/courses/{course_id}/complete/{video_id}",
            post(users::mark_video_complete),
        )
}
