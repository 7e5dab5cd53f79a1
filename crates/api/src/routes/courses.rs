//! Route definitions for courses and their nested sections and videos.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{course_videos, courses, sections};
use crate::state::AppState;

/// Routes mounted at `/courses`.
///
/// ```text
/// GET    /                                          -> list
/// POST   /                                          -> create
/// GET    /all                                       -> list_all
/// GET    /search                                    -> search
/// GET    /featured                                  -> featured
/// GET    /latest                                    -> latest
/// GET    /popular                                   -> popular
/// GET    /slug/{slug}                               -> get_by_slug
/// GET    /{course_id}                               -> get_by_id
/// PUT    /{course_id}                               -> update
/// DELETE /{course_id}                               -> delete (cascade)
/// GET    /{course_id}/progress                      -> get_with_progress
/// POST   /{course_id}/thumbnail                     -> upload_thumbnail
/// GET    /{course_id}/sections                      -> sections::list_by_course
/// POST   /{course_id}/sections                      -> sections::create
/// PUT    /{course_id}/sections/{section_id}         -> sections::update
/// DELETE /{course_id}/sections/{section_id}         -> sections::delete (cascade)
/// GET    /{course_id}/sections/{section_id}/videos  -> course_videos::list_by_section
/// POST   /{course_id}/sections/{section_id}/videos  -> course_videos::create
/// PUT    /{course_id}/sections/{section_id}/videos/{video_id}    -> course_videos::update
/// DELETE /{course_id}/sections/{section_id}/videos/{video_id}    -> course_videos::delete
/// POST   /{course_id}/sections/{section_id}/videos/{video_id}/attachments
///                                                   -> course_videos::upload_attachment
/// DELETE /{course_id}/sections/{section_id}/videos/{video_id}/attachments
///                                                   -> course_videos::delete_attachment
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(courses::list).post(courses::create))
        .route("/all", get(courses::list_all))
        .route("/search", get(courses::search))
        .route("/featured", get(courses::featured))
        .route("/latest", get(courses::latest))
        .route("/popular", get(courses::popular))
        .route("/slug/{slug}", get(courses::get_by_slug))
        .route(
            "/{course_id}",
            get(courses::get_by_id)
                .put(courses::update)
                .delete(courses::delete),
        )
        .route("/{course_id}/progress", get(courses::get_with_progress))
        .route("/{course_id}/thumbnail", post(courses::upload_thumbnail))
        .route(
            "/{course_id}/sections",
            get(sections::list_by_course).post(sections::create),
        )
        .route(
            "/{course_id}/sections/{section_id}",
            axum::routing::put(sections::update).delete(sections::delete),
        )
        .route(
            "/{course_id}/sections/{section_id}/videos",
            get(course_videos::list_by_section).post(course_videos::create),
        )
        .route(
            "/{course_id}/sections/{section_id}/videos/{video_id}",
            axum::routing::put(course_videos::update).delete(course_videos::delete),
        )
        .route(
            "/{course_id}/sections/{section_id}/videos/{video_id}/attachments",
            post(course_videos::upload_attachment).delete(course_videos::delete_attachment),
        )
}
