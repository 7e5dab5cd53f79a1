pub mod categories;
pub mod courses;
pub mod enrollments;
pub mod health;
pub mod notes;
pub mod prerequisites;
pub mod users;
pub mod videos;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /courses                                          list (filters), create
/// /courses/all                                      admin listing with roll-ups
/// /courses/search?q=                                in-process substring search
/// /courses/featured                                 featured storefront row
/// /courses/latest?limit=                            newest courses
/// /courses/popular?limit=                           most-enrolled courses
/// /courses/slug/{slug}                              lookup by slug
/// /courses/{course_id}                              aggregated detail, update, cascade delete
/// /courses/{course_id}/progress?user_id=            detail with viewer completion flags
/// /courses/{course_id}/thumbnail                    thumbnail upload (multipart)
/// /courses/{course_id}/sections                     list, create (order = max+1)
/// /courses/{course_id}/sections/{section_id}        update, cascade delete
/// /courses/{course_id}/sections/{section_id}/videos            list, create
/// /courses/{course_id}/sections/{section_id}/videos/{video_id} update, delete
/// /courses/{course_id}/sections/{section_id}/videos/{video_id}/attachments
///                                                   upload (multipart), delete (by URL)
///
/// /categories                                       list with counts, create
/// /categories/{id}                                  update, delete (guarded while in use)
///
/// /prerequisites                                    list, create
///
/// /enrollments                                      enroll (idempotent)
/// /enrollments/check?user_id=&course_id=            enrollment check
/// /enrollments/{enrollment_id}/progress             progress update (PUT)
///
/// /progress?user_id=&course_id=                     per-video progress records
/// /progress/complete                                mark video complete (idempotent)
///
/// /notes?user_id=&course_id=                        list, create
///
/// /users                                            admin listing
/// /users/ensure                                     create-on-first-sign-in
/// /users/{user_id}                                  profile get, update
/// /users/{user_id}/role                             role change (PUT)
/// /users/{user_id}/enrollments                      enrollments with courses
/// /users/{user_id}/courses                          enrolled courses with derived progress
/// /users/{user_id}/courses/{course_id}/complete/{video_id}  mark complete
///
/// /videos/upload                                    video host relay: upload (multipart)
/// /videos/{id}                                      raw provider metadata
/// /videos/{id}/duration                             transcoded duration
/// /videos/{id}/captions                             caption upload (multipart)
/// /videos/{id}/captions/list                        live caption listing
/// /videos/{id}/captions/{caption_id}                caption delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Catalog and authoring (also nests sections and videos).
        .nest("/courses", courses::router())
        // Categories with the in-use deletion guard.
        .nest("/categories", categories::router())
        // Prerequisite entries referenced by courses.
        .nest("/prerequisites", prerequisites::router())
        // Enrollment and the flat progress field.
        .nest("/enrollments", enrollments::router())
        // Per-video progress records.
        .nest("/progress", enrollments::progress_router())
        // Lesson notes.
        .nest("/notes", notes::router())
        // Users, profiles, roles, and viewer-scoped reads.
        .nest("/users", users::router())
        // Server-side relay to the video host.
        .nest("/videos", videos::router())
}
