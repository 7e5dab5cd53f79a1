//! Handlers for the `/courses` resource.
//!
//! Catalog reads (listing, search, storefront sections, the aggregated
//! detail view) and admin authoring (create, update, cascade delete,
//! thumbnail upload).

use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use coursekit_core::types::DbId;
use coursekit_db::models::course::{Course, CourseFilters, CreateCourse, UpdateCourse};

use crate::catalog::{
    self, CourseDetail, CourseSummary, CourseWithInstructor, CourseWithViewerProgress,
};
use crate::error::{AppError, AppResult};
use crate::state::AppState;
use crate::{authoring, response::DataResponse};

/// Default cap for the latest/popular storefront sections.
const DEFAULT_SECTION_LIMIT: i64 = 6;

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LimitParams {
    pub limit: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct ViewerParams {
    pub user_id: DbId,
}

/// GET /api/v1/courses
///
/// Filtered catalog listing (`?category=`, `?level=`, `?sort=`).
pub async fn list(
    State(state): State<AppState>,
    Query(filters): Query<CourseFilters>,
) -> AppResult<Json<Vec<CourseWithInstructor>>> {
    let courses = catalog::list_courses(&state.pool, &filters).await?;
    Ok(Json(courses))
}

/// GET /api/v1/courses/all
///
/// Admin listing: every course with instructor and lesson-count roll-up.
pub async fn list_all(State(state): State<AppState>) -> AppResult<Json<Vec<CourseSummary>>> {
    let courses = catalog::all_courses(&state.pool).await?;
    Ok(Json(courses))
}

/// GET /api/v1/courses/search?q=term
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> AppResult<Json<Vec<CourseWithInstructor>>> {
    let courses = catalog::search_courses(&state.pool, params.q.as_deref().unwrap_or("")).await?;
    Ok(Json(courses))
}

/// GET /api/v1/courses/featured
pub async fn featured(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<CourseWithInstructor>>> {
    let courses = catalog::featured_courses(&state.pool).await?;
    Ok(Json(courses))
}

/// GET /api/v1/courses/latest?limit=n
pub async fn latest(
    State(state): State<AppState>,
    Query(params): Query<LimitParams>,
) -> AppResult<Json<Vec<CourseWithInstructor>>> {
    let limit = params.limit.unwrap_or(DEFAULT_SECTION_LIMIT);
    let courses = catalog::latest_courses(&state.pool, limit).await?;
    Ok(Json(courses))
}

/// GET /api/v1/courses/popular?limit=n
pub async fn popular(
    State(state): State<AppState>,
    Query(params): Query<LimitParams>,
) -> AppResult<Json<Vec<CourseWithInstructor>>> {
    let limit = params.limit.unwrap_or(DEFAULT_SECTION_LIMIT);
    let courses = catalog::popular_courses(&state.pool, limit).await?;
    Ok(Json(courses))
}

/// GET /api/v1/courses/slug/{slug}
pub async fn get_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<Json<Course>> {
    let course = catalog::course_by_slug(&state.pool, &slug).await?;
    Ok(Json(course))
}

/// GET /api/v1/courses/{id}
///
/// The full nested view: course, instructor, ordered sections and videos.
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<CourseDetail>> {
    let detail = catalog::course_detail(&state.pool, id).await?;
    Ok(Json(detail))
}

/// GET /api/v1/courses/{id}/progress?user_id=
///
/// The detail view with per-video completion flags for one viewer.
pub async fn get_with_progress(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Query(params): Query<ViewerParams>,
) -> AppResult<Json<CourseWithViewerProgress>> {
    let detail = catalog::course_with_viewer_progress(&state.pool, params.user_id, id).await?;
    Ok(Json(detail))
}

/// POST /api/v1/courses
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateCourse>,
) -> AppResult<(StatusCode, Json<Course>)> {
    let course = authoring::create_course(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(course)))
}

/// PUT /api/v1/courses/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateCourse>,
) -> AppResult<Json<Course>> {
    let course = authoring::update_course(&state.pool, id, &input).await?;
    Ok(Json(course))
}

/// DELETE /api/v1/courses/{id}
///
/// Cascade delete: sections, videos, attachment blobs, thumbnail, then the
/// course itself.
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    authoring::delete_course(&state.pool, state.storage.as_ref(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/courses/{id}/thumbnail (multipart: file)
///
/// Stores the blob and returns its URL; the caller then patches the course
/// document's `thumbnail` field as a second step.
pub async fn upload_thumbnail(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    mut multipart: Multipart,
) -> AppResult<Json<DataResponse<String>>> {
    let mut file: Option<(Vec<u8>, String)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        if field.name() == Some("file") {
            let content_type = field
                .content_type()
                .unwrap_or("application/octet-stream")
                .to_string();
            let data = field
                .bytes()
                .await
                .map_err(|e| AppError::BadRequest(e.to_string()))?;
            file = Some((data.to_vec(), content_type));
        }
    }

    let (bytes, content_type) = file.ok_or_else(|| {
        AppError::BadRequest("Multipart field 'file' is required".to_string())
    })?;

    let url =
        authoring::upload_course_thumbnail(state.storage.as_ref(), id, bytes, &content_type)
            .await?;
    Ok(Json(DataResponse { data: url }))
}
