//! Handlers for the `/courses/{course_id}/sections` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use coursekit_core::types::DbId;
use coursekit_db::models::section::{CreateSection, Section, UpdateSection};
use coursekit_db::repositories::SectionRepo;

use crate::authoring;
use crate::error::AppResult;
use crate::state::AppState;

/// GET /api/v1/courses/{course_id}/sections
///
/// Sections in display order.
pub async fn list_by_course(
    State(state): State<AppState>,
    Path(course_id): Path<DbId>,
) -> AppResult<Json<Vec<Section>>> {
    let sections = SectionRepo::list_by_course(&state.pool, course_id).await?;
    Ok(Json(sections))
}

/// POST /api/v1/courses/{course_id}/sections
///
/// Position defaults to max+1 within the course.
pub async fn create(
    State(state): State<AppState>,
    Path(course_id): Path<DbId>,
    Json(input): Json<CreateSection>,
) -> AppResult<(StatusCode, Json<Section>)> {
    let section = authoring::create_section(&state.pool, course_id, &input).await?;
    Ok((StatusCode::CREATED, Json(section)))
}

/// PUT /api/v1/courses/{course_id}/sections/{id}
pub async fn update(
    State(state): State<AppState>,
    Path((_course_id, id)): Path<(DbId, DbId)>,
    Json(input): Json<UpdateSection>,
) -> AppResult<Json<Section>> {
    let section = authoring::update_section(&state.pool, id, &input).await?;
    Ok(Json(section))
}

/// DELETE /api/v1/courses/{course_id}/sections/{id}
///
/// Deletes the section's videos (and their attachment blobs) first.
pub async fn delete(
    State(state): State<AppState>,
    Path((_course_id, id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    authoring::delete_section(&state.pool, state.storage.as_ref(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}
