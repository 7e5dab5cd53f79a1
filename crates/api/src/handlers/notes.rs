//! Handlers for the `/notes` resource.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use validator::Validate;

use coursekit_core::error::CoreError;
use coursekit_core::types::DbId;
use coursekit_db::models::note::{CreateNote, Note};
use coursekit_db::repositories::NoteRepo;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct NoteListParams {
    pub user_id: DbId,
    pub course_id: DbId,
}

/// GET /api/v1/notes?user_id=&course_id=
///
/// A user's notes for a course, oldest first.
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<NoteListParams>,
) -> AppResult<Json<Vec<Note>>> {
    let notes = NoteRepo::list_by_user_course(&state.pool, params.user_id, params.course_id).await?;
    Ok(Json(notes))
}

/// POST /api/v1/notes
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateNote>,
) -> AppResult<(StatusCode, Json<Note>)> {
    input
        .validate()
        .map_err(|e| AppError::Core(CoreError::Validation(e.to_string())))?;
    let note = NoteRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(note)))
}
