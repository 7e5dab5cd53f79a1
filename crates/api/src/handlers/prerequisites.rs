//! Handlers for the `/prerequisites` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use validator::Validate;

use coursekit_core::error::CoreError;
use coursekit_db::models::prerequisite::{CreatePrerequisite, Prerequisite};
use coursekit_db::repositories::PrerequisiteRepo;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /api/v1/prerequisites
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Prerequisite>>> {
    let prerequisites = PrerequisiteRepo::list_all(&state.pool).await?;
    Ok(Json(prerequisites))
}

/// POST /api/v1/prerequisites
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreatePrerequisite>,
) -> AppResult<(StatusCode, Json<Prerequisite>)> {
    input
        .validate()
        .map_err(|e| AppError::Core(CoreError::Validation(e.to_string())))?;
    let prerequisite = PrerequisiteRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(prerequisite)))
}
