//! Handlers for the `/categories` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use validator::Validate;

use coursekit_core::error::CoreError;
use coursekit_core::types::DbId;
use coursekit_db::models::category::{Category, CategoryWithCount, CreateCategory, UpdateCategory};
use coursekit_db::repositories::CategoryRepo;

use crate::error::{AppError, AppResult};
use crate::state::AppState;
use crate::{authoring, catalog};

/// GET /api/v1/categories
///
/// Categories ordered by name, each with its course count.
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<CategoryWithCount>>> {
    let categories = catalog::categories_with_counts(&state.pool).await?;
    Ok(Json(categories))
}

/// POST /api/v1/categories
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateCategory>,
) -> AppResult<(StatusCode, Json<Category>)> {
    input
        .validate()
        .map_err(|e| AppError::Core(CoreError::Validation(e.to_string())))?;
    let category = CategoryRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(category)))
}

/// PUT /api/v1/categories/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateCategory>,
) -> AppResult<Json<Category>> {
    let category = CategoryRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Category",
            id,
        }))?;
    Ok(Json(category))
}

/// DELETE /api/v1/categories/{id}
///
/// Refused with 409 while any course references the category.
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    authoring::delete_category(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
