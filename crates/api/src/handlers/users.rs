//! Handlers for the `/users` resource.
//!
//! Users are created on first sign-in (`ensure`), edited by themselves
//! (profile) or by admins (role).

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use coursekit_core::error::CoreError;
use coursekit_core::roles::Role;
use coursekit_core::types::DbId;
use coursekit_db::models::user::{CreateUser, UpdateUserProfile, User};
use coursekit_db::repositories::UserRepo;

use crate::catalog::{EnrolledCourse, EnrollmentWithCourse};
use crate::error::{AppError, AppResult};
use crate::state::AppState;
use crate::{catalog, enrollment};

#[derive(Debug, Deserialize)]
pub struct UpdateRoleBody {
    pub role: String,
}

/// GET /api/v1/users
///
/// Admin listing, newest first.
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<User>>> {
    let users = UserRepo::list_all(&state.pool).await?;
    Ok(Json(users))
}

/// POST /api/v1/users/ensure
///
/// Return the user for this email, creating it on first sign-in.
pub async fn ensure(
    State(state): State<AppState>,
    Json(input): Json<CreateUser>,
) -> AppResult<Json<User>> {
    let user = UserRepo::ensure(&state.pool, &input).await?;
    Ok(Json(user))
}

/// GET /api/v1/users/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<User>> {
    let user = UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;
    Ok(Json(user))
}

/// PUT /api/v1/users/{id}
pub async fn update_profile(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateUserProfile>,
) -> AppResult<Json<User>> {
    let user = UserRepo::update_profile(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;
    Ok(Json(user))
}

/// PUT /api/v1/users/{id}/role
pub async fn update_role(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(body): Json<UpdateRoleBody>,
) -> AppResult<Json<User>> {
    let role = Role::parse(&body.role)?;
    let user = UserRepo::update_role(&state.pool, id, role.as_str())
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;
    Ok(Json(user))
}

/// GET /api/v1/users/{id}/enrollments
///
/// The user's enrollments joined with their courses, newest first.
pub async fn enrollments(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Vec<EnrollmentWithCourse>>> {
    let enrollments = catalog::user_enrollments(&state.pool, id).await?;
    Ok(Json(enrollments))
}

/// GET /api/v1/users/{id}/courses
///
/// Enrolled courses with derived progress.
pub async fn courses(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Vec<EnrolledCourse>>> {
    let courses = catalog::user_courses(&state.pool, id).await?;
    Ok(Json(courses))
}

/// POST /api/v1/users/{id}/courses/{course_id}/complete/{video_id}
///
/// Idempotently mark one video complete for the user.
pub async fn mark_video_complete(
    State(state): State<AppState>,
    Path((id, course_id, video_id)): Path<(DbId, DbId, DbId)>,
) -> AppResult<StatusCode> {
    enrollment::mark_video_complete(&state.pool, id, course_id, video_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
