//! Handlers for the `/enrollments` and `/progress` resources.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use coursekit_core::types::DbId;
use coursekit_db::models::enrollment::{Enrollment, UpdateProgress};
use coursekit_db::models::progress::ProgressRecord;

use crate::enrollment::{self, EnrollOutcome};
use crate::error::AppResult;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct EnrollBody {
    pub user_id: DbId,
    pub course_id: DbId,
}

#[derive(Debug, Deserialize)]
pub struct PairParams {
    pub user_id: DbId,
    pub course_id: DbId,
}

#[derive(Debug, Serialize)]
pub struct CheckResponse {
    pub enrolled: bool,
}

#[derive(Debug, Deserialize)]
pub struct CompleteBody {
    pub user_id: DbId,
    pub course_id: DbId,
    pub video_id: DbId,
}

/// GET /api/v1/enrollments/check?user_id=&course_id=
pub async fn check(
    State(state): State<AppState>,
    Query(params): Query<PairParams>,
) -> AppResult<Json<CheckResponse>> {
    let enrolled = enrollment::check(&state.pool, params.user_id, params.course_id).await?;
    Ok(Json(CheckResponse { enrolled }))
}

/// POST /api/v1/enrollments
///
/// Idempotent at the application level: enrolling twice reports success
/// without creating a second row.
pub async fn enroll(
    State(state): State<AppState>,
    Json(body): Json<EnrollBody>,
) -> AppResult<(StatusCode, Json<EnrollOutcome>)> {
    let outcome = enrollment::enroll(&state.pool, body.user_id, body.course_id).await?;
    let status = if outcome.already_enrolled {
        StatusCode::OK
    } else {
        StatusCode::CREATED
    };
    Ok((status, Json(outcome)))
}

/// PUT /api/v1/enrollments/{id}/progress
pub async fn update_progress(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateProgress>,
) -> AppResult<Json<Enrollment>> {
    let enrollment = enrollment::update_progress(&state.pool, id, &input).await?;
    Ok(Json(enrollment))
}

/// GET /api/v1/progress?user_id=&course_id=
///
/// Per-video progress records for the pair.
pub async fn list_progress(
    State(state): State<AppState>,
    Query(params): Query<PairParams>,
) -> AppResult<Json<Vec<ProgressRecord>>> {
    let records = enrollment::user_progress(&state.pool, params.user_id, params.course_id).await?;
    Ok(Json(records))
}

/// POST /api/v1/progress/complete
///
/// Idempotently mark one video complete.
pub async fn mark_complete(
    State(state): State<AppState>,
    Json(body): Json<CompleteBody>,
) -> AppResult<Json<ProgressRecord>> {
    let record =
        enrollment::mark_video_complete(&state.pool, body.user_id, body.course_id, body.video_id)
            .await?;
    Ok(Json(record))
}
