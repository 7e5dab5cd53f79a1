//! Enrollment & progress layer.
//!
//! An enrollment is a one-way transition (there is no unenroll), and each
//! video's completion is one-way too. Enrollment is idempotent at the
//! application level: the pre-insert existence check and the insert are
//! independent statements, so a concurrent double-enroll can slip through --
//! accepted for the target deployment scale and documented in DESIGN.md.

use serde::Serialize;
use sqlx::PgPool;

use coursekit_core::error::CoreError;
use coursekit_core::types::DbId;
use coursekit_db::models::enrollment::{Enrollment, UpdateProgress};
use coursekit_db::models::progress::ProgressRecord;
use coursekit_db::repositories::{CourseRepo, EnrollmentRepo, ProgressRepo};

use crate::error::{AppError, AppResult};

/// Result of an enroll call.
#[derive(Debug, Serialize)]
pub struct EnrollOutcome {
    pub success: bool,
    /// Set when the user was already enrolled and no row was created.
    pub already_enrolled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enrollment_id: Option<DbId>,
}

/// Whether the user is enrolled in the course.
pub async fn check(pool: &PgPool, user_id: DbId, course_id: DbId) -> AppResult<bool> {
    Ok(EnrollmentRepo::exists(pool, user_id, course_id).await?)
}

/// Enroll a user in a course.
///
/// Re-invoking for an existing enrollment reports success without creating
/// a duplicate. A fresh enrollment bumps the course's `students_count` via
/// an independent read-modify-write; the course row may have vanished in
/// between, in which case the counter update is skipped.
pub async fn enroll(pool: &PgPool, user_id: DbId, course_id: DbId) -> AppResult<EnrollOutcome> {
    if EnrollmentRepo::exists(pool, user_id, course_id).await? {
        return Ok(EnrollOutcome {
            success: true,
            already_enrolled: true,
            enrollment_id: None,
        });
    }

    let enrollment = EnrollmentRepo::create(pool, user_id, course_id).await?;

    if let Some(course) = CourseRepo::find_by_id(pool, course_id).await? {
        CourseRepo::set_students_count(pool, course_id, course.students_count + 1).await?;
    }

    tracing::info!(user_id, course_id, enrollment_id = enrollment.id, "User enrolled");

    Ok(EnrollOutcome {
        success: true,
        already_enrolled: false,
        enrollment_id: Some(enrollment.id),
    })
}

/// Write the flat progress percentage and optionally record one more
/// completed video.
///
/// The completed-video append is idempotent (the id is only added when
/// absent). The flat percentage is stored exactly as given -- it is the
/// caller's job to keep it consistent with `completed_videos`.
pub async fn update_progress(
    pool: &PgPool,
    enrollment_id: DbId,
    input: &UpdateProgress,
) -> AppResult<Enrollment> {
    let enrollment = EnrollmentRepo::find_by_id(pool, enrollment_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Enrollment",
            id: enrollment_id,
        }))?;

    let completed = input.completed_video_id.and_then(|video_id| {
        if enrollment.completed_videos.contains(&video_id) {
            None
        } else {
            let mut updated = enrollment.completed_videos.clone();
            updated.push(video_id);
            Some(updated)
        }
    });

    EnrollmentRepo::update_progress(pool, enrollment_id, input.progress, completed.as_deref())
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Enrollment",
            id: enrollment_id,
        }))
}

/// Idempotently mark one video complete in the per-video record model.
pub async fn mark_video_complete(
    pool: &PgPool,
    user_id: DbId,
    course_id: DbId,
    video_id: DbId,
) -> AppResult<ProgressRecord> {
    Ok(ProgressRepo::mark_completed(pool, user_id, course_id, video_id).await?)
}

/// All of a user's per-video progress records for a course.
pub async fn user_progress(
    pool: &PgPool,
    user_id: DbId,
    course_id: DbId,
) -> AppResult<Vec<ProgressRecord>> {
    Ok(ProgressRepo::list_for_course(pool, user_id, course_id).await?)
}
