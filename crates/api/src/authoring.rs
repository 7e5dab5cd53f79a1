//! Admin authoring layer.
//!
//! Creates, updates, and deletes catalog content, coordinating with the
//! object store for binary assets. Cascade deletes run children-first as a
//! sequence of independent statements: blob cleanup is best-effort (logged
//! and skipped on failure), row deletes propagate their errors. Nothing here
//! is transactional -- a crash mid-cascade leaves orphans, which the reads
//! tolerate.

use sqlx::PgPool;

use coursekit_core::duration::{canonicalize, DurationValue};
use coursekit_core::error::CoreError;
use coursekit_core::types::DbId;
use coursekit_db::models::course::{Course, CreateCourse, UpdateCourse};
use coursekit_db::models::section::{CreateSection, Section, UpdateSection};
use coursekit_db::models::video::{Attachment, CreateVideo, UpdateVideo, Video};
use coursekit_db::repositories::{CourseRepo, SectionRepo, VideoRepo};
use coursekit_storage::{paths, ObjectStore};

use crate::error::{AppError, AppResult};

/// Duration stored when a video is created without one.
const ZERO_DURATION: &str = "00:00:00";

// ---------------------------------------------------------------------------
// Courses
// ---------------------------------------------------------------------------

/// Insert a course with server-assigned timestamps and zeroed aggregate
/// counters. Category existence, slug uniqueness, and numeric ranges are
/// client-form checks, deliberately not revalidated here.
pub async fn create_course(pool: &PgPool, input: &CreateCourse) -> AppResult<Course> {
    Ok(CourseRepo::create(pool, input).await?)
}

/// Patch a course, bumping `updated_at`.
pub async fn update_course(pool: &PgPool, id: DbId, input: &UpdateCourse) -> AppResult<Course> {
    CourseRepo::update(pool, id, input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Course",
            id,
        }))
}

/// Store the course thumbnail at its fixed path, overwriting any prior
/// blob, and return the durable URL. Patching the course document's
/// `thumbnail` field is the caller's second, independent step.
pub async fn upload_course_thumbnail(
    storage: &dyn ObjectStore,
    course_id: DbId,
    bytes: Vec<u8>,
    content_type: &str,
) -> AppResult<String> {
    let url = storage
        .put(&paths::course_thumbnail(course_id), bytes, content_type)
        .await?;
    Ok(url)
}

/// Cascade-delete a course: every section's videos (with their attachment
/// blobs), every section, the thumbnail blob, then the course row.
pub async fn delete_course(
    pool: &PgPool,
    storage: &dyn ObjectStore,
    course_id: DbId,
) -> AppResult<()> {
    let sections = SectionRepo::list_by_course(pool, course_id).await?;
    for section in sections {
        delete_section_contents(pool, storage, section.id).await?;
        SectionRepo::delete(pool, section.id).await?;
    }

    // The thumbnail may never have been uploaded; a missing blob must not
    // block the course delete.
    if let Err(err) = storage.delete(&paths::course_thumbnail(course_id)).await {
        tracing::debug!(course_id, error = %err, "Thumbnail blob not deleted, continuing");
    }

    let deleted = CourseRepo::delete(pool, course_id).await?;
    if deleted {
        Ok(())
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Course",
            id: course_id,
        }))
    }
}

// ---------------------------------------------------------------------------
// Sections
// ---------------------------------------------------------------------------

/// Insert a section at the next free position within the course.
///
/// The max+1 read and the insert are independent statements; two concurrent
/// creators can land on the same position. Display order only, so the
/// collision is harmless and left as-is.
pub async fn create_section(
    pool: &PgPool,
    course_id: DbId,
    input: &CreateSection,
) -> AppResult<Section> {
    let sort_order = match input.sort_order {
        Some(explicit) => explicit,
        None => SectionRepo::max_sort_order(pool, course_id).await?.unwrap_or(0) + 1,
    };
    Ok(SectionRepo::create(pool, course_id, input, sort_order).await?)
}

/// Patch a section, bumping `updated_at`.
pub async fn update_section(pool: &PgPool, id: DbId, input: &UpdateSection) -> AppResult<Section> {
    SectionRepo::update(pool, id, input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Section",
            id,
        }))
}

/// Cascade-delete a section: child videos (and their attachment blobs)
/// first, then the section row. Remaining sections keep their positions;
/// gaps are permitted.
pub async fn delete_section(
    pool: &PgPool,
    storage: &dyn ObjectStore,
    section_id: DbId,
) -> AppResult<()> {
    delete_section_contents(pool, storage, section_id).await?;

    let deleted = SectionRepo::delete(pool, section_id).await?;
    if deleted {
        Ok(())
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Section",
            id: section_id,
        }))
    }
}

/// Delete every video under a section, attachments first.
async fn delete_section_contents(
    pool: &PgPool,
    storage: &dyn ObjectStore,
    section_id: DbId,
) -> AppResult<()> {
    for video in VideoRepo::list_by_section(pool, section_id).await? {
        delete_attachment_blobs(storage, &video).await;
        VideoRepo::delete(pool, video.id).await?;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Videos
// ---------------------------------------------------------------------------

/// Insert a video at the next free position within its section, duration
/// normalized to the canonical colon string.
pub async fn create_video(
    pool: &PgPool,
    course_id: DbId,
    section_id: DbId,
    input: &CreateVideo,
) -> AppResult<Video> {
    let duration = normalized_duration(input.duration.as_ref());
    let sort_order = match input.sort_order {
        Some(explicit) => explicit,
        None => VideoRepo::max_sort_order(pool, section_id).await?.unwrap_or(0) + 1,
    };
    Ok(VideoRepo::create(pool, course_id, section_id, input, &duration, sort_order).await?)
}

/// Patch a video, normalizing the duration when one is supplied.
pub async fn update_video(pool: &PgPool, id: DbId, input: &UpdateVideo) -> AppResult<Video> {
    let duration = input.duration.as_ref().map(canonicalize);
    VideoRepo::update(pool, id, input, duration)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Video",
            id,
        }))
}

/// Delete a video: attachment blobs best-effort, then the row.
pub async fn delete_video(
    pool: &PgPool,
    storage: &dyn ObjectStore,
    video_id: DbId,
) -> AppResult<()> {
    let video = VideoRepo::find_by_id(pool, video_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Video",
            id: video_id,
        }))?;

    delete_attachment_blobs(storage, &video).await;

    VideoRepo::delete(pool, video_id).await?;
    Ok(())
}

fn normalized_duration(duration: Option<&DurationValue>) -> String {
    duration
        .map(canonicalize)
        .unwrap_or_else(|| ZERO_DURATION.to_string())
}

/// Best-effort cleanup of a video's attachment blobs: failures are logged
/// and skipped, never retried.
async fn delete_attachment_blobs(storage: &dyn ObjectStore, video: &Video) {
    for attachment in video.attachments.0.iter() {
        let path = match storage.path_from_url(&attachment.url) {
            Ok(path) => path,
            Err(err) => {
                tracing::warn!(
                    video_id = video.id,
                    url = %attachment.url,
                    error = %err,
                    "Could not resolve attachment blob path, skipping"
                );
                continue;
            }
        };
        if let Err(err) = storage.delete(&path).await {
            tracing::warn!(
                video_id = video.id,
                path = %path,
                error = %err,
                "Attachment blob delete failed, continuing"
            );
        }
    }
}

// ---------------------------------------------------------------------------
// Attachments
// ---------------------------------------------------------------------------

/// Store an attachment blob and append its record to the video document.
pub async fn upload_attachment(
    pool: &PgPool,
    storage: &dyn ObjectStore,
    course_id: DbId,
    video_id: DbId,
    filename: &str,
    content_type: &str,
    bytes: Vec<u8>,
) -> AppResult<Video> {
    let video = VideoRepo::find_by_id(pool, video_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Video",
            id: video_id,
        }))?;

    let size = bytes.len() as i64;
    let path = paths::video_attachment(course_id, video_id, filename);
    let url = storage.put(&path, bytes, content_type).await?;

    let mut attachments = video.attachments.0.clone();
    attachments.push(Attachment {
        name: filename.to_string(),
        url,
        content_type: content_type.to_string(),
        size,
        uploaded_at: chrono::Utc::now(),
    });

    VideoRepo::set_attachments(pool, video_id, &attachments)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Video",
            id: video_id,
        }))
}

/// Delete an attachment blob (path recovered from its public URL) and drop
/// its record from the video document.
pub async fn delete_attachment(
    pool: &PgPool,
    storage: &dyn ObjectStore,
    video_id: DbId,
    attachment_url: &str,
) -> AppResult<Video> {
    let video = VideoRepo::find_by_id(pool, video_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Video",
            id: video_id,
        }))?;

    let path = storage.path_from_url(attachment_url)?;
    storage.delete(&path).await?;

    let remaining: Vec<Attachment> = video
        .attachments
        .0
        .iter()
        .filter(|a| a.url != attachment_url)
        .cloned()
        .collect();

    VideoRepo::set_attachments(pool, video_id, &remaining)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Video",
            id: video_id,
        }))
}

// ---------------------------------------------------------------------------
// Categories
// ---------------------------------------------------------------------------

/// Delete a category unless a course still references it.
///
/// The reference count and the delete are independent statements -- the
/// usual check-then-act caveat applies and is accepted.
pub async fn delete_category(pool: &PgPool, id: DbId) -> AppResult<()> {
    let in_use = CourseRepo::count_by_category(pool, id).await?;
    if in_use > 0 {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "Cannot delete category: {in_use} course(s) still use it"
        ))));
    }

    let deleted = coursekit_db::repositories::CategoryRepo::delete(pool, id).await?;
    if deleted {
        Ok(())
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Category",
            id,
        }))
    }
}
