//! Course aggregation layer.
//!
//! Assembles display-ready course views out of several independent reads:
//! the course row, its instructor, its ordered sections, and each section's
//! ordered videos. Reads within one call fan out concurrently where they are
//! independent, but the call as a whole is not a snapshot -- a concurrent
//! authoring edit between the section query and a section's video query can
//! produce a momentarily inconsistent view. That matches the store semantics
//! this layer was built against and is accepted at catalog scale.

use futures::future::try_join_all;
use serde::Serialize;
use sqlx::PgPool;

use coursekit_core::duration::total_duration;
use coursekit_core::error::CoreError;
use coursekit_core::progress::completion_percentage;
use coursekit_core::types::{DbId, Timestamp};
use coursekit_db::models::category::CategoryWithCount;
use coursekit_db::models::course::{Course, CourseFilters};
use coursekit_db::models::section::Section;
use coursekit_db::models::user::User;
use coursekit_db::models::video::Video;
use coursekit_db::repositories::{
    CategoryRepo, CourseRepo, EnrollmentRepo, ProgressRepo, SectionRepo, UserRepo, VideoRepo,
};

use crate::error::{AppError, AppResult};

/// Instructor name shown when the referenced user document is missing or
/// has no display name.
pub const UNKNOWN_INSTRUCTOR: &str = "Unknown instructor";

/// Avatar used when the instructor has no photo (or does not exist).
pub const AVATAR_PLACEHOLDER: &str = "/images/avatar-placeholder.webp";

/// Listing caps matching the storefront sections.
const FEATURED_LIMIT: i64 = 6;

/// Description length in catalog listings.
const SUMMARY_DESCRIPTION_CHARS: usize = 150;

// ---------------------------------------------------------------------------
// Read models
// ---------------------------------------------------------------------------

/// Instructor projection attached to catalog reads.
#[derive(Debug, Clone, Serialize)]
pub struct InstructorSummary {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<DbId>,
    pub name: String,
    pub avatar: String,
}

impl InstructorSummary {
    /// The fallback used when the instructor reference is dangling.
    pub fn placeholder() -> Self {
        Self {
            id: None,
            name: UNKNOWN_INSTRUCTOR.to_string(),
            avatar: AVATAR_PLACEHOLDER.to_string(),
        }
    }

    fn from_user(user: &User) -> Self {
        Self {
            id: Some(user.id),
            name: if user.display_name.is_empty() {
                UNKNOWN_INSTRUCTOR.to_string()
            } else {
                user.display_name.clone()
            },
            avatar: if user.photo_url.is_empty() {
                AVATAR_PLACEHOLDER.to_string()
            } else {
                user.photo_url.clone()
            },
        }
    }
}

/// A course with its instructor resolved.
#[derive(Debug, Serialize)]
pub struct CourseWithInstructor {
    #[serde(flatten)]
    pub course: Course,
    pub instructor: InstructorSummary,
}

/// Listing projection: course + instructor + lesson count, description
/// truncated for card rendering.
#[derive(Debug, Serialize)]
pub struct CourseSummary {
    #[serde(flatten)]
    pub course: Course,
    pub instructor: InstructorSummary,
    pub lessons_count: i64,
}

/// One section with its ordered videos.
#[derive(Debug, Serialize)]
pub struct SectionWithVideos {
    #[serde(flatten)]
    pub section: Section,
    pub videos: Vec<Video>,
}

/// The full nested course view.
#[derive(Debug, Serialize)]
pub struct CourseDetail {
    #[serde(flatten)]
    pub course: Course,
    pub instructor: InstructorSummary,
    pub sections: Vec<SectionWithVideos>,
    pub lessons_count: usize,
    /// Canonical `"HH:MM:SS"` sum of every video duration.
    pub total_duration: String,
}

/// An enrollment joined with its course.
#[derive(Debug, Serialize)]
pub struct EnrollmentWithCourse {
    pub id: DbId,
    pub user_id: DbId,
    pub course_id: DbId,
    pub enrolled_at: Timestamp,
    pub progress: i32,
    pub completed_videos: Vec<DbId>,
    pub last_accessed_at: Timestamp,
    pub course: CourseWithInstructor,
}

/// Derived progress block on an enrolled course.
#[derive(Debug, Serialize)]
pub struct ProgressSummary {
    pub completed_videos: usize,
    pub total_videos: usize,
    pub percentage: u8,
}

/// An enrolled course with its derived progress.
#[derive(Debug, Serialize)]
pub struct EnrolledCourse {
    #[serde(flatten)]
    pub course: Course,
    pub instructor: InstructorSummary,
    pub enrolled_at: Timestamp,
    pub progress: ProgressSummary,
}

/// A video with the viewer's completion flag.
#[derive(Debug, Serialize)]
pub struct PlayerVideo {
    #[serde(flatten)]
    pub video: Video,
    pub completed: bool,
}

/// A section of [`PlayerVideo`]s.
#[derive(Debug, Serialize)]
pub struct PlayerSection {
    #[serde(flatten)]
    pub section: Section,
    pub videos: Vec<PlayerVideo>,
}

/// Course detail annotated with per-video completion for one viewer.
#[derive(Debug, Serialize)]
pub struct CourseWithViewerProgress {
    #[serde(flatten)]
    pub course: Course,
    pub instructor: InstructorSummary,
    pub sections: Vec<PlayerSection>,
    pub lessons_count: usize,
    pub completed_videos: usize,
}

// ---------------------------------------------------------------------------
// Instructor resolution
// ---------------------------------------------------------------------------

/// Resolve an instructor reference, falling back to the placeholder when the
/// reference is unset or dangling.
async fn instructor_for(
    pool: &PgPool,
    instructor_id: Option<DbId>,
) -> Result<InstructorSummary, sqlx::Error> {
    let Some(id) = instructor_id else {
        return Ok(InstructorSummary::placeholder());
    };
    Ok(UserRepo::find_by_id(pool, id)
        .await?
        .map(|u| InstructorSummary::from_user(&u))
        .unwrap_or_else(InstructorSummary::placeholder))
}

// ---------------------------------------------------------------------------
// Aggregated reads
// ---------------------------------------------------------------------------

/// The full nested view of one course.
pub async fn course_detail(pool: &PgPool, id: DbId) -> AppResult<CourseDetail> {
    let course = CourseRepo::find_by_id(pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Course",
            id,
        }))?;

    let instructor = instructor_for(pool, course.instructor_id).await?;
    let sections = SectionRepo::list_by_course(pool, id).await?;

    // Independent per-section video reads, joined before returning.
    let video_lists = try_join_all(
        sections
            .iter()
            .map(|section| VideoRepo::list_by_section(pool, section.id)),
    )
    .await?;

    let lessons_count = video_lists.iter().map(Vec::len).sum();
    let durations: Vec<String> = video_lists
        .iter()
        .flatten()
        .map(|v| v.duration.clone())
        .collect();

    let sections = sections
        .into_iter()
        .zip(video_lists)
        .map(|(section, videos)| SectionWithVideos { section, videos })
        .collect();

    Ok(CourseDetail {
        course,
        instructor,
        sections,
        lessons_count,
        total_duration: total_duration(durations),
    })
}

/// Look a course up by its slug. Slugs are unique by convention only; the
/// first match wins.
pub async fn course_by_slug(pool: &PgPool, slug: &str) -> AppResult<Course> {
    CourseRepo::find_by_slug(pool, slug)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No course with slug '{slug}'")))
}

/// Every course as a listing summary: truncated description, instructor,
/// and a lessons-count roll-up walked section by section. O(courses ×
/// sections) reads; fine at catalog scale, would need pagination beyond it.
pub async fn all_courses(pool: &PgPool) -> AppResult<Vec<CourseSummary>> {
    let courses = CourseRepo::list_all(pool).await?;
    let summaries = try_join_all(courses.into_iter().map(|course| summarize(pool, course))).await?;
    Ok(summaries)
}

async fn summarize(pool: &PgPool, mut course: Course) -> AppResult<CourseSummary> {
    course.description = truncate_chars(&course.description, SUMMARY_DESCRIPTION_CHARS);
    let instructor = instructor_for(pool, course.instructor_id).await?;

    let mut lessons_count = 0;
    for section in SectionRepo::list_by_course(pool, course.id).await? {
        lessons_count += VideoRepo::count_by_section(pool, section.id).await?;
    }

    Ok(CourseSummary {
        course,
        instructor,
        lessons_count,
    })
}

fn truncate_chars(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}

/// Filtered/sorted catalog listing with instructor summaries.
pub async fn list_courses(
    pool: &PgPool,
    filters: &CourseFilters,
) -> AppResult<Vec<CourseWithInstructor>> {
    let courses = CourseRepo::list_filtered(pool, filters).await?;
    with_instructors(pool, courses).await
}

/// In-process substring search over the whole catalog.
///
/// The store has no full-text index, so this fetches every course and
/// matches in memory -- a stand-in for a real search service.
pub async fn search_courses(pool: &PgPool, term: &str) -> AppResult<Vec<CourseWithInstructor>> {
    let needle = term.trim().to_lowercase();
    if needle.is_empty() {
        return Ok(Vec::new());
    }

    let matches: Vec<Course> = CourseRepo::list_all(pool)
        .await?
        .into_iter()
        .filter(|course| {
            course.title.to_lowercase().contains(&needle)
                || course.description.to_lowercase().contains(&needle)
                || course
                    .tags
                    .iter()
                    .any(|tag| tag.to_lowercase().contains(&needle))
        })
        .collect();

    with_instructors(pool, matches).await
}

/// Storefront sections: featured, latest, and most-enrolled courses.
pub async fn featured_courses(pool: &PgPool) -> AppResult<Vec<CourseWithInstructor>> {
    let courses = CourseRepo::list_featured(pool, FEATURED_LIMIT).await?;
    with_instructors(pool, courses).await
}

pub async fn latest_courses(pool: &PgPool, limit: i64) -> AppResult<Vec<CourseWithInstructor>> {
    let courses = CourseRepo::list_latest(pool, limit).await?;
    with_instructors(pool, courses).await
}

pub async fn popular_courses(pool: &PgPool, limit: i64) -> AppResult<Vec<CourseWithInstructor>> {
    let courses = CourseRepo::list_popular(pool, limit).await?;
    with_instructors(pool, courses).await
}

async fn with_instructors(
    pool: &PgPool,
    courses: Vec<Course>,
) -> AppResult<Vec<CourseWithInstructor>> {
    let results = try_join_all(courses.into_iter().map(|course| async move {
        let instructor = instructor_for(pool, course.instructor_id).await?;
        Ok::<_, sqlx::Error>(CourseWithInstructor { course, instructor })
    }))
    .await?;
    Ok(results)
}

/// Categories ordered by name, each with the number of courses in it.
pub async fn categories_with_counts(pool: &PgPool) -> AppResult<Vec<CategoryWithCount>> {
    let categories = CategoryRepo::list_all(pool).await?;
    let results = try_join_all(categories.into_iter().map(|category| async move {
        let courses_count = CourseRepo::count_by_category(pool, category.id).await?;
        Ok::<_, sqlx::Error>(CategoryWithCount {
            category,
            courses_count,
        })
    }))
    .await?;
    Ok(results)
}

// ---------------------------------------------------------------------------
// Viewer-scoped reads
// ---------------------------------------------------------------------------

/// A user's enrollments joined with their courses, newest first.
/// Enrollments whose course has vanished are dropped.
pub async fn user_enrollments(
    pool: &PgPool,
    user_id: DbId,
) -> AppResult<Vec<EnrollmentWithCourse>> {
    let enrollments = EnrollmentRepo::list_by_user(pool, user_id).await?;

    let mut results = Vec::with_capacity(enrollments.len());
    for enrollment in enrollments {
        let Some(course) = CourseRepo::find_by_id(pool, enrollment.course_id).await? else {
            continue;
        };
        let instructor = instructor_for(pool, course.instructor_id).await?;
        results.push(EnrollmentWithCourse {
            id: enrollment.id,
            user_id: enrollment.user_id,
            course_id: enrollment.course_id,
            enrolled_at: enrollment.enrolled_at,
            progress: enrollment.progress,
            completed_videos: enrollment.completed_videos,
            last_accessed_at: enrollment.last_accessed_at,
            course: CourseWithInstructor { course, instructor },
        });
    }
    Ok(results)
}

/// A user's enrolled courses with progress derived from completion records.
///
/// The percentage is recomputed here on every read; the flat
/// `enrollments.progress` field is never consulted.
pub async fn user_courses(pool: &PgPool, user_id: DbId) -> AppResult<Vec<EnrolledCourse>> {
    let enrollments = EnrollmentRepo::list_by_user(pool, user_id).await?;

    let mut results = Vec::with_capacity(enrollments.len());
    for enrollment in enrollments {
        let Some(course) = CourseRepo::find_by_id(pool, enrollment.course_id).await? else {
            continue;
        };
        let instructor = instructor_for(pool, course.instructor_id).await?;

        let completed = ProgressRepo::completed_video_ids(pool, user_id, course.id)
            .await?
            .len();
        let mut total = 0usize;
        for section in SectionRepo::list_by_course(pool, course.id).await? {
            total += VideoRepo::count_by_section(pool, section.id).await? as usize;
        }

        results.push(EnrolledCourse {
            course,
            instructor,
            enrolled_at: enrollment.enrolled_at,
            progress: ProgressSummary {
                completed_videos: completed,
                total_videos: total,
                percentage: completion_percentage(completed, total),
            },
        });
    }
    Ok(results)
}

/// Course detail with each video flagged completed/incomplete for one
/// viewer.
pub async fn course_with_viewer_progress(
    pool: &PgPool,
    user_id: DbId,
    course_id: DbId,
) -> AppResult<CourseWithViewerProgress> {
    let completed = ProgressRepo::completed_video_ids(pool, user_id, course_id).await?;
    let detail = course_detail(pool, course_id).await?;

    let sections = detail
        .sections
        .into_iter()
        .map(|entry| PlayerSection {
            section: entry.section,
            videos: entry
                .videos
                .into_iter()
                .map(|video| {
                    let done = completed.contains(&video.id);
                    PlayerVideo {
                        video,
                        completed: done,
                    }
                })
                .collect(),
        })
        .collect();

    Ok(CourseWithViewerProgress {
        course: detail.course,
        instructor: detail.instructor,
        sections,
        lessons_count: detail.lessons_count,
        completed_videos: completed.len(),
    })
}
