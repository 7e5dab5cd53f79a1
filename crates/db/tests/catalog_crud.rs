//! Integration tests for the catalog repositories.
//!
//! Exercises the repository layer against a real database:
//! - Column defaults on create (counters, status, duration)
//! - Display ordering of sections and videos
//! - Partial updates
//! - Slug lookup

use sqlx::PgPool;

use coursekit_db::models::course::{CreateCourse, UpdateCourse};
use coursekit_db::models::section::CreateSection;
use coursekit_db::models::video::CreateVideo;
use coursekit_db::repositories::{CourseRepo, SectionRepo, VideoRepo};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_course(title: &str) -> CreateCourse {
    CreateCourse {
        title: title.to_string(),
        slug: None,
        description: None,
        category_id: None,
        instructor_id: None,
        price: None,
        original_price: None,
        level: None,
        status: None,
        featured: None,
        thumbnail: None,
        prerequisites: None,
        why_take_this_course: None,
        tags: None,
    }
}

fn new_section(title: &str, sort_order: i32) -> CreateSection {
    CreateSection {
        title: title.to_string(),
        description: None,
        sort_order: Some(sort_order),
    }
}

fn new_video(title: &str, sort_order: i32) -> CreateVideo {
    CreateVideo {
        title: title.to_string(),
        description: None,
        vimeo_id: None,
        duration: None,
        sort_order: Some(sort_order),
        is_free: None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_course_applies_defaults(pool: PgPool) {
    let course = CourseRepo::create(&pool, &new_course("Rust Basics"))
        .await
        .unwrap();

    assert_eq!(course.title, "Rust Basics");
    assert_eq!(course.status, "draft");
    assert_eq!(course.students_count, 0);
    assert_eq!(course.rating, 0.0);
    assert_eq!(course.reviews_count, 0);
    assert!(!course.featured);
    assert!(course.prerequisites.is_empty());
    assert!(course.tags.is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn sections_list_in_display_order(pool: PgPool) {
    let course = CourseRepo::create(&pool, &new_course("Ordered")).await.unwrap();

    // Inserted out of order on purpose.
    SectionRepo::create(&pool, course.id, &new_section("Second", 2), 2)
        .await
        .unwrap();
    SectionRepo::create(&pool, course.id, &new_section("First", 1), 1)
        .await
        .unwrap();
    SectionRepo::create(&pool, course.id, &new_section("Third", 3), 3)
        .await
        .unwrap();

    let sections = SectionRepo::list_by_course(&pool, course.id).await.unwrap();
    let orders: Vec<i32> = sections.iter().map(|s| s.sort_order).collect();
    assert_eq!(orders, vec![1, 2, 3]);
    assert_eq!(sections[0].title, "First");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn videos_list_in_display_order(pool: PgPool) {
    let course = CourseRepo::create(&pool, &new_course("Videos")).await.unwrap();
    let section = SectionRepo::create(&pool, course.id, &new_section("S1", 1), 1)
        .await
        .unwrap();

    VideoRepo::create(&pool, course.id, section.id, &new_video("V2", 2), "00:05:30", 2)
        .await
        .unwrap();
    VideoRepo::create(&pool, course.id, section.id, &new_video("V1", 1), "00:10:00", 1)
        .await
        .unwrap();

    let videos = VideoRepo::list_by_section(&pool, section.id).await.unwrap();
    let titles: Vec<&str> = videos.iter().map(|v| v.title.as_str()).collect();
    assert_eq!(titles, vec!["V1", "V2"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn video_defaults(pool: PgPool) {
    let course = CourseRepo::create(&pool, &new_course("Defaults")).await.unwrap();
    let section = SectionRepo::create(&pool, course.id, &new_section("S1", 1), 1)
        .await
        .unwrap();

    let video = VideoRepo::create(&pool, course.id, section.id, &new_video("V1", 1), "00:00:00", 1)
        .await
        .unwrap();

    assert_eq!(video.duration, "00:00:00");
    assert!(!video.is_free);
    assert!(video.attachments.0.is_empty());
    assert_eq!(video.vimeo_id, "");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn partial_update_keeps_unset_fields(pool: PgPool) {
    let mut input = new_course("Original");
    input.price = Some(49.0);
    let course = CourseRepo::create(&pool, &input).await.unwrap();

    let updated = CourseRepo::update(
        &pool,
        course.id,
        &UpdateCourse {
            title: Some("Renamed".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .unwrap();

    assert_eq!(updated.title, "Renamed");
    assert_eq!(updated.price, 49.0);
    assert!(updated.updated_at >= course.updated_at);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn update_missing_course_returns_none(pool: PgPool) {
    let result = CourseRepo::update(&pool, 999_999, &UpdateCourse::default())
        .await
        .unwrap();
    assert!(result.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn slug_lookup_takes_first_match(pool: PgPool) {
    let mut input = new_course("Slugged");
    input.slug = Some("intro-to-rust".to_string());
    let first = CourseRepo::create(&pool, &input).await.unwrap();

    // Duplicate slug: nothing prevents it, first match wins.
    let mut dup = new_course("Slugged Again");
    dup.slug = Some("intro-to-rust".to_string());
    CourseRepo::create(&pool, &dup).await.unwrap();

    let found = CourseRepo::find_by_slug(&pool, "intro-to-rust")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.id, first.id);

    assert!(CourseRepo::find_by_slug(&pool, "missing")
        .await
        .unwrap()
        .is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn max_sort_order_is_none_for_empty_course(pool: PgPool) {
    let course = CourseRepo::create(&pool, &new_course("Empty")).await.unwrap();
    let max = SectionRepo::max_sort_order(&pool, course.id).await.unwrap();
    assert_eq!(max, None);
}
