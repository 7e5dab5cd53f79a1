//! Integration tests for the authoring layer's storage-coordinated
//! operations: cascade deletes, thumbnails, and attachments. These call the
//! layer directly so the blob side-effects can be observed on disk.

mod common;

use sqlx::PgPool;

use coursekit_api::authoring;
use coursekit_db::models::course::CreateCourse;
use coursekit_db::models::section::CreateSection;
use coursekit_db::models::video::CreateVideo;
use coursekit_db::repositories::{CourseRepo, SectionRepo, VideoRepo};
use coursekit_storage::LocalStore;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn local_store() -> (tempfile::TempDir, LocalStore) {
    let dir = tempfile::tempdir().unwrap();
    let store = LocalStore::new(dir.path(), "http://localhost:3000/objects");
    (dir, store)
}

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

fn new_section(title: &str) -> CreateSection {
    CreateSection {
        title: title.to_string(),
        description: None,
        sort_order: None,
    }
}

fn new_video(title: &str) -> CreateVideo {
    CreateVideo {
        title: title.to_string(),
        description: None,
        vimeo_id: None,
        duration: None,
        sort_order: None,
        is_free: None,
    }
}

// ---------------------------------------------------------------------------
// Thumbnails
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn thumbnail_upload_writes_blob_and_returns_url(pool: PgPool) {
    let (dir, store) = local_store();
    let course = authoring::create_course(&pool, &new_course("Thumbs")).await.unwrap();

    let url = authoring::upload_course_thumbnail(&store, course.id, b"png".to_vec(), "image/png")
        .await
        .unwrap();

    assert!(url.contains("/o/"));
    assert!(dir
        .path()
        .join(format!("courses/{}/thumbnail", course.id))
        .exists());
}

// ---------------------------------------------------------------------------
// Attachments
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn attachment_upload_appends_record(pool: PgPool) {
    let (dir, store) = local_store();
    let course = authoring::create_course(&pool, &new_course("Attach")).await.unwrap();
    let section = authoring::create_section(&pool, course.id, &new_section("S")).await.unwrap();
    let video = authoring::create_video(&pool, course.id, section.id, &new_video("V"))
        .await
        .unwrap();

    let updated = authoring::upload_attachment(
        &pool,
        &store,
        course.id,
        video.id,
        "slides.pdf",
        "application/pdf",
        b"pdf-bytes".to_vec(),
    )
    .await
    .unwrap();

    assert_eq!(updated.attachments.0.len(), 1);
    let attachment = &updated.attachments.0[0];
    assert_eq!(attachment.name, "slides.pdf");
    assert_eq!(attachment.size, 9);
    assert!(dir
        .path()
        .join(format!(
            "courses/{}/videos/{}/attachments/slides.pdf",
            course.id, video.id
        ))
        .exists());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn attachment_delete_removes_blob_and_record(pool: PgPool) {
    let (dir, store) = local_store();
    let course = authoring::create_course(&pool, &new_course("Detach")).await.unwrap();
    let section = authoring::create_section(&pool, course.id, &new_section("S")).await.unwrap();
    let video = authoring::create_video(&pool, course.id, section.id, &new_video("V"))
        .await
        .unwrap();

    let with_attachment = authoring::upload_attachment(
        &pool,
        &store,
        course.id,
        video.id,
        "notes.txt",
        "text/plain",
        b"text".to_vec(),
    )
    .await
    .unwrap();
    let url = with_attachment.attachments.0[0].url.clone();

    let updated = authoring::delete_attachment(&pool, &store, video.id, &url)
        .await
        .unwrap();

    assert!(updated.attachments.0.is_empty());
    assert!(!dir
        .path()
        .join(format!(
            "courses/{}/videos/{}/attachments/notes.txt",
            course.id, video.id
        ))
        .exists());
}

// ---------------------------------------------------------------------------
// Cascade deletes
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn delete_course_removes_all_children(pool: PgPool) {
    let (dir, store) = local_store();
    let course = authoring::create_course(&pool, &new_course("Doomed")).await.unwrap();

    let s1 = authoring::create_section(&pool, course.id, &new_section("S1")).await.unwrap();
    let s2 = authoring::create_section(&pool, course.id, &new_section("S2")).await.unwrap();
    let v1 = authoring::create_video(&pool, course.id, s1.id, &new_video("V1")).await.unwrap();
    authoring::create_video(&pool, course.id, s2.id, &new_video("V2")).await.unwrap();

    authoring::upload_attachment(
        &pool,
        &store,
        course.id,
        v1.id,
        "a.pdf",
        "application/pdf",
        b"a".to_vec(),
    )
    .await
    .unwrap();

    authoring::delete_course(&pool, &store, course.id).await.unwrap();

    assert!(CourseRepo::find_by_id(&pool, course.id).await.unwrap().is_none());
    assert!(SectionRepo::list_by_course(&pool, course.id).await.unwrap().is_empty());
    assert!(VideoRepo::find_by_id(&pool, v1.id).await.unwrap().is_none());
    assert!(!dir
        .path()
        .join(format!("courses/{}/videos/{}/attachments/a.pdf", course.id, v1.id))
        .exists());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn delete_course_survives_missing_thumbnail(pool: PgPool) {
    let (_dir, store) = local_store();
    let course = authoring::create_course(&pool, &new_course("No Thumb")).await.unwrap();

    // No thumbnail was ever uploaded; the cascade must still finish.
    authoring::delete_course(&pool, &store, course.id).await.unwrap();
    assert!(CourseRepo::find_by_id(&pool, course.id).await.unwrap().is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn delete_section_removes_its_videos_only(pool: PgPool) {
    let (_dir, store) = local_store();
    let course = authoring::create_course(&pool, &new_course("Partial")).await.unwrap();
    let doomed = authoring::create_section(&pool, course.id, &new_section("Doomed")).await.unwrap();
    let kept = authoring::create_section(&pool, course.id, &new_section("Kept")).await.unwrap();
    let doomed_video =
        authoring::create_video(&pool, course.id, doomed.id, &new_video("D")).await.unwrap();
    let kept_video =
        authoring::create_video(&pool, course.id, kept.id, &new_video("K")).await.unwrap();

    authoring::delete_section(&pool, &store, doomed.id).await.unwrap();

    assert!(VideoRepo::find_by_id(&pool, doomed_video.id).await.unwrap().is_none());
    assert!(VideoRepo::find_by_id(&pool, kept_video.id).await.unwrap().is_some());
    assert!(SectionRepo::find_by_id(&pool, kept.id).await.unwrap().is_some());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn delete_missing_video_is_not_found(pool: PgPool) {
    let (_dir, store) = local_store();
    let result = authoring::delete_video(&pool, &store, 999_999).await;
    assert!(result.is_err());
}
