//! Integration tests for enrollments, progress records, and users.

use sqlx::PgPool;

use coursekit_db::models::user::CreateUser;
use coursekit_db::repositories::{EnrollmentRepo, ProgressRepo, UserRepo};

#[sqlx::test(migrations = "../../db/migrations")]
async fn exists_reflects_creation(pool: PgPool) {
    assert!(!EnrollmentRepo::exists(&pool, 1, 10).await.unwrap());

    let enrollment = EnrollmentRepo::create(&pool, 1, 10).await.unwrap();
    assert_eq!(enrollment.progress, 0);
    assert!(enrollment.completed_videos.is_empty());

    assert!(EnrollmentRepo::exists(&pool, 1, 10).await.unwrap());
    assert!(!EnrollmentRepo::exists(&pool, 1, 11).await.unwrap());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn update_progress_replaces_completed_list(pool: PgPool) {
    let enrollment = EnrollmentRepo::create(&pool, 2, 20).await.unwrap();

    let updated = EnrollmentRepo::update_progress(&pool, enrollment.id, 50, Some(&[7]))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.progress, 50);
    assert_eq!(updated.completed_videos, vec![7]);
    assert!(updated.last_accessed_at >= enrollment.last_accessed_at);

    // A `None` list keeps the previous one.
    let kept = EnrollmentRepo::update_progress(&pool, enrollment.id, 75, None)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(kept.progress, 75);
    assert_eq!(kept.completed_videos, vec![7]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn progress_record_upsert_is_idempotent(pool: PgPool) {
    ProgressRepo::mark_completed(&pool, 3, 30, 300).await.unwrap();
    ProgressRepo::mark_completed(&pool, 3, 30, 300).await.unwrap();

    let records = ProgressRepo::list_for_course(&pool, 3, 30).await.unwrap();
    assert_eq!(records.len(), 1);
    assert!(records[0].completed);

    let ids = ProgressRepo::completed_video_ids(&pool, 3, 30).await.unwrap();
    assert_eq!(ids, vec![300]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn completed_ids_scope_to_course(pool: PgPool) {
    ProgressRepo::mark_completed(&pool, 4, 40, 400).await.unwrap();
    ProgressRepo::mark_completed(&pool, 4, 41, 410).await.unwrap();

    let ids = ProgressRepo::completed_video_ids(&pool, 4, 40).await.unwrap();
    assert_eq!(ids, vec![400]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn ensure_creates_user_once(pool: PgPool) {
    let input = CreateUser {
        email: "student@example.com".to_string(),
        display_name: Some("Student".to_string()),
        photo_url: None,
    };

    let first = UserRepo::ensure(&pool, &input).await.unwrap();
    assert_eq!(first.role, "student");
    assert_eq!(first.display_name, "Student");
    assert_eq!(first.photo_url, "");

    let second = UserRepo::ensure(&pool, &input).await.unwrap();
    assert_eq!(second.id, first.id);

    assert_eq!(UserRepo::list_all(&pool).await.unwrap().len(), 1);
}
