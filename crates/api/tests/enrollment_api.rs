//! HTTP-level integration tests for enrollment and progress.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, post_json, put_json};
use sqlx::PgPool;

async fn create_course(pool: &PgPool, title: &str) -> i64 {
    let app = common::build_test_app(pool.clone());
    let response = post_json(app, "/api/v1/courses", serde_json::json!({"title": title})).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["id"].as_i64().unwrap()
}

async fn enroll(pool: &PgPool, user_id: i64, course_id: i64) -> serde_json::Value {
    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/v1/enrollments",
        serde_json::json!({"user_id": user_id, "course_id": course_id}),
    )
    .await;
    assert!(response.status().is_success());
    body_json(response).await
}

// ---------------------------------------------------------------------------
// Idempotent enrollment
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn double_enroll_creates_one_row_and_one_increment(pool: PgPool) {
    let course_id = create_course(&pool, "Enrollable").await;

    let first = enroll(&pool, 42, course_id).await;
    assert_eq!(first["success"], true);
    assert_eq!(first["already_enrolled"], false);
    assert!(first["enrollment_id"].is_number());

    let second = enroll(&pool, 42, course_id).await;
    assert_eq!(second["success"], true);
    assert_eq!(second["already_enrolled"], true);
    assert!(second.get("enrollment_id").is_none());

    // Exactly one enrollment, counter bumped exactly once.
    let app = common::build_test_app(pool.clone());
    let enrollments = body_json(get(app, "/api/v1/users/42/enrollments").await).await;
    assert_eq!(enrollments.as_array().unwrap().len(), 1);

    let app = common::build_test_app(pool);
    let detail = body_json(get(app, &format!("/api/v1/courses/{course_id}")).await).await;
    assert_eq!(detail["students_count"], 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn check_endpoint_reports_enrollment(pool: PgPool) {
    let course_id = create_course(&pool, "Checkable").await;

    let app = common::build_test_app(pool.clone());
    let json = body_json(
        get(
            app,
            &format!("/api/v1/enrollments/check?user_id=7&course_id={course_id}"),
        )
        .await,
    )
    .await;
    assert_eq!(json["enrolled"], false);

    enroll(&pool, 7, course_id).await;

    let app = common::build_test_app(pool);
    let json = body_json(
        get(
            app,
            &format!("/api/v1/enrollments/check?user_id=7&course_id={course_id}"),
        )
        .await,
    )
    .await;
    assert_eq!(json["enrolled"], true);
}

// ---------------------------------------------------------------------------
// Flat progress field
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn completed_video_is_recorded_once(pool: PgPool) {
    let course_id = create_course(&pool, "Progressing").await;
    let enrollment_id = enroll(&pool, 9, course_id).await["enrollment_id"]
        .as_i64()
        .unwrap();

    for _ in 0..2 {
        let app = common::build_test_app(pool.clone());
        let response = put_json(
            app,
            &format!("/api/v1/enrollments/{enrollment_id}/progress"),
            serde_json::json!({"progress": 50, "completed_video_id": 7}),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    let app = common::build_test_app(pool);
    let response = put_json(
        app,
        &format!("/api/v1/enrollments/{enrollment_id}/progress"),
        serde_json::json!({"progress": 60}),
    )
    .await;
    let json = body_json(response).await;

    assert_eq!(json["progress"], 60);
    assert_eq!(json["completed_videos"], serde_json::json!([7]));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn progress_update_on_missing_enrollment_is_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = put_json(
        app,
        "/api/v1/enrollments/999999/progress",
        serde_json::json!({"progress": 10}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Per-video progress records
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn mark_complete_is_idempotent(pool: PgPool) {
    for _ in 0..2 {
        let app = common::build_test_app(pool.clone());
        let response = post_json(
            app,
            "/api/v1/progress/complete",
            serde_json::json!({"user_id": 5, "course_id": 50, "video_id": 500}),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    let app = common::build_test_app(pool);
    let json = body_json(get(app, "/api/v1/progress?user_id=5&course_id=50").await).await;
    assert_eq!(json.as_array().unwrap().len(), 1);
}

// ---------------------------------------------------------------------------
// Derived progress on enrolled courses
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn user_courses_derive_percentage_from_records(pool: PgPool) {
    let course_id = create_course(&pool, "Derived").await;

    // One section, three videos.
    let app = common::build_test_app(pool.clone());
    let section = body_json(
        post_json(
            app,
            &format!("/api/v1/courses/{course_id}/sections"),
            serde_json::json!({"title": "S"}),
        )
        .await,
    )
    .await;
    let section_id = section["id"].as_i64().unwrap();

    let mut video_ids = Vec::new();
    for title in ["a", "b", "c"] {
        let app = common::build_test_app(pool.clone());
        let video = body_json(
            post_json(
                app,
                &format!("/api/v1/courses/{course_id}/sections/{section_id}/videos"),
                serde_json::json!({"title": title}),
            )
            .await,
        )
        .await;
        video_ids.push(video["id"].as_i64().unwrap());
    }

    enroll(&pool, 11, course_id).await;

    // Complete one of three videos: floor(1/3 * 100) = 33.
    let app = common::build_test_app(pool.clone());
    post_json(
        app,
        "/api/v1/progress/complete",
        serde_json::json!({"user_id": 11, "course_id": course_id, "video_id": video_ids[0]}),
    )
    .await;

    let app = common::build_test_app(pool);
    let json = body_json(get(app, "/api/v1/users/11/courses").await).await;
    let entry = &json.as_array().unwrap()[0];
    assert_eq!(entry["progress"]["completed_videos"], 1);
    assert_eq!(entry["progress"]["total_videos"], 3);
    assert_eq!(entry["progress"]["percentage"], 33);
}

// ---------------------------------------------------------------------------
// Viewer completion flags
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn course_progress_view_flags_completed_videos(pool: PgPool) {
    let course_id = create_course(&pool, "Flagged").await;

    let app = common::build_test_app(pool.clone());
    let section = body_json(
        post_json(
            app,
            &format!("/api/v1/courses/{course_id}/sections"),
            serde_json::json!({"title": "S"}),
        )
        .await,
    )
    .await;
    let section_id = section["id"].as_i64().unwrap();

    let app = common::build_test_app(pool.clone());
    let video = body_json(
        post_json(
            app,
            &format!("/api/v1/courses/{course_id}/sections/{section_id}/videos"),
            serde_json::json!({"title": "only"}),
        )
        .await,
    )
    .await;
    let video_id = video["id"].as_i64().unwrap();

    let app = common::build_test_app(pool.clone());
    post_json(
        app,
        "/api/v1/progress/complete",
        serde_json::json!({"user_id": 13, "course_id": course_id, "video_id": video_id}),
    )
    .await;

    let app = common::build_test_app(pool);
    let json = body_json(
        get(
            app,
            &format!("/api/v1/courses/{course_id}/progress?user_id=13"),
        )
        .await,
    )
    .await;

    assert_eq!(json["completed_videos"], 1);
    assert_eq!(json["sections"][0]["videos"][0]["completed"], true);
}
