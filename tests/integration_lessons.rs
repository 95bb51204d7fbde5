mod common;

use axum::http::StatusCode;
use common::{
    create_test_course, create_test_lesson, create_test_module, create_test_user, enroll, send,
    setup_test_app, setup_test_app_with_policy, token_for,
};
use lectern_auth::UserRole;
use lectern_config::{LessonAccessPolicy, PolicyConfig};
use sqlx::PgPool;
use uuid::Uuid;

fn enrolled_only() -> PolicyConfig {
    PolicyConfig {
        lesson_access: LessonAccessPolicy::Enrolled,
        ..PolicyConfig::default()
    }
}

#[sqlx::test(migrations = "./migrations")]
async fn test_get_lesson(pool: PgPool) {
    let student = create_test_user(&pool, UserRole::Student).await;
    let course = create_test_course(&pool, "Rust").await;
    let module = create_test_module(&pool, course, "Week 1").await;
    let lesson = create_test_lesson(&pool, module, "Ownership").await;
    let app = setup_test_app(pool);

    let (status, body) = send(
        &app,
        "GET",
        &format!("/api/lessons/{}", lesson),
        Some(&token_for(&student)),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], lesson.to_string());
    assert_eq!(body["moduleId"], module.to_string());
    assert_eq!(body["title"], "Ownership");
    assert_eq!(body["contentType"], "video");
    assert_eq!(body["contentURL"], "https://example.com/v.mp4");
    assert_eq!(body["textContent"], "notes");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_get_lesson_requires_token(pool: PgPool) {
    let course = create_test_course(&pool, "Rust").await;
    let module = create_test_module(&pool, course, "Week 1").await;
    let lesson = create_test_lesson(&pool, module, "Ownership").await;
    let app = setup_test_app(pool);

    let (status, _) = send(&app, "GET", &format!("/api/lessons/{}", lesson), None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_get_lesson_not_found(pool: PgPool) {
    let student = create_test_user(&pool, UserRole::Student).await;
    let token = token_for(&student);
    let app = setup_test_app(pool);

    let (status, body) = send(
        &app,
        "GET",
        &format!("/api/lessons/{}", Uuid::new_v4()),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Lesson not found");

    let (status, body) = send(&app, "GET", "/api/lessons/abc", Some(&token), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid lesson id");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_get_soft_deleted_lesson(pool: PgPool) {
    let student = create_test_user(&pool, UserRole::Student).await;
    let course = create_test_course(&pool, "Rust").await;
    let module = create_test_module(&pool, course, "Week 1").await;
    let lesson = create_test_lesson(&pool, module, "Ownership").await;

    sqlx::query("UPDATE lessons SET deleted = TRUE, deleted_at = NOW() WHERE id = $1")
        .bind(lesson)
        .execute(&pool)
        .await
        .unwrap();

    let app = setup_test_app(pool);
    let (status, _) = send(
        &app,
        "GET",
        &format!("/api/lessons/{}", lesson),
        Some(&token_for(&student)),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_enrolled_policy_refuses_outsiders(pool: PgPool) {
    let student = create_test_user(&pool, UserRole::Student).await;
    let course = create_test_course(&pool, "Rust").await;
    let module = create_test_module(&pool, course, "Week 1").await;
    let lesson = create_test_lesson(&pool, module, "Ownership").await;
    let app = setup_test_app_with_policy(pool, enrolled_only());

    let (status, body) = send(
        &app,
        "GET",
        &format!("/api/lessons/{}", lesson),
        Some(&token_for(&student)),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(
        body["error"],
        "You must be enrolled in this course to view its lessons"
    );
}

#[sqlx::test(migrations = "./migrations")]
async fn test_enrolled_policy_allows_enrolled_students(pool: PgPool) {
    let student = create_test_user(&pool, UserRole::Student).await;
    let course = create_test_course(&pool, "Rust").await;
    let module = create_test_module(&pool, course, "Week 1").await;
    let lesson = create_test_lesson(&pool, module, "Ownership").await;
    enroll(&pool, student.id, course).await;
    let app = setup_test_app_with_policy(pool, enrolled_only());

    let (status, body) = send(
        &app,
        "GET",
        &format!("/api/lessons/{}", lesson),
        Some(&token_for(&student)),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], lesson.to_string());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_enrolled_policy_ignores_withdrawn_enrollment(pool: PgPool) {
    let student = create_test_user(&pool, UserRole::Student).await;
    let course = create_test_course(&pool, "Rust").await;
    let module = create_test_module(&pool, course, "Week 1").await;
    let lesson = create_test_lesson(&pool, module, "Ownership").await;
    enroll(&pool, student.id, course).await;

    sqlx::query("UPDATE enrollments SET deleted = TRUE, deleted_at = NOW() WHERE user_id = $1")
        .bind(student.id)
        .execute(&pool)
        .await
        .unwrap();

    let app = setup_test_app_with_policy(pool, enrolled_only());
    let (status, _) = send(
        &app,
        "GET",
        &format!("/api/lessons/{}", lesson),
        Some(&token_for(&student)),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_enrolled_policy_admin_bypass(pool: PgPool) {
    let admin = create_test_user(&pool, UserRole::Admin).await;
    let course = create_test_course(&pool, "Rust").await;
    let module = create_test_module(&pool, course, "Week 1").await;
    let lesson = create_test_lesson(&pool, module, "Ownership").await;
    let app = setup_test_app_with_policy(pool, enrolled_only());

    let (status, _) = send(
        &app,
        "GET",
        &format!("/api/lessons/{}", lesson),
        Some(&token_for(&admin)),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}
