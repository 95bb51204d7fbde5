mod common;

use axum::http::StatusCode;
use common::{create_test_user, generate_unique_email, send, setup_test_app};
use lectern_auth::{UserRole, verify_token};
use serde_json::json;
use sqlx::PgPool;

async fn stored_role(pool: &PgPool, email: &str) -> UserRole {
    sqlx::query_scalar("SELECT role FROM users WHERE email = $1")
        .bind(email)
        .fetch_one(pool)
        .await
        .unwrap()
}

#[sqlx::test(migrations = "./migrations")]
async fn test_register_admin(pool: PgPool) {
    let app = setup_test_app(pool.clone());

    let (status, body) = send(
        &app,
        "POST",
        "/api/auth/register",
        None,
        Some(json!({"name": "A", "email": "a@x.com", "password": "pw", "role": "admin"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Registered successfully");
    assert_eq!(body["user"]["email"], "a@x.com");
    assert_eq!(body["user"]["role"], "admin");
    assert!(body["user"].get("password").is_none());
    assert_eq!(stored_role(&pool, "a@x.com").await, UserRole::Admin);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_register_duplicate_email(pool: PgPool) {
    let app = setup_test_app(pool.clone());
    let payload = json!({"name": "A", "email": "a@x.com", "password": "pw", "role": "admin"});

    let (status, _) = send(&app, "POST", "/api/auth/register", None, Some(payload.clone())).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&app, "POST", "/api/auth/register", None, Some(payload)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Email already exists");

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE email = 'a@x.com'")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_register_unknown_role_becomes_student(pool: PgPool) {
    let app = setup_test_app(pool.clone());
    let email = generate_unique_email();

    let (status, body) = send(
        &app,
        "POST",
        "/api/auth/register",
        None,
        Some(json!({"name": "T", "email": email, "password": "pw", "role": "teacher"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["role"], "student");
    assert_eq!(stored_role(&pool, &email).await, UserRole::Student);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_register_without_role_is_student(pool: PgPool) {
    let app = setup_test_app(pool.clone());
    let email = generate_unique_email();

    let (status, body) = send(
        &app,
        "POST",
        "/api/auth/register",
        None,
        Some(json!({"name": "S", "email": email, "password": "pw"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["role"], "student");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_register_validation_errors(pool: PgPool) {
    let app = setup_test_app(pool);

    let cases = [
        json!({"name": "", "email": "a@x.com", "password": "pw"}),
        json!({"name": "A", "email": "not-an-email", "password": "pw"}),
        json!({"name": "A", "email": "a@x.com", "password": ""}),
        json!({"name": "A", "password": "pw"}),
        json!({"name": 5, "email": "a@x.com", "password": "pw"}),
    ];

    for payload in cases {
        let (status, body) =
            send(&app, "POST", "/api/auth/register", None, Some(payload.clone())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "payload: {payload}");
        assert!(body["error"].is_string());
    }
}

/// 60-char local part and four 60-char labels: 308 characters, well-formed
/// but wider than the `users.email` column.
fn oversized_email() -> String {
    let label = "b".repeat(60);
    format!("{}@{}.{}.{}.{}.com", "a".repeat(60), label, label, label, label)
}

#[sqlx::test(migrations = "./migrations")]
async fn test_register_oversized_email_is_bad_request(pool: PgPool) {
    let app = setup_test_app(pool.clone());
    let email = oversized_email();

    let (status, body) = send(
        &app,
        "POST",
        "/api/auth/register",
        None,
        Some(json!({"name": "Long", "email": email, "password": "pw"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let users: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(users, 0);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_login_oversized_email_is_bad_request(pool: PgPool) {
    let app = setup_test_app(pool);

    let (status, _) = send(
        &app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({"email": oversized_email(), "password": "pw"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_login_success(pool: PgPool) {
    let user = create_test_user(&pool, UserRole::Student).await;
    let app = setup_test_app(pool);

    let (status, body) = send(
        &app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({"email": user.email, "password": user.password})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["id"], user.id.to_string());
    assert_eq!(body["user"]["role"], "student");

    let token = body["token"].as_str().unwrap();
    let claims = verify_token(token, &common::test_jwt_config()).unwrap();
    assert_eq!(claims.sub, user.id.to_string());
    assert_eq!(claims.role, UserRole::Student);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_login_wrong_password_matches_unknown_email(pool: PgPool) {
    let user = create_test_user(&pool, UserRole::Student).await;
    let app = setup_test_app(pool);

    let (wrong_status, wrong_body) = send(
        &app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({"email": user.email, "password": "not-the-password"})),
    )
    .await;

    let (unknown_status, unknown_body) = send(
        &app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({"email": "nobody@test.com", "password": "whatever"})),
    )
    .await;

    assert_eq!(wrong_status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_body, unknown_body);
    assert_eq!(wrong_body["error"], "Invalid credentials");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_register_then_login(pool: PgPool) {
    let app = setup_test_app(pool);
    let email = generate_unique_email();

    send(
        &app,
        "POST",
        "/api/auth/register",
        None,
        Some(json!({"name": "New", "email": email, "password": "s3cret"})),
    )
    .await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({"email": email, "password": "s3cret"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["token"].as_str().is_some_and(|t| !t.is_empty()));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_login_missing_password(pool: PgPool) {
    let app = setup_test_app(pool);

    let (status, body) = send(
        &app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({"email": "test@test.com"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "password is required");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_health(pool: PgPool) {
    let app = setup_test_app(pool);

    let (status, body) = send(&app, "GET", "/health", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "lectern");
    assert_eq!(body["database"], "ok");
}
