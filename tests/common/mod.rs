#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use lectern::router::init_router;
use lectern::state::AppState;
use lectern_auth::{UserRole, create_access_token};
use lectern_config::{CorsConfig, JwtConfig, PolicyConfig};
use lectern_core::hash_password;
use serde_json::Value;
use sqlx::PgPool;
use tower::ServiceExt;
use uuid::Uuid;

pub struct TestUser {
    pub id: Uuid,
    pub email: String,
    pub password: String,
    pub role: UserRole,
}

pub fn test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "integration-test-secret-at-least-32-chars".to_string(),
        access_token_expiry: 3600,
    }
}

pub fn setup_test_app(pool: PgPool) -> Router {
    setup_test_app_with_policy(pool, PolicyConfig::default())
}

pub fn setup_test_app_with_policy(pool: PgPool, policy: PolicyConfig) -> Router {
    let state = AppState {
        db: pool,
        jwt_config: test_jwt_config(),
        cors_config: CorsConfig {
            allowed_origins: vec!["http://localhost:5173".to_string()],
        },
        policy,
    };
    init_router(state)
}

pub fn generate_unique_email() -> String {
    format!("test-{}@test.com", Uuid::new_v4())
}

pub fn generate_unique_code() -> String {
    format!("TEST-{}", &Uuid::new_v4().simple().to_string()[..8])
}

pub async fn create_test_user(pool: &PgPool, role: UserRole) -> TestUser {
    let email = generate_unique_email();
    let password = "testpass123".to_string();
    let hashed = hash_password(&password).unwrap();

    let id: Uuid = sqlx::query_scalar(
        "INSERT INTO users (name, email, password, role) VALUES ($1, $2, $3, $4) RETURNING id",
    )
    .bind("Test User")
    .bind(&email)
    .bind(&hashed)
    .bind(role)
    .fetch_one(pool)
    .await
    .unwrap();

    TestUser {
        id,
        email,
        password,
        role,
    }
}

pub fn token_for(user: &TestUser) -> String {
    create_access_token(user.id, &user.email, user.role, &test_jwt_config()).unwrap()
}

pub async fn create_test_course(pool: &PgPool, title: &str) -> Uuid {
    sqlx::query_scalar(
        "INSERT INTO courses (title, code, description)
         VALUES ($1, $2, 'Test course')
         RETURNING id",
    )
    .bind(title)
    .bind(generate_unique_code())
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn create_test_module(pool: &PgPool, course_id: Uuid, title: &str) -> Uuid {
    sqlx::query_scalar("INSERT INTO modules (course_id, title) VALUES ($1, $2) RETURNING id")
        .bind(course_id)
        .bind(title)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn create_test_lesson(pool: &PgPool, module_id: Uuid, title: &str) -> Uuid {
    sqlx::query_scalar(
        "INSERT INTO lessons (module_id, title, content_type, content_url, text_content)
         VALUES ($1, $2, 'video', 'https://example.com/v.mp4', 'notes')
         RETURNING id",
    )
    .bind(module_id)
    .bind(title)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn enroll(pool: &PgPool, user_id: Uuid, course_id: Uuid) {
    sqlx::query("INSERT INTO enrollments (user_id, course_id) VALUES ($1, $2)")
        .bind(user_id)
        .bind(course_id)
        .execute(pool)
        .await
        .unwrap();
}

/// Sends one request through the router and returns the status and the
/// decoded JSON body (`Value::Null` for an empty body).
pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }

    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (status, json)
}
