//! Admin account creation.
//!
//! The HTTP API also lets a registrant ask for `admin`, but operators
//! bootstrapping a deployment use this path.

use lectern_auth::UserRole;
use lectern_core::hash_password;
use lectern_models::auth::RegisterRequest;
use lectern_models::ids::UserId;
use sqlx::PgPool;
use validator::Validate;

/// Inserts an admin user. Fails if the input does not pass the same rules
/// as registration or if the email is taken.
pub async fn create_admin(
    db: &PgPool,
    name: &str,
    email: &str,
    password: &str,
) -> Result<UserId, Box<dyn std::error::Error>> {
    let request = RegisterRequest {
        name: name.to_string(),
        email: email.to_string(),
        password: password.to_string(),
        role: Some(UserRole::Admin.as_str().to_string()),
    };
    request.validate()?;

    let hashed_password =
        hash_password(password).map_err(|e| format!("Failed to hash password: {}", e.error))?;

    let user_id = sqlx::query_scalar::<_, UserId>(
        "INSERT INTO users (name, email, password, role)
         VALUES ($1, $2, $3, $4)
         ON CONFLICT (email) DO NOTHING
         RETURNING id",
    )
    .bind(&request.name)
    .bind(&request.email)
    .bind(&hashed_password)
    .bind(UserRole::Admin)
    .fetch_optional(db)
    .await?;

    user_id.ok_or_else(|| "User with this email already exists".into())
}
