//! JWT creation and verification.
//!
//! Tokens are HS256-signed with `JwtConfig::secret` and expire after
//! `JwtConfig::access_token_expiry` seconds. Verification checks the
//! signature, the expiry, and that the payload decodes into [`Claims`]
//! (which rejects unknown roles).

use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use uuid::Uuid;

use lectern_config::JwtConfig;
use lectern_core::AppError;

use crate::claims::Claims;
use crate::role::UserRole;

/// Creates a signed access token for `user_id` carrying `role`.
///
/// # Errors
///
/// Returns an internal error if encoding fails.
pub fn create_access_token(
    user_id: Uuid,
    email: &str,
    role: UserRole,
    jwt_config: &JwtConfig,
) -> Result<String, AppError> {
    let now = Utc::now().timestamp() as usize;
    let exp = now + jwt_config.access_token_expiry as usize;

    let claims = Claims {
        sub: user_id.to_string(),
        email: email.to_string(),
        role,
        exp,
        iat: now,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_config.secret.as_bytes()),
    )
    .map_err(|e| AppError::internal_error(format!("Failed to create token: {}", e)))
}

/// Verifies an access token and returns its claims.
///
/// # Errors
///
/// Returns an unauthorized error if the token is malformed, expired, signed
/// with another secret, or carries claims that do not decode.
pub fn verify_token(token: &str, jwt_config: &JwtConfig) -> Result<Claims, AppError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_config.secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| AppError::unauthorized("Invalid or expired token"))
}
