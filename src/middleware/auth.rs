use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
};
use tracing::debug;

use lectern_auth::{Claims, UserRole, verify_token};
use lectern_core::AppError;
use lectern_models::ids::UserId;

use crate::state::AppState;

/// The caller behind a verified bearer token.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: UserId,
    pub email: String,
    pub role: UserRole,
}

impl AuthUser {
    pub fn from_claims(claims: Claims) -> Result<Self, AppError> {
        let user_id = claims
            .sub
            .parse::<UserId>()
            .map_err(|_| AppError::unauthorized("Invalid user ID in token"))?;

        Ok(Self {
            user_id,
            email: claims.email,
            role: claims.role,
        })
    }

    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(auth_user) = parts.extensions.get::<AuthUser>() {
            return Ok(auth_user.clone());
        }

        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|rejection| {
                    if rejection.is_missing() {
                        AppError::unauthorized("Missing authorization header")
                    } else {
                        AppError::unauthorized("Invalid authorization header format")
                    }
                })?;

        let claims = verify_token(bearer.token(), &state.jwt_config)?;

        AuthUser::from_claims(claims)
    }
}

/// Rejects requests without a valid bearer token and hands the verified
/// [`AuthUser`] to everything downstream through the request extensions.
pub async fn require_auth(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    let auth_user = AuthUser::from_request_parts(&mut parts, &state).await?;
    debug!(user.id = %auth_user.user_id, user.role = %auth_user.role, "Authenticated request");

    parts.extensions.insert(auth_user);
    Ok(next.run(Request::from_parts(parts, body)).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn claims_with_sub(sub: String, role: UserRole) -> Claims {
        Claims {
            sub,
            email: "test@example.com".to_string(),
            role,
            exp: 9999999999,
            iat: 1234567890,
        }
    }

    #[test]
    fn test_from_claims() {
        let id = Uuid::new_v4();
        let auth_user = AuthUser::from_claims(claims_with_sub(id.to_string(), UserRole::Admin))
            .unwrap();

        assert_eq!(auth_user.user_id.into_inner(), id);
        assert_eq!(auth_user.email, "test@example.com");
        assert!(auth_user.is_admin());
    }

    #[test]
    fn test_from_claims_rejects_non_uuid_subject() {
        let err = AuthUser::from_claims(claims_with_sub("42".to_string(), UserRole::Student))
            .unwrap_err();
        assert_eq!(err.status, axum::http::StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_student_is_not_admin() {
        let auth_user =
            AuthUser::from_claims(claims_with_sub(Uuid::new_v4().to_string(), UserRole::Student))
                .unwrap();
        assert!(!auth_user.is_admin());
    }
}
