//! Role-based authorization.

use axum::{
    extract::{FromRequestParts, Request, State},
    middleware::Next,
    response::Response,
};
use tracing::warn;

use lectern_core::AppError;

use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Fails with 403 unless the caller is an admin.
pub fn ensure_admin(auth_user: &AuthUser) -> Result<(), AppError> {
    if auth_user.is_admin() {
        Ok(())
    } else {
        Err(AppError::forbidden("Admin access required"))
    }
}

/// Admin-only gate.
///
/// Reuses the [`AuthUser`] stored by `require_auth` when that layer ran
/// first, and verifies the bearer token itself otherwise.
///
/// ```rust,ignore
/// let admin_routes = Router::new()
///     .route("/courses", post(create_course))
///     .layer(middleware::from_fn_with_state(state.clone(), require_admin));
/// ```
pub async fn require_admin(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    let auth_user = AuthUser::from_request_parts(&mut parts, &state).await?;

    if let Err(err) = ensure_admin(&auth_user) {
        warn!(
            user.id = %auth_user.user_id,
            user.role = %auth_user.role,
            path = %parts.uri.path(),
            "Admin route refused"
        );
        return Err(err);
    }

    parts.extensions.insert(auth_user);
    Ok(next.run(Request::from_parts(parts, body)).await)
}
