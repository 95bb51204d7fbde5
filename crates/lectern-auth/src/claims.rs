//! JWT claim structure for access tokens.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::role::UserRole;

/// JWT claims for access tokens.
///
/// Carries everything the authorization gates need, so no request has to
/// reload the user to decide whether it may proceed.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Claims {
    /// User ID (subject claim)
    pub sub: String,
    /// User's email address
    pub email: String,
    /// Role at the time the token was issued
    pub role: UserRole,
    /// Token expiration timestamp (Unix timestamp)
    pub exp: usize,
    /// Token issued-at timestamp (Unix timestamp)
    pub iat: usize,
}
