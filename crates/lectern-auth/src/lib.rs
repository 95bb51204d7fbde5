//! # Lectern Auth
//!
//! Authentication types and JWT utilities for the Lectern API.
//!
//! - [`role`]: the closed set of user roles
//! - [`claims`]: the access token payload
//! - [`jwt`]: token creation and verification
//!
//! # Example
//!
//! ```ignore
//! use lectern_auth::{UserRole, create_access_token, verify_token};
//! use lectern_config::JwtConfig;
//!
//! let config = JwtConfig::from_env();
//! let token = create_access_token(user_id, "user@example.com", UserRole::Student, &config)?;
//! let claims = verify_token(&token, &config)?;
//! assert_eq!(claims.role, UserRole::Student);
//! ```

pub mod claims;
pub mod jwt;
pub mod role;

pub use claims::Claims;
pub use jwt::{create_access_token, verify_token};
pub use role::UserRole;
