//! # Lectern Core
//!
//! Foundational types shared by every Lectern crate:
//!
//! - [`errors`]: the application error type and its HTTP response mapping
//! - [`password`]: bcrypt password hashing and verification
//!
//! # Example
//!
//! ```ignore
//! use lectern_core::{AppError, hash_password, verify_password};
//!
//! let hash = hash_password("secure_password")?;
//! if !verify_password("secure_password", &hash)? {
//!     return Err(AppError::unauthorized("Invalid credentials"));
//! }
//! ```

pub mod errors;
pub mod password;

pub use errors::AppError;
pub use password::{hash_password, verify_password};
