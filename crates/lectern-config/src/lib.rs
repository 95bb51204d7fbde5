//! # Lectern Config
//!
//! Configuration structures loaded from environment variables:
//!
//! - [`jwt`]: token signing secret and lifetime
//! - [`cors`]: allowed browser origins
//! - [`server`]: bind address and database pool sizing
//! - [`policy`]: course-deletion cascade and lesson-access rules
//!
//! # Example
//!
//! ```ignore
//! use lectern_config::{CorsConfig, JwtConfig, PolicyConfig, ServerConfig};
//!
//! let jwt_config = JwtConfig::from_env();
//! let cors_config = CorsConfig::from_env();
//! let policy = PolicyConfig::from_env();
//! let server = ServerConfig::from_env();
//! ```

pub mod cors;
pub mod jwt;
pub mod policy;
pub mod server;

pub use cors::CorsConfig;
pub use jwt::JwtConfig;
pub use policy::{CourseDeletePolicy, LessonAccessPolicy, PolicyConfig};
pub use server::ServerConfig;
