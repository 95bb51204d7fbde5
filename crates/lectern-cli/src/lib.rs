//! # Lectern CLI
//!
//! Administrative helpers behind the `lectern-cli` binary: creating admin
//! accounts and seeding or clearing fake course data for development.
//!
//! ```ignore
//! use lectern_cli::seeder::{seed_all, SeedConfig};
//!
//! let config = SeedConfig::new(10).with_students(50);
//! seed_all(&pool, config).await?;
//! ```

pub mod admin;
pub mod seeder;
