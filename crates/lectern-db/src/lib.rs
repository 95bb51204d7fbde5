//! # Lectern DB
//!
//! PostgreSQL pool construction and the embedded schema migrations.
//!
//! The pool is built once at startup and handed to the application state;
//! nothing in the workspace keeps a global connection handle.
//!
//! # Example
//!
//! ```ignore
//! use lectern_db::{init_db_pool, run_migrations};
//!
//! let pool = init_db_pool(&database_url, 10).await?;
//! run_migrations(&pool).await?;
//! ```

use sqlx::migrate::{MigrateError, Migrator};
use sqlx::postgres::PgPoolOptions;
use tracing::info;

pub use sqlx::PgPool;

/// Schema migrations under `migrations/` at the workspace root.
pub static MIGRATOR: Migrator = sqlx::migrate!("../../migrations");

/// Connects a pool to `database_url`.
///
/// The returned pool is cheaply cloneable; clone it into whatever needs it
/// instead of reconnecting.
pub async fn init_db_pool(database_url: &str, max_connections: u32) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await?;

    info!(max_connections, "Database connected");

    Ok(pool)
}

pub async fn run_migrations(pool: &PgPool) -> Result<(), MigrateError> {
    MIGRATOR.run(pool).await?;
    info!("Database migrations applied");
    Ok(())
}

/// Cheap liveness probe used by the health endpoint.
pub async fn ping(pool: &PgPool) -> bool {
    sqlx::query_scalar::<_, i32>("SELECT 1")
        .fetch_one(pool)
        .await
        .is_ok()
}
