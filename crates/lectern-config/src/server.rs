use std::env;

/// Process-level settings: where to listen and how to size the pool.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub max_connections: u32,
    pub run_migrations: bool,
    pub log_dir: String,
}

impl ServerConfig {
    /// # Panics
    ///
    /// Panics if `DATABASE_URL` is not set.
    pub fn from_env() -> Self {
        Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(8080),
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(10),
            run_migrations: env::var("RUN_MIGRATIONS")
                .map(|v| v.to_lowercase() == "true" || v == "1")
                .unwrap_or(true),
            log_dir: env::var("LOG_DIR").unwrap_or_else(|_| "storage/logs".to_string()),
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
