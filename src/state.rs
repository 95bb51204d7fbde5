use sqlx::PgPool;

use lectern_config::{CorsConfig, JwtConfig, PolicyConfig};

#[derive(Clone, Debug)]
pub struct AppState {
    pub db: PgPool,
    pub jwt_config: JwtConfig,
    pub cors_config: CorsConfig,
    pub policy: PolicyConfig,
}

impl AppState {
    /// Builds the state around an already connected pool, reading every
    /// other setting from the environment.
    pub fn from_env(db: PgPool) -> Self {
        Self {
            db,
            jwt_config: JwtConfig::from_env(),
            cors_config: CorsConfig::from_env(),
            policy: PolicyConfig::from_env(),
        }
    }
}
