use dotenvy::dotenv;
use tracing::info;

use lectern::logging::init_tracing;
use lectern::router::init_router;
use lectern::state::AppState;
use lectern_config::ServerConfig;
use lectern_db::{init_db_pool, run_migrations};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let server_config = ServerConfig::from_env();
    init_tracing(&server_config.log_dir)?;

    let db = init_db_pool(&server_config.database_url, server_config.max_connections).await?;
    if server_config.run_migrations {
        run_migrations(&db).await?;
    }

    let state = AppState::from_env(db);
    info!(
        course_delete = %state.policy.course_delete,
        lesson_access = %state.policy.lesson_access,
        "Policies loaded"
    );

    let app = init_router(state);

    let address = server_config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address).await?;
    info!(address = %address, "Server listening");
    info!("Swagger UI available at http://{}/swagger-ui", address);
    info!("Scalar UI available at http://{}/scalar", address);

    axum::serve(listener, app).await?;

    Ok(())
}
