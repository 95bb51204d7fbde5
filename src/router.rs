use axum::http::{HeaderValue, Method, header};
use axum::{Router, middleware, routing::get};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable as _};
use utoipa_swagger_ui::SwaggerUi;

use crate::docs::ApiDoc;
use crate::logging::logging_middleware;
use crate::middleware::auth::require_auth;
use crate::middleware::role::require_admin;
use crate::modules::admin::init_admin_router;
use crate::modules::auth::init_auth_router;
use crate::modules::courses::init_courses_router;
use crate::modules::health::health_check;
use crate::modules::lessons::init_lessons_router;
use crate::state::AppState;

pub fn init_router(state: AppState) -> Router {
    let cors = {
        let allowed_origins: Vec<HeaderValue> = state
            .cors_config
            .allowed_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();

        CorsLayer::new()
            .allow_origin(allowed_origins)
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
            .allow_credentials(true)
    };

    // route_layer order: the last layer added runs first, so require_auth
    // answers 401 before require_admin can answer 403.
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(Scalar::with_url("/scalar", ApiDoc::openapi()))
        .route("/health", get(health_check))
        .nest(
            "/api",
            Router::new()
                .nest("/auth", init_auth_router())
                .nest(
                    "/courses",
                    init_courses_router()
                        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth)),
                )
                .nest(
                    "/lessons",
                    init_lessons_router()
                        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth)),
                )
                .nest(
                    "/admin",
                    init_admin_router()
                        .route_layer(middleware::from_fn_with_state(state.clone(), require_admin))
                        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth)),
                ),
        )
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(logging_middleware))
}
