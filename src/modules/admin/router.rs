use axum::{
    Router,
    routing::{delete, post},
};

use crate::state::AppState;

use super::controller::{add_lesson, add_module, create_course, delete_course};

pub fn init_admin_router() -> Router<AppState> {
    Router::new()
        .route("/courses", post(create_course))
        .route("/courses/{id}", delete(delete_course))
        .route("/courses/{id}/modules", post(add_module))
        .route("/modules/{id}/lessons", post(add_lesson))
}
