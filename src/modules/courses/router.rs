use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

use super::controller::{enroll_in_course, get_course, list_courses};

pub fn init_courses_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_courses))
        .route("/{id}", get(get_course))
        .route("/{id}/enroll", post(enroll_in_course))
}
