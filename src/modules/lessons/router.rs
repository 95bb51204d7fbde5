use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::get_lesson;

pub fn init_lessons_router() -> Router<AppState> {
    Router::new().route("/{id}", get(get_lesson))
}
