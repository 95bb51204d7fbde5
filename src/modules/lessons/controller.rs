use axum::{
    Json,
    extract::{Path, State, rejection::PathRejection},
};
use tracing::instrument;
use uuid::Uuid;

use lectern_core::AppError;
use lectern_models::ids::LessonId;
use lectern_models::lessons::Lesson;

use super::service::LessonService;
use crate::middleware::auth::AuthUser;
use crate::modules::auth::controller::ErrorResponse;
use crate::state::AppState;
use crate::validator::path_id;

#[utoipa::path(
    get,
    path = "/api/lessons/{id}",
    params(
        ("id" = Uuid, Path, description = "Lesson ID")
    ),
    responses(
        (status = 200, description = "Lesson", body = Lesson),
        (status = 400, description = "Invalid lesson id", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Not enrolled in the course", body = ErrorResponse),
        (status = 404, description = "Lesson not found", body = ErrorResponse)
    ),
    tag = "Lessons",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth_user, path))]
pub async fn get_lesson(
    State(state): State<AppState>,
    auth_user: AuthUser,
    path: Result<Path<LessonId>, PathRejection>,
) -> Result<Json<Lesson>, AppError> {
    let lesson_id = path_id(path, "lesson")?;
    let lesson =
        LessonService::get_lesson(&state.db, lesson_id, &auth_user, state.policy.lesson_access)
            .await?;
    Ok(Json(lesson))
}
