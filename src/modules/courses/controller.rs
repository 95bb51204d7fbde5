use axum::{
    Json,
    extract::{Path, State, rejection::PathRejection},
};
use tracing::instrument;
use uuid::Uuid;

use lectern_core::AppError;
use lectern_models::auth::MessageResponse;
use lectern_models::courses::{Course, CourseDetail};
use lectern_models::ids::CourseId;

use super::service::CourseService;
use crate::middleware::auth::AuthUser;
use crate::modules::auth::controller::ErrorResponse;
use crate::state::AppState;
use crate::validator::path_id;

#[utoipa::path(
    get,
    path = "/api/courses",
    responses(
        (status = 200, description = "All live courses", body = Vec<Course>),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    tag = "Courses",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _auth_user))]
pub async fn list_courses(
    State(state): State<AppState>,
    _auth_user: AuthUser,
) -> Result<Json<Vec<Course>>, AppError> {
    let courses = CourseService::list_courses(&state.db).await?;
    Ok(Json(courses))
}

#[utoipa::path(
    get,
    path = "/api/courses/{id}",
    params(
        ("id" = Uuid, Path, description = "Course ID")
    ),
    responses(
        (status = 200, description = "Course with content and enrollment", body = CourseDetail),
        (status = 400, description = "Invalid course id", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Course not found", body = ErrorResponse)
    ),
    tag = "Courses",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth_user, path))]
pub async fn get_course(
    State(state): State<AppState>,
    auth_user: AuthUser,
    path: Result<Path<CourseId>, PathRejection>,
) -> Result<Json<CourseDetail>, AppError> {
    let course_id = path_id(path, "course")?;
    let detail = CourseService::get_course_detail(&state.db, course_id, auth_user.user_id).await?;
    Ok(Json(detail))
}

#[utoipa::path(
    post,
    path = "/api/courses/{id}/enroll",
    params(
        ("id" = Uuid, Path, description = "Course ID")
    ),
    responses(
        (status = 200, description = "Enrolled, or already enrolled", body = MessageResponse),
        (status = 400, description = "Invalid course id", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Course not found", body = ErrorResponse)
    ),
    tag = "Courses",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth_user, path))]
pub async fn enroll_in_course(
    State(state): State<AppState>,
    auth_user: AuthUser,
    path: Result<Path<CourseId>, PathRejection>,
) -> Result<Json<MessageResponse>, AppError> {
    let course_id = path_id(path, "course")?;
    let outcome = CourseService::enroll(&state.db, course_id, auth_user.user_id).await?;
    Ok(Json(MessageResponse::new(outcome.message())))
}
