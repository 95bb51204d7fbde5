use axum::{
    Json,
    extract::{Path, State, rejection::PathRejection},
};
use tracing::instrument;
use uuid::Uuid;

use lectern_core::AppError;
use lectern_models::auth::MessageResponse;
use lectern_models::course_modules::{CreateModuleDto, Module};
use lectern_models::courses::{Course, CreateCourseDto};
use lectern_models::ids::{CourseId, ModuleId};
use lectern_models::lessons::{CreateLessonDto, Lesson};

use super::service::AdminService;
use crate::modules::auth::controller::ErrorResponse;
use crate::state::AppState;
use crate::validator::{ValidatedJson, path_id};

#[utoipa::path(
    post,
    path = "/api/admin/courses",
    request_body = CreateCourseDto,
    responses(
        (status = 200, description = "Course created", body = Course),
        (status = 400, description = "Invalid input or duplicate code", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Admin access required", body = ErrorResponse)
    ),
    tag = "Admin",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, dto))]
pub async fn create_course(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateCourseDto>,
) -> Result<Json<Course>, AppError> {
    let course = AdminService::create_course(&state.db, dto).await?;
    Ok(Json(course))
}

#[utoipa::path(
    delete,
    path = "/api/admin/courses/{id}",
    params(
        ("id" = Uuid, Path, description = "Course ID")
    ),
    responses(
        (status = 200, description = "Course deleted", body = MessageResponse),
        (status = 400, description = "Invalid course id", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Admin access required", body = ErrorResponse),
        (status = 404, description = "Course not found", body = ErrorResponse)
    ),
    tag = "Admin",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, path))]
pub async fn delete_course(
    State(state): State<AppState>,
    path: Result<Path<CourseId>, PathRejection>,
) -> Result<Json<MessageResponse>, AppError> {
    let course_id = path_id(path, "course")?;
    AdminService::delete_course(&state.db, course_id, state.policy.course_delete).await?;
    Ok(Json(MessageResponse::new("Course deleted")))
}

#[utoipa::path(
    post,
    path = "/api/admin/courses/{id}/modules",
    params(
        ("id" = Uuid, Path, description = "Course ID")
    ),
    request_body = CreateModuleDto,
    responses(
        (status = 200, description = "Module created", body = Module),
        (status = 400, description = "Invalid input or course id", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Admin access required", body = ErrorResponse),
        (status = 404, description = "Course not found", body = ErrorResponse)
    ),
    tag = "Admin",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, path, dto))]
pub async fn add_module(
    State(state): State<AppState>,
    path: Result<Path<CourseId>, PathRejection>,
    ValidatedJson(dto): ValidatedJson<CreateModuleDto>,
) -> Result<Json<Module>, AppError> {
    let course_id = path_id(path, "course")?;
    let module = AdminService::add_module(&state.db, course_id, dto).await?;
    Ok(Json(module))
}

#[utoipa::path(
    post,
    path = "/api/admin/modules/{id}/lessons",
    params(
        ("id" = Uuid, Path, description = "Module ID")
    ),
    request_body = CreateLessonDto,
    responses(
        (status = 200, description = "Lesson created", body = Lesson),
        (status = 400, description = "Invalid input or module id", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Admin access required", body = ErrorResponse),
        (status = 404, description = "Module not found", body = ErrorResponse)
    ),
    tag = "Admin",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, path, dto))]
pub async fn add_lesson(
    State(state): State<AppState>,
    path: Result<Path<ModuleId>, PathRejection>,
    ValidatedJson(dto): ValidatedJson<CreateLessonDto>,
) -> Result<Json<Lesson>, AppError> {
    let module_id = path_id(path, "module")?;
    let lesson = AdminService::add_lesson(&state.db, module_id, dto).await?;
    Ok(Json(lesson))
}
