use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use lectern_models::auth::{
    LoginRequest, LoginResponse, MessageResponse, RegisterRequest, RegisterResponse,
};
use lectern_models::course_modules::{CreateModuleDto, Module};
use lectern_models::courses::{Course, CourseDetail, CreateCourseDto, ModuleWithLessons};
use lectern_models::lessons::{CreateLessonDto, Lesson};
use lectern_models::users::UserInfo;
use lectern_models::{Claims, UserRole};

use crate::modules::auth::controller::ErrorResponse;
use crate::modules::health::controller::HealthResponse;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::health::controller::health_check,
        crate::modules::auth::controller::register_user,
        crate::modules::auth::controller::login_user,
        crate::modules::courses::controller::list_courses,
        crate::modules::courses::controller::get_course,
        crate::modules::courses::controller::enroll_in_course,
        crate::modules::lessons::controller::get_lesson,
        crate::modules::admin::controller::create_course,
        crate::modules::admin::controller::delete_course,
        crate::modules::admin::controller::add_module,
        crate::modules::admin::controller::add_lesson,
    ),
    components(
        schemas(
            UserRole,
            UserInfo,
            Claims,
            RegisterRequest,
            RegisterResponse,
            LoginRequest,
            LoginResponse,
            MessageResponse,
            ErrorResponse,
            HealthResponse,
            Course,
            CourseDetail,
            CreateCourseDto,
            Module,
            ModuleWithLessons,
            CreateModuleDto,
            Lesson,
            CreateLessonDto,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Liveness probe"),
        (name = "Authentication", description = "Registration and login"),
        (name = "Courses", description = "Course browsing and enrollment"),
        (name = "Lessons", description = "Lesson content"),
        (name = "Admin", description = "Course, module and lesson authoring")
    ),
    info(
        title = "Lectern API",
        version = "0.1.0",
        description = "Learning-management REST API built with Rust, Axum and PostgreSQL.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
