//! # Lectern Models
//!
//! Database entities and request/response DTOs shared by the HTTP layer,
//! the services and the CLI.
//!
//! # Modules
//!
//! - [`ids`]: typed UUID newtypes, one per entity
//! - [`users`]: users and their public projection
//! - [`auth`]: register/login payloads
//! - [`courses`]: courses and the nested course detail view
//! - [`course_modules`]: modules belonging to a course
//! - [`lessons`]: lessons belonging to a module
//! - [`enrollments`]: user/course enrollments

pub mod auth;
pub mod course_modules;
pub mod courses;
pub mod enrollments;
pub mod ids;
pub mod lessons;
pub mod users;

pub use lectern_auth::{Claims, UserRole};

pub use auth::{LoginRequest, LoginResponse, MessageResponse, RegisterRequest, RegisterResponse};
pub use course_modules::{CreateModuleDto, Module};
pub use courses::{Course, CourseDetail, CreateCourseDto, ModuleWithLessons};
pub use enrollments::Enrollment;
pub use ids::{CourseId, EnrollmentId, LessonId, ModuleId, UserId};
pub use lessons::{CreateLessonDto, Lesson};
pub use users::{User, UserInfo};
