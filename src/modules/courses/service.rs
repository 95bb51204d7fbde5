use std::collections::HashMap;

use sqlx::PgPool;
use tracing::{debug, info, instrument, warn};

use lectern_core::AppError;
use lectern_models::course_modules::Module;
use lectern_models::courses::{Course, CourseDetail, ModuleWithLessons};
use lectern_models::enrollments::Enrollment;
use lectern_models::ids::{CourseId, ModuleId, UserId};
use lectern_models::lessons::Lesson;

/// Result of an enrollment request.
#[derive(Debug, Clone)]
pub enum EnrollOutcome {
    /// A new enrollment row was created.
    Enrolled(Enrollment),
    AlreadyEnrolled,
}

impl EnrollOutcome {
    pub fn message(&self) -> &'static str {
        match self {
            EnrollOutcome::Enrolled(_) => "Enrolled successfully",
            EnrollOutcome::AlreadyEnrolled => "Already enrolled",
        }
    }
}

const USER_FK: &str = "enrollments_user_id_fkey";

pub struct CourseService;

impl CourseService {
    /// All live courses, oldest first.
    ///
    /// # Errors
    ///
    /// Returns a `500` on database failures.
    #[instrument(skip(db), fields(db.operation = "SELECT", db.table = "courses"))]
    pub async fn list_courses(db: &PgPool) -> Result<Vec<Course>, AppError> {
        let courses = sqlx::query_as::<_, Course>(
            r#"SELECT id, title, code, description, created_at, updated_at
               FROM courses
               WHERE NOT deleted
               ORDER BY created_at, id"#,
        )
        .fetch_all(db)
        .await?;

        debug!(count = courses.len(), "Courses listed");

        Ok(courses)
    }

    /// # Errors
    ///
    /// * `404` if the course does not exist or is soft-deleted
    /// * `500` on database failures
    pub async fn find_live_course(db: &PgPool, course_id: CourseId) -> Result<Course, AppError> {
        sqlx::query_as::<_, Course>(
            r#"SELECT id, title, code, description, created_at, updated_at
               FROM courses
               WHERE id = $1 AND NOT deleted"#,
        )
        .bind(course_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Course not found")))
    }

    /// Loads a live course with its live modules and their live lessons,
    /// plus whether `user_id` is enrolled.
    ///
    /// # Errors
    ///
    /// * `404` if the course does not exist or is soft-deleted
    /// * `500` on database failures
    #[instrument(
        skip(db),
        fields(db.operation = "SELECT", db.table = "courses", course.id = %course_id)
    )]
    pub async fn get_course_detail(
        db: &PgPool,
        course_id: CourseId,
        user_id: UserId,
    ) -> Result<CourseDetail, AppError> {
        let course = Self::find_live_course(db, course_id).await?;

        let modules = sqlx::query_as::<_, Module>(
            r#"SELECT id, course_id, title, description, created_at, updated_at
               FROM modules
               WHERE course_id = $1 AND NOT deleted
               ORDER BY created_at, id"#,
        )
        .bind(course_id)
        .fetch_all(db)
        .await?;

        let module_ids: Vec<ModuleId> = modules.iter().map(|m| m.id).collect();

        let lessons = if module_ids.is_empty() {
            Vec::new()
        } else {
            sqlx::query_as::<_, Lesson>(
                r#"SELECT id, module_id, title, content_type, content_url, text_content,
                          created_at, updated_at
                   FROM lessons
                   WHERE module_id = ANY($1) AND NOT deleted
                   ORDER BY created_at, id"#,
            )
            .bind(&module_ids)
            .fetch_all(db)
            .await?
        };

        let mut lessons_by_module: HashMap<ModuleId, Vec<Lesson>> = HashMap::new();
        for lesson in lessons {
            lessons_by_module
                .entry(lesson.module_id)
                .or_default()
                .push(lesson);
        }

        let modules = modules
            .into_iter()
            .map(|module| {
                let lessons = lessons_by_module.remove(&module.id).unwrap_or_default();
                ModuleWithLessons { module, lessons }
            })
            .collect();

        let is_enrolled = Self::is_enrolled(db, user_id, course_id).await?;

        Ok(CourseDetail {
            course,
            modules,
            is_enrolled,
        })
    }

    /// Whether `user_id` holds a live enrollment in `course_id`.
    ///
    /// # Errors
    ///
    /// Returns a `500` on database failures.
    pub async fn is_enrolled(
        db: &PgPool,
        user_id: UserId,
        course_id: CourseId,
    ) -> Result<bool, AppError> {
        let enrolled = sqlx::query_scalar::<_, bool>(
            r#"SELECT EXISTS(
                   SELECT 1 FROM enrollments
                   WHERE user_id = $1 AND course_id = $2 AND NOT deleted
               )"#,
        )
        .bind(user_id)
        .bind(course_id)
        .fetch_one(db)
        .await?;

        Ok(enrolled)
    }

    /// Enrolls `user_id` in a live course.
    ///
    /// Repeating the call is a no-op: the `(user_id, course_id)` constraint
    /// settles concurrent requests and the conflicting insert returns no row.
    ///
    /// # Errors
    ///
    /// * `404` if the course does not exist or is soft-deleted
    /// * `401` if the caller's account no longer exists
    /// * `500` on database failures
    #[instrument(
        skip(db),
        fields(
            db.operation = "INSERT",
            db.table = "enrollments",
            course.id = %course_id,
            user.id = %user_id
        )
    )]
    pub async fn enroll(
        db: &PgPool,
        course_id: CourseId,
        user_id: UserId,
    ) -> Result<EnrollOutcome, AppError> {
        Self::find_live_course(db, course_id).await?;

        let enrollment = sqlx::query_as::<_, Enrollment>(
            r#"INSERT INTO enrollments (user_id, course_id)
               VALUES ($1, $2)
               ON CONFLICT (user_id, course_id) DO NOTHING
               RETURNING id, user_id, course_id, created_at, updated_at"#,
        )
        .bind(user_id)
        .bind(course_id)
        .fetch_optional(db)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e
                && db_err.is_foreign_key_violation()
            {
                if db_err.constraint() == Some(USER_FK) {
                    warn!("Enrollment for a user that no longer exists");
                    return AppError::unauthorized("User no longer exists");
                }
                return AppError::not_found(anyhow::anyhow!("Course not found"));
            }
            AppError::from(e)
        })?;

        let outcome = match enrollment {
            Some(enrollment) => {
                info!(enrollment.id = %enrollment.id, "Enrollment created");
                EnrollOutcome::Enrolled(enrollment)
            }
            None => {
                debug!("Already enrolled");
                EnrollOutcome::AlreadyEnrolled
            }
        };

        Ok(outcome)
    }
}
