use sqlx::PgPool;
use tracing::{info, instrument, warn};

use lectern_config::CourseDeletePolicy;
use lectern_core::AppError;
use lectern_models::course_modules::{CreateModuleDto, Module};
use lectern_models::courses::{Course, CreateCourseDto};
use lectern_models::ids::{CourseId, ModuleId};
use lectern_models::lessons::{CreateLessonDto, Lesson};

pub struct AdminService;

impl AdminService {
    /// Creates a course.
    ///
    /// # Errors
    ///
    /// * `400` if a live course already uses `dto.code`
    /// * `500` on database failures
    #[instrument(
        skip(db, dto),
        fields(db.operation = "INSERT", db.table = "courses", course.code = %dto.code)
    )]
    pub async fn create_course(db: &PgPool, dto: CreateCourseDto) -> Result<Course, AppError> {
        let course = sqlx::query_as::<_, Course>(
            r#"INSERT INTO courses (title, code, description)
               VALUES ($1, $2, $3)
               RETURNING id, title, code, description, created_at, updated_at"#,
        )
        .bind(&dto.title)
        .bind(&dto.code)
        .bind(&dto.description)
        .fetch_one(db)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e
                && db_err.is_unique_violation()
            {
                return AppError::bad_request(anyhow::anyhow!("Course code already exists"));
            }
            AppError::from(e)
        })?;

        info!(course.id = %course.id, "Course created");

        Ok(course)
    }

    /// Soft-deletes a live course and, depending on `policy`, its content
    /// and enrollments. All updates commit together.
    ///
    /// # Errors
    ///
    /// * `404` if no live course has `course_id`
    /// * `500` on database failures (nothing is committed)
    #[instrument(
        skip(db),
        fields(db.operation = "UPDATE", db.table = "courses", course.id = %course_id)
    )]
    pub async fn delete_course(
        db: &PgPool,
        course_id: CourseId,
        policy: CourseDeletePolicy,
    ) -> Result<(), AppError> {
        let mut tx = db.begin().await?;

        let result = sqlx::query(
            r#"UPDATE courses
               SET deleted = TRUE, deleted_at = NOW(), updated_at = NOW()
               WHERE id = $1 AND NOT deleted"#,
        )
        .bind(course_id)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Course not found")));
        }

        if policy.cascades_content() {
            let lessons = sqlx::query(
                r#"UPDATE lessons
                   SET deleted = TRUE, deleted_at = NOW(), updated_at = NOW()
                   WHERE NOT deleted
                     AND module_id IN (SELECT id FROM modules WHERE course_id = $1)"#,
            )
            .bind(course_id)
            .execute(&mut *tx)
            .await?;

            let modules = sqlx::query(
                r#"UPDATE modules
                   SET deleted = TRUE, deleted_at = NOW(), updated_at = NOW()
                   WHERE course_id = $1 AND NOT deleted"#,
            )
            .bind(course_id)
            .execute(&mut *tx)
            .await?;

            info!(
                modules = modules.rows_affected(),
                lessons = lessons.rows_affected(),
                "Course content soft-deleted"
            );
        }

        if policy.cascades_enrollments() {
            let enrollments = sqlx::query(
                r#"UPDATE enrollments
                   SET deleted = TRUE, deleted_at = NOW(), updated_at = NOW()
                   WHERE course_id = $1 AND NOT deleted"#,
            )
            .bind(course_id)
            .execute(&mut *tx)
            .await?;

            info!(
                enrollments = enrollments.rows_affected(),
                "Course enrollments soft-deleted"
            );
        }

        tx.commit().await?;

        info!(policy = %policy, "Course deleted");

        Ok(())
    }

    /// Appends a module to a course. Unknown course ids are caught by the
    /// foreign key; the parent's soft-delete flag is not checked.
    ///
    /// # Errors
    ///
    /// * `404` if no course row has `course_id`
    /// * `500` on database failures
    #[instrument(
        skip(db, dto),
        fields(db.operation = "INSERT", db.table = "modules", course.id = %course_id)
    )]
    pub async fn add_module(
        db: &PgPool,
        course_id: CourseId,
        dto: CreateModuleDto,
    ) -> Result<Module, AppError> {
        let module = sqlx::query_as::<_, Module>(
            r#"INSERT INTO modules (course_id, title, description)
               VALUES ($1, $2, $3)
               RETURNING id, course_id, title, description, created_at, updated_at"#,
        )
        .bind(course_id)
        .bind(&dto.title)
        .bind(&dto.description)
        .fetch_one(db)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e
                && db_err.is_foreign_key_violation()
            {
                warn!("Module added to unknown course");
                return AppError::not_found(anyhow::anyhow!("Course not found"));
            }
            AppError::from(e)
        })?;

        info!(module.id = %module.id, "Module created");

        Ok(module)
    }

    /// Appends a lesson to a module, with the same foreign-key check as
    /// [`AdminService::add_module`].
    ///
    /// # Errors
    ///
    /// * `404` if no module row has `module_id`
    /// * `500` on database failures
    #[instrument(
        skip(db, dto),
        fields(db.operation = "INSERT", db.table = "lessons", module.id = %module_id)
    )]
    pub async fn add_lesson(
        db: &PgPool,
        module_id: ModuleId,
        dto: CreateLessonDto,
    ) -> Result<Lesson, AppError> {
        let lesson = sqlx::query_as::<_, Lesson>(
            r#"INSERT INTO lessons (module_id, title, content_type, content_url, text_content)
               VALUES ($1, $2, $3, $4, $5)
               RETURNING id, module_id, title, content_type, content_url, text_content,
                         created_at, updated_at"#,
        )
        .bind(module_id)
        .bind(&dto.title)
        .bind(&dto.content_type)
        .bind(&dto.content_url)
        .bind(&dto.text_content)
        .fetch_one(db)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e
                && db_err.is_foreign_key_violation()
            {
                warn!("Lesson added to unknown module");
                return AppError::not_found(anyhow::anyhow!("Module not found"));
            }
            AppError::from(e)
        })?;

        info!(lesson.id = %lesson.id, "Lesson created");

        Ok(lesson)
    }
}
