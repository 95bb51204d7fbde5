use sqlx::PgPool;
use tracing::{instrument, warn};

use lectern_config::LessonAccessPolicy;
use lectern_core::AppError;
use lectern_models::ids::LessonId;
use lectern_models::lessons::Lesson;

use crate::middleware::auth::AuthUser;

pub struct LessonService;

impl LessonService {
    /// Fetches a live lesson by id, applying `policy` to the caller.
    ///
    /// Only the lesson's own soft-delete flag is consulted; a lesson whose
    /// course was deleted without a content cascade remains readable.
    ///
    /// # Errors
    ///
    /// * `404` if the lesson does not exist or is soft-deleted
    /// * `403` under [`LessonAccessPolicy::Enrolled`] when a student holds
    ///   no live enrollment in the lesson's course
    /// * `500` on database failures
    #[instrument(
        skip(db, auth_user),
        fields(
            db.operation = "SELECT",
            db.table = "lessons",
            lesson.id = %lesson_id,
            user.id = %auth_user.user_id
        )
    )]
    pub async fn get_lesson(
        db: &PgPool,
        lesson_id: LessonId,
        auth_user: &AuthUser,
        policy: LessonAccessPolicy,
    ) -> Result<Lesson, AppError> {
        let lesson = sqlx::query_as::<_, Lesson>(
            r#"SELECT id, module_id, title, content_type, content_url, text_content,
                      created_at, updated_at
               FROM lessons
               WHERE id = $1 AND NOT deleted"#,
        )
        .bind(lesson_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Lesson not found")))?;

        if policy == LessonAccessPolicy::Enrolled && !auth_user.is_admin() {
            let enrolled = sqlx::query_scalar::<_, bool>(
                r#"SELECT EXISTS(
                       SELECT 1
                       FROM enrollments e
                       JOIN modules m ON m.course_id = e.course_id
                       WHERE m.id = $1 AND e.user_id = $2 AND NOT e.deleted
                   )"#,
            )
            .bind(lesson.module_id)
            .bind(auth_user.user_id)
            .fetch_one(db)
            .await?;

            if !enrolled {
                warn!("Lesson read refused: caller not enrolled");
                return Err(AppError::forbidden(
                    "You must be enrolled in this course to view its lessons",
                ));
            }
        }

        Ok(lesson)
    }
}
