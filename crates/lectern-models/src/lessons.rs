//! Lessons: the content units inside a module.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::ids::{LessonId, ModuleId};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Lesson {
    pub id: LessonId,
    pub module_id: ModuleId,
    pub title: String,
    pub content_type: String,
    #[serde(rename = "contentURL")]
    pub content_url: String,
    pub text_content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Body of `POST /api/admin/modules/{id}/lessons`.
///
/// `contentType` is free text (e.g. `video`, `pdf`, `text`); the URL and the
/// inline text are both optional.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateLessonDto {
    #[validate(length(min = 1, max = 255))]
    #[schema(example = "Borrowing basics")]
    pub title: String,
    #[validate(length(max = 50))]
    #[serde(default)]
    #[schema(example = "video")]
    pub content_type: String,
    #[serde(rename = "contentURL", default)]
    pub content_url: String,
    #[serde(default)]
    pub text_content: String,
}
