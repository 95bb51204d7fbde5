//! Enrollment join entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::ids::{CourseId, EnrollmentId, UserId};

/// Links a user to a course. At most one row exists per (user, course).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Enrollment {
    pub id: EnrollmentId,
    pub user_id: UserId,
    pub course_id: CourseId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
