//! Authorization and lifecycle policies.
//!
//! Two behaviors are chosen per deployment:
//!
//! - what happens to a course's children when the course is deleted
//!   ([`CourseDeletePolicy`], env `COURSE_DELETE_CASCADE`)
//! - whether reading a lesson requires enrollment in its course
//!   ([`LessonAccessPolicy`], env `LESSON_ACCESS`)
//!
//! Unrecognized values fall back to the default and log a warning.

use std::env;
use std::fmt;
use std::str::FromStr;

use tracing::warn;

/// Children soft-deleted together with a course.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CourseDeletePolicy {
    /// Only the course row is hidden.
    #[default]
    CourseOnly,
    /// Modules and their lessons are hidden with the course.
    CascadeContent,
    /// Content and enrollments are hidden with the course.
    CascadeAll,
}

impl CourseDeletePolicy {
    pub fn cascades_content(self) -> bool {
        matches!(self, Self::CascadeContent | Self::CascadeAll)
    }

    pub fn cascades_enrollments(self) -> bool {
        matches!(self, Self::CascadeAll)
    }
}

impl FromStr for CourseDeletePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "none" | "course" => Ok(Self::CourseOnly),
            "content" => Ok(Self::CascadeContent),
            "all" => Ok(Self::CascadeAll),
            other => Err(format!("Unknown course delete policy: {}", other)),
        }
    }
}

impl fmt::Display for CourseDeletePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::CourseOnly => "none",
            Self::CascadeContent => "content",
            Self::CascadeAll => "all",
        };
        f.write_str(s)
    }
}

/// Who may read a lesson.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LessonAccessPolicy {
    /// Any holder of a valid token.
    #[default]
    Authenticated,
    /// Admins, and students enrolled in the lesson's course.
    Enrolled,
}

impl FromStr for LessonAccessPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "authenticated" | "any" => Ok(Self::Authenticated),
            "enrolled" => Ok(Self::Enrolled),
            other => Err(format!("Unknown lesson access policy: {}", other)),
        }
    }
}

impl fmt::Display for LessonAccessPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Authenticated => "authenticated",
            Self::Enrolled => "enrolled",
        };
        f.write_str(s)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PolicyConfig {
    pub course_delete: CourseDeletePolicy,
    pub lesson_access: LessonAccessPolicy,
}

impl PolicyConfig {
    pub fn from_env() -> Self {
        Self {
            course_delete: parse_or_default("COURSE_DELETE_CASCADE"),
            lesson_access: parse_or_default("LESSON_ACCESS"),
        }
    }
}

fn parse_or_default<T>(key: &str) -> T
where
    T: FromStr<Err = String> + Default,
{
    match env::var(key) {
        Ok(raw) => raw.parse().unwrap_or_else(|e| {
            warn!(env.key = key, error = %e, "Falling back to default policy");
            T::default()
        }),
        Err(_) => T::default(),
    }
}
