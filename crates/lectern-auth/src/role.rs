//! User roles.
//!
//! Roles form a closed set checked at every boundary: the database column is
//! the Postgres enum `user_role`, tokens carry the lowercase name, and
//! anything else is rejected when a token is decoded.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema,
)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    #[default]
    Student,
}

impl UserRole {
    /// Resolves the role a registrant asked for.
    ///
    /// Only an exact `"admin"` grants admin; every other value, including a
    /// missing one, yields [`UserRole::Student`].
    pub fn from_requested(requested: Option<&str>) -> Self {
        match requested {
            Some("admin") => UserRole::Admin,
            _ => UserRole::Student,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => "admin",
            UserRole::Student => "student",
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, UserRole::Admin)
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(UserRole::Admin),
            "student" => Ok(UserRole::Student),
            other => Err(format!("Invalid role: {}", other)),
        }
    }
}
