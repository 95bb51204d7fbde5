//! Strongly-typed ID newtypes for domain entities.
//!
//! Each entity gets its own wrapper around `Uuid` so a `ModuleId` can never
//! be passed where a `CourseId` is expected. The wrappers are transparent on
//! the wire (a plain UUID string) and in Postgres (a `UUID` column).
//!
//! ```ignore
//! use lectern_models::ids::{CourseId, ModuleId};
//!
//! fn load_course(id: CourseId) { /* ... */ }
//!
//! let module_id = ModuleId::new();
//! // load_course(module_id); // does not compile
//! ```

use serde::{Deserialize, Serialize};
use sqlx::{
    Database, Decode, Encode, Type,
    postgres::{PgHasArrayType, PgTypeInfo},
};
use std::fmt;
use utoipa::ToSchema;
use uuid::Uuid;

macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, ToSchema)]
        #[schema(value_type = String, format = "uuid")]
        pub struct $name(pub Uuid);

        impl $name {
            /// Random v4 ID.
            #[inline]
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            #[inline]
            pub const fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            #[inline]
            pub const fn into_inner(self) -> Uuid {
                self.0
            }

            #[inline]
            pub const fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<Uuid> for $name {
            #[inline]
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl From<$name> for Uuid {
            #[inline]
            fn from(id: $name) -> Uuid {
                id.0
            }
        }

        impl std::str::FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Uuid::parse_str(s).map(Self)
            }
        }

        impl Type<sqlx::Postgres> for $name {
            fn type_info() -> PgTypeInfo {
                <Uuid as Type<sqlx::Postgres>>::type_info()
            }

            fn compatible(ty: &PgTypeInfo) -> bool {
                <Uuid as Type<sqlx::Postgres>>::compatible(ty)
            }
        }

        impl<'q> Encode<'q, sqlx::Postgres> for $name {
            fn encode_by_ref(
                &self,
                buf: &mut <sqlx::Postgres as Database>::ArgumentBuffer<'q>,
            ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
                <Uuid as Encode<'q, sqlx::Postgres>>::encode_by_ref(&self.0, buf)
            }
        }

        impl<'r> Decode<'r, sqlx::Postgres> for $name {
            fn decode(
                value: <sqlx::Postgres as Database>::ValueRef<'r>,
            ) -> Result<Self, sqlx::error::BoxDynError> {
                <Uuid as Decode<'r, sqlx::Postgres>>::decode(value).map(Self)
            }
        }

        // Needed for `= ANY($1)` lookups when nesting lessons under modules.
        impl PgHasArrayType for $name {
            fn array_type_info() -> PgTypeInfo {
                <Uuid as PgHasArrayType>::array_type_info()
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                Uuid::deserialize(deserializer).map(Self)
            }
        }
    };
}

define_id!(
    /// ID of a registered user.
    UserId
);

define_id!(
    /// ID of a course.
    CourseId
);

define_id!(
    /// ID of a module inside a course.
    ModuleId
);

define_id!(
    /// ID of a lesson inside a module.
    LessonId
);

define_id!(
    /// ID of a user/course enrollment.
    EnrollmentId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_ids_are_distinct() {
        assert_ne!(CourseId::new(), CourseId::new());
    }

    #[test]
    fn test_from_uuid_into_inner() {
        let uuid = Uuid::new_v4();
        let id = LessonId::from_uuid(uuid);
        assert_eq!(id.into_inner(), uuid);
        assert_eq!(id.as_uuid(), &uuid);
    }

    #[test]
    fn test_debug_names_the_entity() {
        let id = ModuleId::from_uuid(Uuid::from_u128(0x12345678_1234_1234_1234_123456789abc));
        let debug = format!("{:?}", id);
        assert_eq!(debug, "ModuleId(12345678-1234-1234-1234-123456789abc)");
    }

    #[test]
    fn test_display_is_bare_uuid() {
        let id = CourseId::from_uuid(Uuid::from_u128(0x12345678_1234_1234_1234_123456789abc));
        assert_eq!(id.to_string(), "12345678-1234-1234-1234-123456789abc");
    }

    #[test]
    fn test_parse() {
        let id: UserId = "12345678-1234-1234-1234-123456789abc".parse().unwrap();
        assert_eq!(
            id.into_inner(),
            Uuid::from_u128(0x12345678_1234_1234_1234_123456789abc)
        );
        assert!("not-a-uuid".parse::<UserId>().is_err());
        assert!("42".parse::<CourseId>().is_err());
    }

    #[test]
    fn test_serde_transparent() {
        let id = EnrollmentId::from_uuid(Uuid::from_u128(0x12345678_1234_1234_1234_123456789abc));
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, r#""12345678-1234-1234-1234-123456789abc""#);

        let back: EnrollmentId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
