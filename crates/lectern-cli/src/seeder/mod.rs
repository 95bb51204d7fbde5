//! Fake data for development and manual testing.
//!
//! Seeded rows are recognizable so they can be removed later without
//! touching real data: course codes start with [`SEED_CODE_PREFIX`] and
//! student emails end with `@`[`SEED_EMAIL_DOMAIN`]. Every seeded student
//! logs in with [`SEED_PASSWORD`].

pub mod courses;
pub mod models;
pub mod users;

use lectern_core::hash_password;
use sqlx::PgPool;
use std::time::Instant;

pub use models::SeedConfig;

pub const SEED_CODE_PREFIX: &str = "SEED-";
pub const SEED_EMAIL_DOMAIN: &str = "seed.lectern.dev";
pub const SEED_PASSWORD: &str = "password123";

/// Short tag distinguishing one seeding run from another.
fn batch_tag() -> String {
    uuid::Uuid::new_v4().simple().to_string()[..6].to_uppercase()
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct SeedSummary {
    pub courses: usize,
    pub students: usize,
}

pub async fn seed_all(
    db: &PgPool,
    config: SeedConfig,
) -> Result<SeedSummary, Box<dyn std::error::Error>> {
    let start_time = Instant::now();
    let batch = batch_tag();
    println!("🌱 Seeding database (batch {})...", batch);

    let course_ids = courses::seed_courses(
        db,
        config.courses,
        config.modules_per_course,
        config.lessons_per_module,
        &batch,
    )
    .await?;

    let password_hash =
        hash_password(SEED_PASSWORD).map_err(|e| format!("Failed to hash password: {}", e.error))?;
    let student_ids =
        users::seed_students(db, config.students, &course_ids, &batch, &password_hash).await?;

    println!("\n✅ Seeding complete in {:?}", start_time.elapsed());
    println!("   Students log in with password: {}", SEED_PASSWORD);

    Ok(SeedSummary {
        courses: course_ids.len(),
        students: student_ids.len(),
    })
}

/// Hard-deletes every seeded row along with anything attached to it.
///
/// Tokens already issued to seeded students stay signed; the API answers
/// them with 401 once it touches the missing user row.
pub async fn clear_all(db: &PgPool) -> Result<u64, Box<dyn std::error::Error>> {
    let start_time = Instant::now();
    println!("🗑️  Clearing seeded data...");

    let code_pattern = format!("{}%", SEED_CODE_PREFIX);
    let email_pattern = format!("%@{}", SEED_EMAIL_DOMAIN);

    let mut tx = db.begin().await?;

    let enrollments = sqlx::query(
        "DELETE FROM enrollments
         WHERE course_id IN (SELECT id FROM courses WHERE code LIKE $1)
            OR user_id IN (SELECT id FROM users WHERE email LIKE $2)",
    )
    .bind(&code_pattern)
    .bind(&email_pattern)
    .execute(&mut *tx)
    .await?
    .rows_affected();

    let lessons = sqlx::query(
        "DELETE FROM lessons
         WHERE module_id IN (
             SELECT m.id FROM modules m
             JOIN courses c ON c.id = m.course_id
             WHERE c.code LIKE $1
         )",
    )
    .bind(&code_pattern)
    .execute(&mut *tx)
    .await?
    .rows_affected();

    let modules = sqlx::query(
        "DELETE FROM modules WHERE course_id IN (SELECT id FROM courses WHERE code LIKE $1)",
    )
    .bind(&code_pattern)
    .execute(&mut *tx)
    .await?
    .rows_affected();

    let courses = sqlx::query("DELETE FROM courses WHERE code LIKE $1")
        .bind(&code_pattern)
        .execute(&mut *tx)
        .await?
        .rows_affected();

    let users = sqlx::query("DELETE FROM users WHERE email LIKE $1")
        .bind(&email_pattern)
        .execute(&mut *tx)
        .await?
        .rows_affected();

    tx.commit().await?;

    println!(
        "   ✓ Deleted {} courses, {} modules, {} lessons, {} students, {} enrollments in {:?}",
        courses,
        modules,
        lessons,
        users,
        enrollments,
        start_time.elapsed()
    );

    Ok(enrollments + lessons + modules + courses + users)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_tag() {
        let tag = batch_tag();
        assert_eq!(tag.len(), 6);
        assert_eq!(tag, tag.to_uppercase());
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn test_seed_then_clear(pool: PgPool) {
        let config = SeedConfig::new(2)
            .with_modules(2)
            .with_lessons(3)
            .with_students(3);

        let summary = seed_all(&pool, config).await.unwrap();
        assert_eq!(summary, SeedSummary { courses: 2, students: 3 });

        let lessons: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM lessons")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(lessons, 12);

        let enrollments: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM enrollments")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(enrollments, 6);

        sqlx::query("INSERT INTO courses (title, code) VALUES ('Real', 'REAL-1')")
            .execute(&pool)
            .await
            .unwrap();

        clear_all(&pool).await.unwrap();

        let remaining: Vec<String> = sqlx::query_scalar("SELECT code FROM courses")
            .fetch_all(&pool)
            .await
            .unwrap();
        assert_eq!(remaining, vec!["REAL-1".to_string()]);

        let users: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(users, 0);
    }
}
