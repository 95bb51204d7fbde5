//! Student seeding and enrollment.

use fake::Fake;
use fake::faker::name::en::{FirstName, LastName};
use lectern_auth::UserRole;
use lectern_models::ids::{CourseId, UserId};
use rayon::prelude::*;
use sqlx::{PgPool, Postgres, Transaction};
use std::time::Instant;

use super::SEED_EMAIL_DOMAIN;
use super::models::StudentSeed;

// 4 params per user
const BATCH_SIZE: usize = 1000;

fn email_part(s: &str) -> String {
    s.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect::<String>()
        .to_lowercase()
}

pub fn generate_students(count: usize, batch: &str, password_hash: &str) -> Vec<StudentSeed> {
    let batch = batch.to_lowercase();
    (0..count)
        .into_par_iter()
        .map(|i| {
            let first_name: String = FirstName().fake();
            let last_name: String = LastName().fake();
            let email = format!(
                "{}.{}+{}{}@{}",
                email_part(&first_name),
                email_part(&last_name),
                batch,
                i + 1,
                SEED_EMAIL_DOMAIN
            );

            StudentSeed {
                name: format!("{} {}", first_name, last_name),
                email,
                password_hash: password_hash.to_string(),
            }
        })
        .collect()
}

/// Enrollment pairs: each student joins two consecutive courses (one if
/// only one course exists).
pub fn enrollment_pairs(
    student_ids: &[UserId],
    course_ids: &[CourseId],
) -> Vec<(UserId, CourseId)> {
    if course_ids.is_empty() {
        return Vec::new();
    }

    let per_student = course_ids.len().min(2);
    student_ids
        .iter()
        .enumerate()
        .flat_map(|(i, &student_id)| {
            (0..per_student).map(move |offset| {
                (student_id, course_ids[(i + offset) % course_ids.len()])
            })
        })
        .collect()
}

/// Seeds students and enrolls them in `course_ids`.
pub async fn seed_students(
    db: &PgPool,
    count: usize,
    course_ids: &[CourseId],
    batch: &str,
    password_hash: &str,
) -> Result<Vec<UserId>, Box<dyn std::error::Error>> {
    let start_time = Instant::now();
    println!("🎓 Seeding {} students...", count);

    let students = generate_students(count, batch, password_hash);

    let mut tx = db.begin().await?;

    let mut student_ids = Vec::with_capacity(students.len());
    for chunk in students.chunks(BATCH_SIZE) {
        student_ids.extend(insert_students_chunk(&mut tx, chunk).await?);
    }

    let pairs = enrollment_pairs(&student_ids, course_ids);
    for chunk in pairs.chunks(BATCH_SIZE) {
        insert_enrollments_chunk(&mut tx, chunk).await?;
    }

    tx.commit().await?;

    println!(
        "   ✓ Inserted {} students and {} enrollments in {:?}",
        student_ids.len(),
        pairs.len(),
        start_time.elapsed()
    );

    Ok(student_ids)
}

async fn insert_students_chunk(
    tx: &mut Transaction<'_, Postgres>,
    students: &[StudentSeed],
) -> Result<Vec<UserId>, Box<dyn std::error::Error>> {
    if students.is_empty() {
        return Ok(Vec::new());
    }

    let mut query = String::from("INSERT INTO users (name, email, password, role) VALUES ");
    for i in 0..students.len() {
        if i > 0 {
            query.push_str(", ");
        }
        let p = i * 4;
        query.push_str(&format!("(${}, ${}, ${}, ${})", p + 1, p + 2, p + 3, p + 4));
    }
    query.push_str(" RETURNING id");

    let mut q = sqlx::query_scalar(&query);
    for student in students {
        q = q
            .bind(&student.name)
            .bind(&student.email)
            .bind(&student.password_hash)
            .bind(UserRole::Student);
    }

    let ids: Vec<UserId> = q.fetch_all(&mut **tx).await?;
    Ok(ids)
}

async fn insert_enrollments_chunk(
    tx: &mut Transaction<'_, Postgres>,
    pairs: &[(UserId, CourseId)],
) -> Result<u64, Box<dyn std::error::Error>> {
    if pairs.is_empty() {
        return Ok(0);
    }

    let mut query = String::from("INSERT INTO enrollments (user_id, course_id) VALUES ");
    for i in 0..pairs.len() {
        if i > 0 {
            query.push_str(", ");
        }
        query.push_str(&format!("(${}, ${})", i * 2 + 1, i * 2 + 2));
    }
    query.push_str(" ON CONFLICT (user_id, course_id) DO NOTHING");

    let mut q = sqlx::query(&query);
    for (user_id, course_id) in pairs {
        q = q.bind(*user_id).bind(*course_id);
    }

    Ok(q.execute(&mut **tx).await?.rows_affected())
}
