//! Course, module and lesson seeding.

use fake::Fake;
use fake::faker::lorem::en::{Paragraph, Sentence, Words};
use lectern_models::ids::{CourseId, LessonId, ModuleId};
use rayon::prelude::*;
use sqlx::{PgPool, Postgres, Transaction};
use std::time::Instant;

use super::SEED_CODE_PREFIX;
use super::models::{CourseSeed, LessonSeed, ModuleSeed};

const CONTENT_TYPES: [&str; 3] = ["video", "pdf", "text"];

// Postgres caps a statement at 65535 bind parameters.
const BATCH_SIZE: usize = 1000;

fn title_case(words: Vec<String>) -> String {
    words
        .iter()
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// Course templates; `batch` keeps codes unique across repeated runs.
pub fn generate_courses(count: usize, batch: &str) -> Vec<CourseSeed> {
    (0..count)
        .into_par_iter()
        .map(|i| CourseSeed {
            title: title_case(Words(2..5).fake()),
            code: format!("{}{}-{:03}", SEED_CODE_PREFIX, batch, i + 1),
            description: Sentence(6..12).fake(),
        })
        .collect()
}

pub fn generate_modules(course_ids: &[CourseId], modules_per_course: usize) -> Vec<ModuleSeed> {
    course_ids
        .par_iter()
        .flat_map(|&course_id| {
            (0..modules_per_course)
                .map(|i| ModuleSeed {
                    course_id,
                    title: format!("Module {}: {}", i + 1, title_case(Words(1..4).fake())),
                    description: Sentence(4..10).fake(),
                })
                .collect::<Vec<_>>()
        })
        .collect()
}

pub fn generate_lessons(module_ids: &[ModuleId], lessons_per_module: usize) -> Vec<LessonSeed> {
    module_ids
        .par_iter()
        .flat_map(|&module_id| {
            (0..lessons_per_module)
                .map(|i| {
                    let content_type = CONTENT_TYPES[i % CONTENT_TYPES.len()];
                    let content_url = match content_type {
                        "video" => format!("https://media.example.com/{}/{}.mp4", module_id, i + 1),
                        "pdf" => format!("https://media.example.com/{}/{}.pdf", module_id, i + 1),
                        _ => String::new(),
                    };
                    LessonSeed {
                        module_id,
                        title: title_case(Words(2..6).fake()),
                        content_type: content_type.to_string(),
                        content_url,
                        text_content: Paragraph(2..4).fake(),
                    }
                })
                .collect::<Vec<_>>()
        })
        .collect()
}

/// Seeds courses with their modules and lessons, returning the course ids.
pub async fn seed_courses(
    db: &PgPool,
    count: usize,
    modules_per_course: usize,
    lessons_per_module: usize,
    batch: &str,
) -> Result<Vec<CourseId>, Box<dyn std::error::Error>> {
    let start_time = Instant::now();
    println!(
        "📚 Seeding {} courses ({} modules each, {} lessons per module)...",
        count, modules_per_course, lessons_per_module
    );

    let mut tx = db.begin().await?;

    let courses = generate_courses(count, batch);
    let mut course_ids = Vec::with_capacity(courses.len());
    for chunk in courses.chunks(BATCH_SIZE) {
        course_ids.extend(insert_courses_chunk(&mut tx, chunk).await?);
    }

    let modules = generate_modules(&course_ids, modules_per_course);
    let mut module_ids = Vec::with_capacity(modules.len());
    for chunk in modules.chunks(BATCH_SIZE) {
        module_ids.extend(insert_modules_chunk(&mut tx, chunk).await?);
    }

    let lessons = generate_lessons(&module_ids, lessons_per_module);
    let mut lesson_count = 0;
    for chunk in lessons.chunks(BATCH_SIZE) {
        lesson_count += insert_lessons_chunk(&mut tx, chunk).await?.len();
    }

    tx.commit().await?;

    println!(
        "   ✓ Inserted {} courses, {} modules, {} lessons in {:?}",
        course_ids.len(),
        module_ids.len(),
        lesson_count,
        start_time.elapsed()
    );

    Ok(course_ids)
}

fn values_clause(rows: usize, columns: usize) -> String {
    (0..rows)
        .map(|row| {
            let params: Vec<String> = (1..=columns)
                .map(|col| format!("${}", row * columns + col))
                .collect();
            format!("({})", params.join(", "))
        })
        .collect::<Vec<_>>()
        .join(", ")
}

async fn insert_courses_chunk(
    tx: &mut Transaction<'_, Postgres>,
    courses: &[CourseSeed],
) -> Result<Vec<CourseId>, Box<dyn std::error::Error>> {
    if courses.is_empty() {
        return Ok(Vec::new());
    }

    let query = format!(
        "INSERT INTO courses (title, code, description) VALUES {} RETURNING id",
        values_clause(courses.len(), 3)
    );

    let mut q = sqlx::query_scalar(&query);
    for course in courses {
        q = q
            .bind(&course.title)
            .bind(&course.code)
            .bind(&course.description);
    }

    let ids: Vec<CourseId> = q.fetch_all(&mut **tx).await?;
    Ok(ids)
}

async fn insert_modules_chunk(
    tx: &mut Transaction<'_, Postgres>,
    modules: &[ModuleSeed],
) -> Result<Vec<ModuleId>, Box<dyn std::error::Error>> {
    if modules.is_empty() {
        return Ok(Vec::new());
    }

    let query = format!(
        "INSERT INTO modules (course_id, title, description) VALUES {} RETURNING id",
        values_clause(modules.len(), 3)
    );

    let mut q = sqlx::query_scalar(&query);
    for module in modules {
        q = q
            .bind(module.course_id)
            .bind(&module.title)
            .bind(&module.description);
    }

    let ids: Vec<ModuleId> = q.fetch_all(&mut **tx).await?;
    Ok(ids)
}

async fn insert_lessons_chunk(
    tx: &mut Transaction<'_, Postgres>,
    lessons: &[LessonSeed],
) -> Result<Vec<LessonId>, Box<dyn std::error::Error>> {
    if lessons.is_empty() {
        return Ok(Vec::new());
    }

    let query = format!(
        "INSERT INTO lessons (module_id, title, content_type, content_url, text_content)
         VALUES {} RETURNING id",
        values_clause(lessons.len(), 5)
    );

    let mut q = sqlx::query_scalar(&query);
    for lesson in lessons {
        q = q
            .bind(lesson.module_id)
            .bind(&lesson.title)
            .bind(&lesson.content_type)
            .bind(&lesson.content_url)
            .bind(&lesson.text_content);
    }

    let ids: Vec<LessonId> = q.fetch_all(&mut **tx).await?;
    Ok(ids)
}
