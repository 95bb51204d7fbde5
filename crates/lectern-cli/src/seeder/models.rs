//! Row templates and sizing for seeding runs.

use lectern_models::ids::{CourseId, ModuleId};

pub struct CourseSeed {
    pub title: String,
    pub code: String,
    pub description: String,
}

pub struct ModuleSeed {
    pub course_id: CourseId,
    pub title: String,
    pub description: String,
}

pub struct LessonSeed {
    pub module_id: ModuleId,
    pub title: String,
    pub content_type: String,
    pub content_url: String,
    pub text_content: String,
}

pub struct StudentSeed {
    pub name: String,
    pub email: String,
    pub password_hash: String,
}

/// How much fake data a `seed` run creates.
#[derive(Clone, Debug)]
pub struct SeedConfig {
    pub courses: usize,
    pub modules_per_course: usize,
    pub lessons_per_module: usize,
    pub students: usize,
}

impl SeedConfig {
    pub fn new(courses: usize) -> Self {
        Self {
            courses,
            ..Self::default()
        }
    }

    pub fn with_modules(mut self, modules_per_course: usize) -> Self {
        self.modules_per_course = modules_per_course;
        self
    }

    pub fn with_lessons(mut self, lessons_per_module: usize) -> Self {
        self.lessons_per_module = lessons_per_module;
        self
    }

    pub fn with_students(mut self, students: usize) -> Self {
        self.students = students;
        self
    }
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            courses: 5,
            modules_per_course: 4,
            lessons_per_module: 5,
            students: 20,
        }
    }
}
