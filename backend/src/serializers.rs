//! Wire representations of domain rows.

use serde::Serialize;

use crate::models::{Course, Lesson};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InstructorSummary {
    pub id: i64,
    pub username: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LessonSummary {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub duration: Option<i64>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Lesson> for LessonSummary {
    fn from(lesson: Lesson) -> Self {
        Self {
            id: lesson.id,
            title: lesson.title,
            content: lesson.content,
            duration: lesson.duration,
            created_at: lesson.created_at,
            updated_at: lesson.updated_at,
        }
    }
}

/// Canonical JSON shape of a course.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CourseSerializer {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub instructor: InstructorSummary,
    pub start_date: String,
    pub end_date: String,
    pub created_at: String,
    pub lessons: Vec<LessonSummary>,
}

impl CourseSerializer {
    /// `lessons` must already belong to `course` and be in display order.
    pub fn new(course: Course, lessons: Vec<Lesson>) -> Self {
        Self {
            id: course.id,
            title: course.title,
            description: course.description,
            instructor: InstructorSummary {
                id: course.instructor_id,
                username: course.instructor_username,
            },
            start_date: course.start_date,
            end_date: course.end_date,
            created_at: course.created_at,
            lessons: lessons.into_iter().map(LessonSummary::from).collect(),
        }
    }
}

/// Course representation annotated with the requester's enrollment status.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CourseDetail {
    #[serde(flatten)]
    pub course: CourseSerializer,
    pub is_enrolled: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnrollmentStatus {
    pub is_enrolled: bool,
}
