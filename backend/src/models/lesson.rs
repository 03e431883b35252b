use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Lesson {
    pub id: i64,
    pub course_id: i64,
    pub title: String,
    pub content: String,
    /// Minutes
    pub duration: Option<i64>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewLessonRequest {
    pub course_id: i64,
    pub title: String,
    #[serde(default)]
    pub content: String,
    pub duration: Option<i64>,
}
