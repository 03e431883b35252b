use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A course row joined with its instructor's username.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Course {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub instructor_id: i64,
    pub instructor_username: String,
    pub start_date: String,
    pub end_date: String,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewCourseRequest {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub instructor_id: i64,
    pub start_date: String,
    pub end_date: String,
}
