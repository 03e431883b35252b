use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Enrollment {
    pub id: String,
    pub student_id: i64,
    pub course_id: i64,
    pub enrolled_at: String,
}
