use std::sync::Arc;

use sqlx::SqlitePool;

use crate::db::{CourseRepository, EnrollmentRepository, SqliteRepository};

#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub courses: Arc<dyn CourseRepository>,
    pub enrollments: Arc<dyn EnrollmentRepository>,
    pub jwt_secret: Arc<str>,
}

impl AppState {
    /// State backed by SQLite for every repository.
    pub fn new(db: SqlitePool, jwt_secret: &str) -> Self {
        let repo = Arc::new(SqliteRepository::new(db.clone()));
        Self {
            db,
            courses: repo.clone(),
            enrollments: repo,
            jwt_secret: Arc::from(jwt_secret),
        }
    }
}
