pub mod repository;

use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;
use tracing::info;

use crate::error::AppError;

pub use repository::{CourseRepository, EnrollmentRepository, SqliteRepository};

/// Opens the pool and brings the schema up to date.
pub async fn connect(database_url: &str, max_connections: u32) -> Result<SqlitePool, AppError> {
    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;
    info!("database ready ({} max connections)", max_connections);

    Ok(pool)
}
