use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::{Course, Enrollment, Lesson, NewCourseRequest, NewLessonRequest, NewUserRequest, User};

const SELECT_COURSE_BY_ID: &str = r#"
    SELECT
        c.id, c.title, c.description, c.instructor_id,
        u.username AS instructor_username,
        c.start_date, c.end_date, c.created_at
    FROM courses c
    JOIN users u ON u.id = c.instructor_id
    WHERE c.id = ?1
"#;

const SELECT_ALL_COURSES: &str = r#"
    SELECT
        c.id, c.title, c.description, c.instructor_id,
        u.username AS instructor_username,
        c.start_date, c.end_date, c.created_at
    FROM courses c
    JOIN users u ON u.id = c.instructor_id
    ORDER BY c.start_date, c.id
"#;

const SELECT_LESSONS_BY_COURSE: &str = r#"
    SELECT id, course_id, title, content, duration, created_at, updated_at
    FROM lessons
    WHERE course_id = ?1
    ORDER BY id
"#;

const SELECT_ALL_LESSONS: &str = r#"
    SELECT id, course_id, title, content, duration, created_at, updated_at
    FROM lessons
    ORDER BY course_id, id
"#;

#[async_trait]
pub trait CourseRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> Result<Option<Course>, AppError>;
    async fn list(&self) -> Result<Vec<Course>, AppError>;
    /// Lessons of one course, in creation order.
    async fn lessons(&self, course_id: i64) -> Result<Vec<Lesson>, AppError>;
    /// Every lesson, grouped by course and in creation order within a course.
    async fn all_lessons(&self) -> Result<Vec<Lesson>, AppError>;
}

#[async_trait]
pub trait EnrollmentRepository: Send + Sync {
    async fn exists(&self, student_id: i64, course_id: i64) -> Result<bool, AppError>;
    /// Returns `None` when the student was already enrolled.
    async fn enroll(&self, student_id: i64, course_id: i64) -> Result<Option<Enrollment>, AppError>;
    /// Returns `false` when there was nothing to remove.
    async fn unenroll(&self, student_id: i64, course_id: i64) -> Result<bool, AppError>;
}

#[derive(Clone)]
pub struct SqliteRepository {
    db: SqlitePool,
}

impl SqliteRepository {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CourseRepository for SqliteRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Course>, AppError> {
        Ok(find_course_by_id(&self.db, id).await?)
    }

    async fn list(&self) -> Result<Vec<Course>, AppError> {
        Ok(fetch_courses(&self.db).await?)
    }

    async fn lessons(&self, course_id: i64) -> Result<Vec<Lesson>, AppError> {
        Ok(fetch_lessons_for_course(&self.db, course_id).await?)
    }

    async fn all_lessons(&self) -> Result<Vec<Lesson>, AppError> {
        Ok(fetch_lessons(&self.db).await?)
    }
}

#[async_trait]
impl EnrollmentRepository for SqliteRepository {
    async fn exists(&self, student_id: i64, course_id: i64) -> Result<bool, AppError> {
        Ok(enrollment_exists(&self.db, student_id, course_id).await?)
    }

    async fn enroll(&self, student_id: i64, course_id: i64) -> Result<Option<Enrollment>, AppError> {
        Ok(insert_enrollment(&self.db, student_id, course_id).await?)
    }

    async fn unenroll(&self, student_id: i64, course_id: i64) -> Result<bool, AppError> {
        Ok(delete_enrollment(&self.db, student_id, course_id).await?)
    }
}

pub async fn insert_user(db: &SqlitePool, req: NewUserRequest) -> Result<User, sqlx::Error> {
    let now = Utc::now().to_rfc3339();

    let id = sqlx::query(
        "INSERT INTO users (username, user_type, created_at) VALUES (?1, ?2, ?3)"
    )
    .bind(&req.username)
    .bind(req.user_type)
    .bind(&now)
    .execute(db)
    .await?
    .last_insert_rowid();

    Ok(User {
        id,
        username: req.username,
        user_type: req.user_type,
        created_at: now,
    })
}

pub async fn find_user_by_id(db: &SqlitePool, id: i64) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(
        "SELECT id, username, user_type, created_at FROM users WHERE id = ?1"
    )
    .bind(id)
    .fetch_optional(db)
    .await
}

pub async fn insert_course(db: &SqlitePool, req: NewCourseRequest) -> Result<Course, sqlx::Error> {
    let now = Utc::now().to_rfc3339();

    let id = sqlx::query(
        r#"
        INSERT INTO courses
            (title, description, instructor_id, start_date, end_date, created_at)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6)
        "#
    )
    .bind(&req.title)
    .bind(&req.description)
    .bind(req.instructor_id)
    .bind(&req.start_date)
    .bind(&req.end_date)
    .bind(&now)
    .execute(db)
    .await?
    .last_insert_rowid();

    find_course_by_id(db, id)
        .await?
        .ok_or(sqlx::Error::RowNotFound)
}

pub async fn find_course_by_id(db: &SqlitePool, id: i64) -> Result<Option<Course>, sqlx::Error> {
    sqlx::query_as::<_, Course>(SELECT_COURSE_BY_ID)
        .bind(id)
        .fetch_optional(db)
        .await
}

pub async fn fetch_courses(db: &SqlitePool) -> Result<Vec<Course>, sqlx::Error> {
    sqlx::query_as::<_, Course>(SELECT_ALL_COURSES)
        .fetch_all(db)
        .await
}

pub async fn insert_lesson(db: &SqlitePool, req: NewLessonRequest) -> Result<Lesson, sqlx::Error> {
    let now = Utc::now().to_rfc3339();

    let id = sqlx::query(
        r#"
        INSERT INTO lessons
            (course_id, title, content, duration, created_at, updated_at)
        VALUES (?1, ?2, ?3, ?4, ?5, ?5)
        "#
    )
    .bind(req.course_id)
    .bind(&req.title)
    .bind(&req.content)
    .bind(req.duration)
    .bind(&now)
    .execute(db)
    .await?
    .last_insert_rowid();

    Ok(Lesson {
        id,
        course_id: req.course_id,
        title: req.title,
        content: req.content,
        duration: req.duration,
        created_at: now.clone(),
        updated_at: now,
    })
}

pub async fn fetch_lessons_for_course(db: &SqlitePool, course_id: i64) -> Result<Vec<Lesson>, sqlx::Error> {
    sqlx::query_as::<_, Lesson>(SELECT_LESSONS_BY_COURSE)
        .bind(course_id)
        .fetch_all(db)
        .await
}

pub async fn fetch_lessons(db: &SqlitePool) -> Result<Vec<Lesson>, sqlx::Error> {
    sqlx::query_as::<_, Lesson>(SELECT_ALL_LESSONS)
        .fetch_all(db)
        .await
}

pub async fn enrollment_exists(
    db: &SqlitePool,
    student_id: i64,
    course_id: i64,
) -> Result<bool, sqlx::Error> {
    let found: i64 = sqlx::query_scalar(
        "SELECT EXISTS(SELECT 1 FROM enrollments WHERE student_id = ?1 AND course_id = ?2)"
    )
    .bind(student_id)
    .bind(course_id)
    .fetch_one(db)
    .await?;

    Ok(found != 0)
}

pub async fn insert_enrollment(
    db: &SqlitePool,
    student_id: i64,
    course_id: i64,
) -> Result<Option<Enrollment>, sqlx::Error> {
    let id = Uuid::new_v4().to_string();
    let now = Utc::now().to_rfc3339();

    // (student_id, course_id) is unique; a second insert is a no-op
    let inserted = sqlx::query(
        r#"
        INSERT OR IGNORE INTO enrollments (id, student_id, course_id, enrolled_at)
        VALUES (?1, ?2, ?3, ?4)
        "#
    )
    .bind(&id)
    .bind(student_id)
    .bind(course_id)
    .bind(&now)
    .execute(db)
    .await?
    .rows_affected();

    if inserted == 0 {
        return Ok(None);
    }

    Ok(Some(Enrollment {
        id,
        student_id,
        course_id,
        enrolled_at: now,
    }))
}

pub async fn delete_enrollment(
    db: &SqlitePool,
    student_id: i64,
    course_id: i64,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        "DELETE FROM enrollments WHERE student_id = ?1 AND course_id = ?2"
    )
    .bind(student_id)
    .bind(course_id)
    .execute(db)
    .await?
    .rows_affected();

    Ok(result > 0)
}
