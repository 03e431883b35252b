#![allow(dead_code)]

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Method, Request, StatusCode, header};
use chrono::Duration;
use course_backend::{
    api::router,
    auth::issue_token,
    db::{self, repository},
    models::{Course, Lesson, NewCourseRequest, NewLessonRequest, NewUserRequest, User, UserType},
    state::AppState,
};
use serde_json::Value;
use sqlx::SqlitePool;
use tower::ServiceExt;

pub const SECRET: &str = "test-secret";

pub struct TestApp {
    pub pool: SqlitePool,
    pub router: Router,
}

impl TestApp {
    pub async fn new() -> Self {
        let pool = db::connect("sqlite::memory:", 1)
            .await
            .expect("Failed to create test db");
        let router = router(AppState::new(pool.clone(), SECRET));
        Self { pool, router }
    }

    pub async fn user(&self, username: &str, user_type: UserType) -> User {
        repository::insert_user(
            &self.pool,
            NewUserRequest {
                username: username.to_string(),
                user_type,
            },
        )
        .await
        .expect("Failed to insert user")
    }

    pub async fn course(&self, instructor: &User, title: &str) -> Course {
        repository::insert_course(
            &self.pool,
            NewCourseRequest {
                title: title.to_string(),
                description: format!("About {}", title),
                instructor_id: instructor.id,
                start_date: "2026-01-10".to_string(),
                end_date: "2026-03-20".to_string(),
            },
        )
        .await
        .expect("Failed to insert course")
    }

    pub async fn lesson(&self, course: &Course, title: &str, duration: Option<i64>) -> Lesson {
        repository::insert_lesson(
            &self.pool,
            NewLessonRequest {
                course_id: course.id,
                title: title.to_string(),
                content: format!("{} notes", title),
                duration,
            },
        )
        .await
        .expect("Failed to insert lesson")
    }

    pub async fn enroll(&self, student: &User, course: &Course) {
        repository::insert_enrollment(&self.pool, student.id, course.id)
            .await
            .expect("Failed to insert enrollment")
            .expect("Already enrolled");
    }

    pub async fn send(&self, method: Method, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = builder.body(Body::empty()).expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Request failed");

        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read body");
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| {
                Value::String(String::from_utf8_lossy(&bytes).into_owned())
            })
        };
        (status, body)
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.send(Method::GET, uri, token).await
    }

    pub async fn post(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.send(Method::POST, uri, token).await
    }
}

pub fn token_for(user: &User) -> String {
    issue_token(SECRET, user, Duration::minutes(15)).expect("Failed to issue token")
}
