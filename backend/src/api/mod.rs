use axum::Json;
use axum::extract::Path;
use axum::routing::post;
use axum::{Router, extract::State, http::StatusCode, routing::get};
use serde::Serialize;

use crate::auth::AuthUser;
use crate::error::AppError;
use crate::serializers::{CourseDetail, CourseSerializer, EnrollmentStatus};
use crate::services::CourseService;
use crate::state::AppState;

#[derive(Debug, Serialize)]
struct MessageResponse {
    message: String,
}

impl MessageResponse {
    fn new(message: &str) -> Json<Self> {
        Json(Self { message: message.to_string() })
    }
}

pub fn router(state: AppState) -> Router {
    let courses = Router::new()
        .route("/courses", get(list_courses))
        .route("/courses/", get(list_courses))
        .route("/courses/{course_id}", get(course_detail))
        .route("/courses/{course_id}/", get(course_detail))
        .route("/courses/{course_id}/enrollment_status", get(enrollment_status))
        .route("/courses/{course_id}/enrollment_status/", get(enrollment_status))
        .route("/courses/{course_id}/enroll", post(enroll))
        .route("/courses/{course_id}/enroll/", post(enroll))
        .route("/courses/{course_id}/unenroll", post(unenroll))
        .route("/courses/{course_id}/unenroll/", post(unenroll));

    Router::new()
        .route("/health", get(health))
        .nest("/api", courses)
        .with_state(state)
}

fn course_service(state: &AppState) -> CourseService {
    CourseService::new(state.courses.clone(), state.enrollments.clone())
}

async fn health(State(state): State<AppState>) -> Result<StatusCode, AppError> {
    sqlx::query("select 1").execute(&state.db).await?;
    Ok(StatusCode::OK)
}

async fn list_courses(
    State(state): State<AppState>,
    _user: AuthUser,
) -> Result<Json<Vec<CourseSerializer>>, AppError> {
    let courses = course_service(&state).list().await?;
    Ok(Json(courses))
}

async fn course_detail(
    State(state): State<AppState>,
    user: AuthUser,
    Path(course_id): Path<i64>,
) -> Result<Json<CourseDetail>, AppError> {
    let detail = course_service(&state).detail(&user, course_id).await?;
    Ok(Json(detail))
}

async fn enrollment_status(
    State(state): State<AppState>,
    user: AuthUser,
    Path(course_id): Path<i64>,
) -> Result<Json<EnrollmentStatus>, AppError> {
    let status = course_service(&state).enrollment_status(&user, course_id).await?;
    Ok(Json(status))
}

async fn enroll(
    State(state): State<AppState>,
    user: AuthUser,
    Path(course_id): Path<i64>,
) -> Result<(StatusCode, Json<MessageResponse>), AppError> {
    course_service(&state).enroll(&user, course_id).await?;
    Ok((
        StatusCode::CREATED,
        MessageResponse::new("Successfully enrolled in the course"),
    ))
}

async fn unenroll(
    State(state): State<AppState>,
    user: AuthUser,
    Path(course_id): Path<i64>,
) -> Result<Json<MessageResponse>, AppError> {
    course_service(&state).unenroll(&user, course_id).await?;
    Ok(MessageResponse::new("Successfully unenrolled from the course"))
}
