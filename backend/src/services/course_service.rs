use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, info};

use crate::auth::AuthUser;
use crate::db::{CourseRepository, EnrollmentRepository};
use crate::error::AppError;
use crate::models::{Course, Enrollment, Lesson, UserType};
use crate::serializers::{CourseDetail, CourseSerializer, EnrollmentStatus};

pub struct CourseService {
    courses: Arc<dyn CourseRepository>,
    enrollments: Arc<dyn EnrollmentRepository>,
}

impl CourseService {
    pub fn new(courses: Arc<dyn CourseRepository>, enrollments: Arc<dyn EnrollmentRepository>) -> Self {
        Self { courses, enrollments }
    }

    pub async fn list(&self) -> Result<Vec<CourseSerializer>, AppError> {
        let courses = self.courses.list().await?;

        let mut lessons_by_course: HashMap<i64, Vec<Lesson>> = HashMap::new();
        for lesson in self.courses.all_lessons().await? {
            lessons_by_course.entry(lesson.course_id).or_default().push(lesson);
        }

        Ok(courses
            .into_iter()
            .map(|course| {
                let lessons = lessons_by_course.remove(&course.id).unwrap_or_default();
                CourseSerializer::new(course, lessons)
            })
            .collect())
    }

    /// The course as serialized, plus whether `user` is enrolled in it.
    pub async fn detail(&self, user: &AuthUser, course_id: i64) -> Result<CourseDetail, AppError> {
        let course = self.get_course(course_id).await?;
        let lessons = self.courses.lessons(course.id).await?;
        let is_enrolled = self.enrollments.exists(user.id, course.id).await?;
        debug!("course {} requested by user {} (enrolled: {})", course.id, user.id, is_enrolled);

        Ok(CourseDetail {
            course: CourseSerializer::new(course, lessons),
            is_enrolled,
        })
    }

    pub async fn enrollment_status(&self, user: &AuthUser, course_id: i64) -> Result<EnrollmentStatus, AppError> {
        let course = self.get_course(course_id).await?;
        let is_enrolled = self.enrollments.exists(user.id, course.id).await?;
        Ok(EnrollmentStatus { is_enrolled })
    }

    pub async fn enroll(&self, user: &AuthUser, course_id: i64) -> Result<Enrollment, AppError> {
        let course = self.get_course(course_id).await?;

        if user.user_type == UserType::Instructor {
            return Err(AppError::Forbidden("Instructors cannot enroll in courses".to_string()));
        }

        let enrollment = self
            .enrollments
            .enroll(user.id, course.id)
            .await?
            .ok_or_else(|| AppError::Conflict("Already enrolled in this course".to_string()))?;

        info!("user {} enrolled in course {}", user.id, course.id);
        Ok(enrollment)
    }

    pub async fn unenroll(&self, user: &AuthUser, course_id: i64) -> Result<(), AppError> {
        let course = self.get_course(course_id).await?;

        if !self.enrollments.unenroll(user.id, course.id).await? {
            return Err(AppError::BadRequest("You are not enrolled in this course".to_string()));
        }

        info!("user {} unenrolled from course {}", user.id, course.id);
        Ok(())
    }

    async fn get_course(&self, course_id: i64) -> Result<Course, AppError> {
        self.courses
            .find_by_id(course_id)
            .await?
            .ok_or(AppError::CourseNotFound)
    }
}
