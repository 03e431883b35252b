pub mod course;
pub mod enrollment;
pub mod lesson;
pub mod user;

pub use course::{Course, NewCourseRequest};
pub use enrollment::Enrollment;
pub use lesson::{Lesson, NewLessonRequest};
pub use user::{NewUserRequest, User, UserType};
