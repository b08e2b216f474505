pub mod auth_router;
pub mod category_router;
pub mod course_router;
pub mod instructor_router;
pub mod user_router;
pub mod announcement_router;
