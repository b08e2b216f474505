pub mod auth_handler;
pub mod category_handler;
pub mod course_handler;
pub mod instructor_handler;
pub mod user_handler;
pub mod announcement_handler;
