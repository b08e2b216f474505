pub mod auth_service;
pub mod category_service;
pub mod course_service;
pub mod instructor_service;
pub mod user_service;
pub mod announcement_service;
