pub mod repository_error;
pub mod mongo;
pub mod user_repo;
pub mod category_repo;
pub mod course_repo;
pub mod announcement_repo;
