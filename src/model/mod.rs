pub mod user;
pub mod category;
pub mod course;
pub mod announcement;
