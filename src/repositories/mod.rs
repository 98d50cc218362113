//! Repositories encapsulating all MongoDB access.

pub mod course_repository;
pub mod user_repository;

pub use course_repository::CourseRepository;
pub use user_repository::UserRepository;
