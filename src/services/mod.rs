//! Services organized by domain concern.

pub mod auth_service;
pub mod course_service;
pub mod enrollment_service;
pub mod file_service;
pub mod mail_service;
pub mod payment_service;
pub mod token_blacklist;
pub mod user_service;

pub use auth_service::AuthService;
pub use course_service::CourseService;
pub use enrollment_service::EnrollmentService;
pub use file_service::FileService;
pub use mail_service::MailService;
pub use payment_service::PaymentService;
pub use token_blacklist::TokenBlacklist;
pub use user_service::UserService;
