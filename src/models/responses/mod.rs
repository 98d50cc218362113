//! Response body models.

pub mod api;
pub mod course;
pub mod pagination;
pub mod user;

pub use api::*;
pub use course::*;
pub use pagination::*;
pub use user::*;
