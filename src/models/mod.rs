//! Data models organized by type.

pub mod claims;
pub mod course;
pub mod requests;
pub mod responses;
pub mod user;

pub use claims::*;
pub use course::*;
pub use requests::*;
pub use responses::*;
pub use user::*;
