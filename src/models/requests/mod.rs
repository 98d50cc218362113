//! Request payload models.

pub mod auth;
pub mod course;

pub use auth::*;
pub use course::*;
