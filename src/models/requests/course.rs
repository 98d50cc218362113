//! Course, enrollment, and payment request payloads.

use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::models::CourseModule;

/// Query parameters for course listing.
///
/// `page` and `page_size` are kept as raw strings so that unparseable
/// values can fall back to defaults instead of failing extraction.
#[derive(Debug, Deserialize, IntoParams)]
pub struct CourseListQuery {
    /// Page number (default: 1)
    pub page: Option<String>,
    /// Items per page (default: configured page size)
    pub page_size: Option<String>,
    /// Filter by difficulty level: beginner, intermediate, or advanced
    pub difficulty: Option<String>,
    /// Comma-separated topic tags, matches any
    pub topic_tags: Option<String>,
}

/// Query parameters for paginated user listing (admin only).
#[derive(Debug, Deserialize, IntoParams)]
pub struct UserListQuery {
    /// Page number (default: 1)
    pub page: Option<String>,
    /// Items per page (default: configured page size)
    pub page_size: Option<String>,
    /// Filter by role: 'admin' or 'user'
    pub role: Option<String>,
    /// Search by name or email
    pub search: Option<String>,
}

/// Query parameters for the purchased-courses listing.
#[derive(Debug, Deserialize, IntoParams)]
pub struct PageQuery {
    /// Page number (default: 1)
    pub page: Option<String>,
    /// Items per page (default: configured page size)
    pub page_size: Option<String>,
}

/// Multipart text fields for course creation (thumbnail arrives as a file part)
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateCourseFields {
    /// Course title
    #[validate(length(min = 1, max = 200, message = "Title must be between 1 and 200 characters"))]
    #[schema(example = "Rust for Backend Engineers")]
    pub title: String,
    /// Course description
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,
    /// Base price
    #[validate(range(min = 0.0, message = "Price must not be negative"))]
    #[schema(example = 499.0)]
    pub price: f64,
    /// Discount percentage (0-100)
    #[validate(range(min = 0.0, max = 100.0, message = "Discount must be between 0 and 100"))]
    #[schema(example = 10.0)]
    pub discount: f64,
    /// Comma-separated topic tags
    #[schema(example = "rust,backend,web")]
    pub topic_tags: String,
    /// Difficulty level: beginner, intermediate, or advanced
    #[schema(example = "beginner")]
    pub difficulty_level: String,
}

/// Request payload for updating course pricing
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdatePricingRequest {
    /// New base price
    #[validate(range(min = 0.0, message = "Price must not be negative"))]
    #[schema(example = 399.0)]
    pub price: f64,
    /// New discount percentage (0-100)
    #[validate(range(min = 0.0, max = 100.0, message = "Discount must be between 0 and 100"))]
    #[schema(example = 20.0)]
    pub discount: f64,
}

/// Request payload for appending content modules to a course
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct AddModulesRequest {
    /// Modules to append, in order
    #[validate(length(min = 1, message = "At least one module is required"))]
    pub modules: Vec<CourseModule>,
}

/// Request payload for purchasing a course
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct PurchaseRequest {
    /// ISO currency code for the payment order
    #[validate(length(equal = 3, message = "Currency must be a 3-letter code"))]
    #[schema(example = "INR")]
    pub currency: String,
}
