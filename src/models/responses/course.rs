//! Course response models.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::models::{Course, CourseModule, DifficultyLevel};

/// Course data returned in API responses
#[derive(Debug, Serialize, Clone, ToSchema)]
pub struct CourseResponse {
    /// Course's unique identifier
    #[schema(example = "507f1f77bcf86cd799439011")]
    pub id: String,
    /// Id of the admin who created the course
    pub created_by: String,
    /// Course title
    #[schema(example = "Rust for Backend Engineers")]
    pub title: String,
    /// Course description
    pub description: String,
    /// Base price
    pub price: f64,
    /// Discount percentage
    pub discount: f64,
    /// Final price after discount
    pub total_price: f64,
    /// Difficulty level
    pub difficulty_level: DifficultyLevel,
    /// Topic tags
    pub topic_tags: Vec<String>,
    /// Thumbnail URL
    pub thumbnail_url: String,
    /// Course video URLs
    pub videos: Vec<String>,
    /// Content modules
    pub modules: Vec<CourseModule>,
    /// When the course was created
    pub created_at: DateTime<Utc>,
}

impl From<Course> for CourseResponse {
    fn from(course: Course) -> Self {
        Self {
            id: course.id.map(|id| id.to_hex()).unwrap_or_default(),
            created_by: course.created_by.to_hex(),
            title: course.title,
            description: course.description,
            price: course.price,
            discount: course.discount,
            total_price: course.total_price,
            difficulty_level: course.difficulty_level,
            topic_tags: course.topic_tags,
            thumbnail_url: course.thumbnail.url,
            videos: course.videos,
            modules: course.modules,
            created_at: DateTime::from_timestamp_millis(course.created_at.timestamp_millis())
                .unwrap_or_default(),
        }
    }
}

/// Payment order details returned after a purchase
#[derive(Debug, Serialize, ToSchema)]
pub struct PurchaseResponse {
    /// Payment-gateway order id
    #[schema(example = "order_EKwxwAgItmmXdp")]
    pub order_id: String,
    /// Order amount in the smallest currency unit
    pub amount: u64,
    /// ISO currency code
    #[schema(example = "INR")]
    pub currency: String,
    /// Purchased course
    pub course: CourseResponse,
}
