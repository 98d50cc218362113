use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

/// Course difficulty level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum DifficultyLevel {
    Beginner,
    Intermediate,
    Advanced,
}

impl fmt::Display for DifficultyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DifficultyLevel::Beginner => write!(f, "beginner"),
            DifficultyLevel::Intermediate => write!(f, "intermediate"),
            DifficultyLevel::Advanced => write!(f, "advanced"),
        }
    }
}

/// Course thumbnail stored with the upload's public id so it can be replaced
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Thumbnail {
    pub public_id: String,
    pub url: String,
}

/// A content module within a course
#[derive(Debug, Serialize, Deserialize, Clone, ToSchema)]
pub struct CourseModule {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Course document stored in MongoDB
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Course {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub created_by: ObjectId,
    pub title: String,
    pub description: String,
    pub price: f64,
    /// Discount percentage (0-100)
    pub discount: f64,
    /// Final price after discount
    pub total_price: f64,
    pub difficulty_level: DifficultyLevel,
    #[serde(default)]
    pub topic_tags: Vec<String>,
    pub thumbnail: Thumbnail,
    #[serde(default)]
    pub videos: Vec<String>,
    #[serde(default)]
    pub modules: Vec<CourseModule>,
    pub created_at: mongodb::bson::DateTime,
}

/// Compute the final course price from the base price and discount percent.
pub fn discounted_price(price: f64, discount: f64) -> f64 {
    price - (price * discount) / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discounted_price() {
        assert_eq!(discounted_price(100.0, 0.0), 100.0);
        assert_eq!(discounted_price(100.0, 25.0), 75.0);
        assert_eq!(discounted_price(100.0, 100.0), 0.0);
        assert_eq!(discounted_price(499.0, 10.0), 449.1);
    }
}
