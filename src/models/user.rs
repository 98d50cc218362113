use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

use crate::constants::{ROLE_ADMIN, ROLE_USER};

/// User roles for access control
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    User,
}

impl Default for Role {
    fn default() -> Self {
        Role::User
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Admin => write!(f, "{}", ROLE_ADMIN),
            Role::User => write!(f, "{}", ROLE_USER),
        }
    }
}

impl Role {
    /// Check if this role has admin privileges
    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }

    /// Parse role from string
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            ROLE_ADMIN => Role::Admin,
            _ => Role::User,
        }
    }
}

/// User avatar stored alongside the profile
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Avatar {
    pub public_id: String,
    pub url: String,
}

/// A course the user has paid for, with the payment-gateway order id
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PurchasedCourse {
    pub course_id: ObjectId,
    pub order_id: String,
    pub purchased_at: mongodb::bson::DateTime,
}

/// User document stored in MongoDB
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    #[serde(default)]
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<Avatar>,
    /// Courses the user has enrolled in
    #[serde(default)]
    pub courses: Vec<ObjectId>,
    /// Courses the user has paid for
    #[serde(default)]
    pub purchased_courses: Vec<PurchasedCourse>,
    pub created_at: mongodb::bson::DateTime,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_login: Option<mongodb::bson::DateTime>,
}

impl User {
    /// Check whether the user already enrolled in a course.
    pub fn is_enrolled(&self, course_id: &ObjectId) -> bool {
        self.courses.contains(course_id)
    }

    /// Check whether the user already purchased a course.
    pub fn has_purchased(&self, course_id: &ObjectId) -> bool {
        self.purchased_courses
            .iter()
            .any(|p| p.course_id == *course_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_from_str() {
        assert_eq!(Role::from_str("admin"), Role::Admin);
        assert_eq!(Role::from_str("Admin"), Role::Admin);
        assert_eq!(Role::from_str("user"), Role::User);
        assert_eq!(Role::from_str("anything-else"), Role::User);
    }

    #[test]
    fn test_role_display_round_trips() {
        assert_eq!(Role::from_str(&Role::Admin.to_string()), Role::Admin);
        assert_eq!(Role::from_str(&Role::User.to_string()), Role::User);
    }

    #[test]
    fn test_purchase_and_enrollment_checks() {
        let course_id = ObjectId::new();
        let other_id = ObjectId::new();
        let user = User {
            id: Some(ObjectId::new()),
            name: "Aditya".to_string(),
            email: "aditya@example.com".to_string(),
            password_hash: "hash".to_string(),
            role: Role::User,
            avatar: None,
            courses: vec![course_id],
            purchased_courses: vec![PurchasedCourse {
                course_id,
                order_id: "order_123".to_string(),
                purchased_at: mongodb::bson::DateTime::now(),
            }],
            created_at: mongodb::bson::DateTime::now(),
            last_login: None,
        };

        assert!(user.is_enrolled(&course_id));
        assert!(!user.is_enrolled(&other_id));
        assert!(user.has_purchased(&course_id));
        assert!(!user.has_purchased(&other_id));
    }
}
