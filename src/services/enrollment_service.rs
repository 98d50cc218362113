//! Enrollment service: enrolling in courses, purchasing them, and listing
//! a user's purchased courses.

use log::{info, warn};
use mongodb::bson::oid::ObjectId;
use std::collections::HashMap;
use std::sync::Arc;

use crate::constants::{
    ERR_ALREADY_ENROLLED, ERR_ALREADY_PURCHASED, ERR_COURSE_NOT_FOUND, ERR_INVALID_COURSE_ID,
    ERR_INVALID_USER_ID, ERR_NOT_ENROLLED, ERR_USER_NOT_FOUND,
};
use crate::errors::ApiError;
use crate::models::{Course, CourseResponse, PurchasedCourse, User};
use crate::repositories::{CourseRepository, UserRepository};
use crate::services::payment_service::{to_minor_units, PaymentOrder};
use crate::services::{MailService, PaymentService};

pub struct EnrollmentService {
    users: Arc<UserRepository>,
    courses: Arc<CourseRepository>,
    payments: Arc<PaymentService>,
    mailer: Arc<MailService>,
}

impl EnrollmentService {
    pub fn new(
        users: Arc<UserRepository>,
        courses: Arc<CourseRepository>,
        payments: Arc<PaymentService>,
        mailer: Arc<MailService>,
    ) -> Self {
        Self {
            users,
            courses,
            payments,
            mailer,
        }
    }

    /// Enroll the user in a course and send a confirmation email.
    pub async fn enroll(&self, user_id: &str, course_id: &str) -> Result<Course, ApiError> {
        let (user, user_oid) = self.fetch_user(user_id).await?;
        let (course, course_oid) = self.fetch_course(course_id).await?;

        if user.is_enrolled(&course_oid) {
            warn!("User {} already enrolled in course {}", user_id, course_id);
            return Err(ApiError::Conflict(ERR_ALREADY_ENROLLED.to_string()));
        }

        self.users.add_enrollment(user_oid, course_oid).await?;
        info!("User {} enrolled in course {}", user_id, course_id);

        // Confirmation mail is best-effort and never fails the enrollment.
        self.mailer
            .send(
                &user.email,
                "Course Enrollment",
                &format!(
                    "<h1>Hi {},</h1><p>You have successfully enrolled in the course \
                     <strong>{}</strong>. Happy Learning! 🚀</p>",
                    user.name, course.title
                ),
            )
            .await;

        Ok(course)
    }

    /// Create a payment order for an enrolled course and record the purchase.
    pub async fn purchase(
        &self,
        user_id: &str,
        course_id: &str,
        currency: &str,
    ) -> Result<(PaymentOrder, Course), ApiError> {
        let (user, user_oid) = self.fetch_user(user_id).await?;
        let (course, course_oid) = self.fetch_course(course_id).await?;

        if !user.is_enrolled(&course_oid) {
            return Err(ApiError::BadRequest(ERR_NOT_ENROLLED.to_string()));
        }

        if user.has_purchased(&course_oid) {
            warn!("User {} already purchased course {}", user_id, course_id);
            return Err(ApiError::Conflict(ERR_ALREADY_PURCHASED.to_string()));
        }

        let receipt = format!("{}:{}", user_id, course_id);
        let order = self
            .payments
            .create_order(to_minor_units(course.total_price), currency, &receipt)
            .await?;

        self.users
            .add_purchase(
                user_oid,
                &PurchasedCourse {
                    course_id: course_oid,
                    order_id: order.id.clone(),
                    purchased_at: mongodb::bson::DateTime::now(),
                },
            )
            .await?;

        info!(
            "User {} purchased course {} (order {})",
            user_id, course_id, order.id
        );

        Ok((order, course))
    }

    /// Fetch all of the user's purchased courses, most recent purchase first.
    ///
    /// Returns the full ordered collection; the caller slices it into
    /// pages with the pagination core.
    pub async fn purchased_courses(&self, user_id: &str) -> Result<Vec<CourseResponse>, ApiError> {
        let (user, _) = self.fetch_user(user_id).await?;

        if user.purchased_courses.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<ObjectId> = user
            .purchased_courses
            .iter()
            .map(|p| p.course_id)
            .collect();

        let courses = self.courses.find_by_ids(&ids).await?;
        let ordered = order_by_purchase(courses, &user.purchased_courses);

        Ok(ordered.into_iter().map(|c| c.into()).collect())
    }

    async fn fetch_user(&self, user_id: &str) -> Result<(User, ObjectId), ApiError> {
        let oid = ObjectId::parse_str(user_id)
            .map_err(|_| ApiError::BadRequest(ERR_INVALID_USER_ID.to_string()))?;
        let user = self
            .users
            .find_by_id(oid)
            .await?
            .ok_or_else(|| ApiError::NotFound(ERR_USER_NOT_FOUND.to_string()))?;
        Ok((user, oid))
    }

    async fn fetch_course(&self, course_id: &str) -> Result<(Course, ObjectId), ApiError> {
        let oid = ObjectId::parse_str(course_id)
            .map_err(|_| ApiError::BadRequest(ERR_INVALID_COURSE_ID.to_string()))?;
        let course = self
            .courses
            .find_by_id(oid)
            .await?
            .ok_or_else(|| ApiError::NotFound(ERR_COURSE_NOT_FOUND.to_string()))?;
        Ok((course, oid))
    }
}

/// Order fetched courses by their purchase time, most recent first.
///
/// An `$in` query does not preserve order, so it is rebuilt from the
/// purchase records. Purchases whose course was since deleted are skipped.
fn order_by_purchase(courses: Vec<Course>, purchases: &[PurchasedCourse]) -> Vec<Course> {
    let mut by_id: HashMap<ObjectId, Course> = courses
        .into_iter()
        .filter_map(|c| c.id.map(|id| (id, c)))
        .collect();

    let mut recent_first: Vec<&PurchasedCourse> = purchases.iter().collect();
    recent_first.sort_by(|a, b| b.purchased_at.cmp(&a.purchased_at));

    recent_first
        .into_iter()
        .filter_map(|p| by_id.remove(&p.course_id))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DifficultyLevel, Thumbnail};
    use mongodb::bson::DateTime;

    fn course(id: ObjectId, title: &str) -> Course {
        Course {
            id: Some(id),
            created_by: ObjectId::new(),
            title: title.to_string(),
            description: String::new(),
            price: 100.0,
            discount: 0.0,
            total_price: 100.0,
            difficulty_level: DifficultyLevel::Beginner,
            topic_tags: Vec::new(),
            thumbnail: Thumbnail::default(),
            videos: Vec::new(),
            modules: Vec::new(),
            created_at: DateTime::now(),
        }
    }

    fn purchase(course_id: ObjectId, at_millis: i64) -> PurchasedCourse {
        PurchasedCourse {
            course_id,
            order_id: "order_test".to_string(),
            purchased_at: DateTime::from_millis(at_millis),
        }
    }

    #[test]
    fn test_order_by_purchase_puts_latest_purchase_first() {
        let earlier = ObjectId::new();
        let later = ObjectId::new();
        let courses = vec![course(earlier, "Rust Basics"), course(later, "Advanced Rust")];
        let purchases = vec![purchase(earlier, 1_000), purchase(later, 2_000)];

        let ordered = order_by_purchase(courses, &purchases);
        let titles: Vec<&str> = ordered.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, vec!["Advanced Rust", "Rust Basics"]);
    }

    #[test]
    fn test_order_by_purchase_skips_deleted_courses() {
        let kept = ObjectId::new();
        let deleted = ObjectId::new();
        let courses = vec![course(kept, "Kept")];
        let purchases = vec![purchase(deleted, 2_000), purchase(kept, 1_000)];

        let ordered = order_by_purchase(courses, &purchases);
        assert_eq!(ordered.len(), 1);
        assert_eq!(ordered[0].title, "Kept");
    }
}
