//! Course service for course CRUD, filtering, and paginated listing.

use log::{debug, info, warn};
use mongodb::bson::{doc, oid::ObjectId, Document};
use std::sync::Arc;

use crate::constants::{
    ERR_COURSE_NOT_FOUND, ERR_FAILED_FETCH_COURSE, ERR_INVALID_COURSE_ID, ERR_INVALID_USER_ID,
};
use crate::errors::ApiError;
use crate::models::{
    discounted_price, Course, CourseModule, CourseResponse, CreateCourseFields, Thumbnail,
};
use crate::pagination::{Page, PageRequest};
use crate::repositories::CourseRepository;

/// Filters accepted by the course listing.
#[derive(Debug, Default)]
pub struct CourseFilters {
    pub difficulty: Option<String>,
    pub topic_tags: Option<String>,
}

pub struct CourseService {
    repository: Arc<CourseRepository>,
}

impl CourseService {
    pub fn new(repository: Arc<CourseRepository>) -> Self {
        Self { repository }
    }

    /// Get the underlying repository (for sharing with other services).
    #[allow(dead_code)]
    pub fn repository(&self) -> Arc<CourseRepository> {
        Arc::clone(&self.repository)
    }

    /// Create a new course with an uploaded thumbnail.
    pub async fn create_course(
        &self,
        admin_id: &str,
        fields: CreateCourseFields,
        thumbnail: Thumbnail,
    ) -> Result<Course, ApiError> {
        let created_by = ObjectId::parse_str(admin_id)
            .map_err(|_| ApiError::BadRequest(ERR_INVALID_USER_ID.to_string()))?;

        let topic_tags: Vec<String> = fields
            .topic_tags
            .split(',')
            .map(|tag| tag.trim().to_string())
            .filter(|tag| !tag.is_empty())
            .collect();

        let course = Course {
            id: None,
            created_by,
            title: fields.title,
            description: strip_html_tags(&fields.description),
            price: fields.price,
            discount: fields.discount,
            total_price: discounted_price(fields.price, fields.discount),
            difficulty_level: crate::validators::parse_difficulty(&fields.difficulty_level)?,
            topic_tags,
            thumbnail,
            videos: Vec::new(),
            modules: Vec::new(),
            created_at: mongodb::bson::DateTime::now(),
        };

        let id = self.repository.insert(&course).await?;
        info!("Created course {} ({})", course.title, id);

        Ok(Course {
            id: Some(id),
            ..course
        })
    }

    /// List courses with optional filters, paginated.
    pub async fn list_courses(
        &self,
        filters: CourseFilters,
        request: PageRequest,
    ) -> Result<Page<CourseResponse>, ApiError> {
        let mut filter: Document = doc! {};

        if let Some(ref difficulty) = filters.difficulty {
            filter.insert("difficulty_level", difficulty.to_lowercase());
        }

        if let Some(ref tags) = filters.topic_tags {
            let tags: Vec<String> = tags
                .split(',')
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty())
                .collect();
            if !tags.is_empty() {
                filter.insert("topic_tags", doc! { "$in": tags });
            }
        }

        debug!("Fetching courses with filter: {:?}", filter);

        // Count is computed fresh per request, never cached.
        let total = self.repository.count(filter.clone()).await?;
        let courses = self.repository.find_page(filter, request).await?;
        let responses: Vec<CourseResponse> = courses.into_iter().map(|c| c.into()).collect();

        Ok(Page::from_parts(responses, request, total))
    }

    pub async fn get_course_by_id(&self, id: &str) -> Result<Course, ApiError> {
        let object_id = ObjectId::parse_str(id)
            .map_err(|_| ApiError::BadRequest(ERR_INVALID_COURSE_ID.to_string()))?;

        self.repository
            .find_by_id(object_id)
            .await?
            .ok_or_else(|| ApiError::NotFound(ERR_COURSE_NOT_FOUND.to_string()))
    }

    /// Find courses by topic tag, case-insensitive.
    pub async fn get_courses_by_topic(&self, topic: &str) -> Result<Vec<CourseResponse>, ApiError> {
        let courses = self.repository.find_by_topic(topic).await?;
        Ok(courses.into_iter().map(|c| c.into()).collect())
    }

    /// Append content modules to an existing course.
    pub async fn add_modules(
        &self,
        course_id: &str,
        modules: Vec<CourseModule>,
    ) -> Result<Course, ApiError> {
        let object_id = ObjectId::parse_str(course_id)
            .map_err(|_| ApiError::BadRequest(ERR_INVALID_COURSE_ID.to_string()))?;

        let docs: Vec<Document> = modules
            .iter()
            .map(|m| {
                mongodb::bson::to_document(m)
                    .map_err(|e| ApiError::InternalServerError(e.to_string()))
            })
            .collect::<Result<_, _>>()?;

        let result = self.repository.push_modules(object_id, docs).await?;
        if result.matched_count == 0 {
            warn!("Add modules failed: course not found: {}", course_id);
            return Err(ApiError::NotFound(ERR_COURSE_NOT_FOUND.to_string()));
        }

        info!("Added {} modules to course {}", modules.len(), course_id);

        self.repository
            .find_by_id(object_id)
            .await?
            .ok_or_else(|| ApiError::InternalServerError(ERR_FAILED_FETCH_COURSE.to_string()))
    }

    /// Update price and discount, recomputing the total price.
    pub async fn update_pricing(
        &self,
        course_id: &str,
        price: f64,
        discount: f64,
    ) -> Result<Course, ApiError> {
        let object_id = ObjectId::parse_str(course_id)
            .map_err(|_| ApiError::BadRequest(ERR_INVALID_COURSE_ID.to_string()))?;

        let result = self
            .repository
            .update(
                object_id,
                doc! {
                    "price": price,
                    "discount": discount,
                    "total_price": discounted_price(price, discount),
                },
            )
            .await?;

        if result.matched_count == 0 {
            warn!("Pricing update failed: course not found: {}", course_id);
            return Err(ApiError::NotFound(ERR_COURSE_NOT_FOUND.to_string()));
        }

        info!("Updated pricing for course {}", course_id);

        self.repository
            .find_by_id(object_id)
            .await?
            .ok_or_else(|| ApiError::InternalServerError(ERR_FAILED_FETCH_COURSE.to_string()))
    }

    /// Append an uploaded video URL to a course.
    pub async fn add_video(&self, course_id: &str, url: &str) -> Result<Course, ApiError> {
        let object_id = ObjectId::parse_str(course_id)
            .map_err(|_| ApiError::BadRequest(ERR_INVALID_COURSE_ID.to_string()))?;

        let result = self.repository.push_video(object_id, url).await?;
        if result.matched_count == 0 {
            warn!("Video upload failed: course not found: {}", course_id);
            return Err(ApiError::NotFound(ERR_COURSE_NOT_FOUND.to_string()));
        }

        info!("Added video to course {}", course_id);

        self.repository
            .find_by_id(object_id)
            .await?
            .ok_or_else(|| ApiError::InternalServerError(ERR_FAILED_FETCH_COURSE.to_string()))
    }

    /// Delete a course.
    pub async fn delete_course(&self, course_id: &str) -> Result<(), ApiError> {
        let object_id = ObjectId::parse_str(course_id)
            .map_err(|_| ApiError::BadRequest(ERR_INVALID_COURSE_ID.to_string()))?;

        let result = self.repository.delete(object_id).await?;
        if result.deleted_count == 0 {
            warn!("Delete failed: course not found: {}", course_id);
            return Err(ApiError::NotFound(ERR_COURSE_NOT_FOUND.to_string()));
        }

        info!("Deleted course {}", course_id);
        Ok(())
    }
}

/// Strip HTML tags from user-supplied rich text.
fn strip_html_tags(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut in_tag = false;
    for ch in input.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => out.push(ch),
            _ => {}
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_html_tags() {
        assert_eq!(strip_html_tags("plain text"), "plain text");
        assert_eq!(strip_html_tags("<b>bold</b> text"), "bold text");
        assert_eq!(
            strip_html_tags("<script>alert(1)</script>hello"),
            "alert(1)hello"
        );
        assert_eq!(strip_html_tags("a < b"), "a ");
    }
}
