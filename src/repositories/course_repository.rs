//! Course repository for all MongoDB operations related to courses.

use futures::TryStreamExt;
use log::{debug, info};
use mongodb::bson::{doc, oid::ObjectId, Document};
use mongodb::{Collection, Database, IndexModel};

use crate::constants::COLLECTION_COURSES;
use crate::errors::ApiError;
use crate::models::Course;
use crate::pagination::PageRequest;

/// Repository for course-related database operations.
pub struct CourseRepository {
    collection: Collection<Course>,
}

impl CourseRepository {
    /// Create a new CourseRepository instance.
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection(COLLECTION_COURSES),
        }
    }

    /// Create database indexes for commonly queried fields.
    pub async fn create_indexes(&self) -> Result<(), ApiError> {
        info!("Creating database indexes for courses collection...");

        let indexes = vec![
            IndexModel::builder().keys(doc! { "topic_tags": 1 }).build(),
            IndexModel::builder()
                .keys(doc! { "difficulty_level": 1 })
                .build(),
        ];

        self.collection.create_indexes(indexes).await?;
        info!("Course indexes created successfully");
        Ok(())
    }

    /// Insert a new course into the database.
    pub async fn insert(&self, course: &Course) -> Result<ObjectId, ApiError> {
        let result = self.collection.insert_one(course).await?;
        result
            .inserted_id
            .as_object_id()
            .ok_or_else(|| ApiError::InternalServerError("Inserted id was not an ObjectId".into()))
    }

    /// Find a course by its ObjectId.
    pub async fn find_by_id(&self, id: ObjectId) -> Result<Option<Course>, ApiError> {
        debug!("Repository: Finding course by ID: {}", id);
        Ok(self.collection.find_one(doc! { "_id": id }).await?)
    }

    /// Find one page of courses matching a filter, newest first.
    pub async fn find_page(
        &self,
        filter: Document,
        request: PageRequest,
    ) -> Result<Vec<Course>, ApiError> {
        debug!("Repository: Finding courses with filter: {:?}", filter);
        let cursor = self
            .collection
            .find(filter)
            .skip(request.skip())
            .limit(request.limit())
            .sort(doc! { "created_at": -1 })
            .await?;

        Ok(cursor.try_collect().await?)
    }

    /// Find all courses whose ids are in the given set.
    pub async fn find_by_ids(&self, ids: &[ObjectId]) -> Result<Vec<Course>, ApiError> {
        let cursor = self
            .collection
            .find(doc! { "_id": { "$in": ids } })
            .sort(doc! { "created_at": -1 })
            .await?;
        Ok(cursor.try_collect().await?)
    }

    /// Find courses with a topic tag matching the given term, case-insensitive.
    pub async fn find_by_topic(&self, topic: &str) -> Result<Vec<Course>, ApiError> {
        let pattern = mongodb::bson::Regex {
            pattern: regex::escape(topic),
            options: "i".to_string(),
        };
        let cursor = self
            .collection
            .find(doc! { "topic_tags": { "$regex": pattern } })
            .await?;
        Ok(cursor.try_collect().await?)
    }

    /// Count documents matching a filter.
    pub async fn count(&self, filter: Document) -> Result<u64, ApiError> {
        Ok(self.collection.count_documents(filter).await?)
    }

    /// Apply a `$set` update to a course document.
    pub async fn update(
        &self,
        id: ObjectId,
        update: Document,
    ) -> Result<mongodb::results::UpdateResult, ApiError> {
        Ok(self
            .collection
            .update_one(doc! { "_id": id }, doc! { "$set": update })
            .await?)
    }

    /// Append content modules to a course.
    pub async fn push_modules(
        &self,
        id: ObjectId,
        modules: Vec<Document>,
    ) -> Result<mongodb::results::UpdateResult, ApiError> {
        Ok(self
            .collection
            .update_one(
                doc! { "_id": id },
                doc! { "$push": { "modules": { "$each": modules } } },
            )
            .await?)
    }

    /// Append a video URL to a course.
    pub async fn push_video(
        &self,
        id: ObjectId,
        url: &str,
    ) -> Result<mongodb::results::UpdateResult, ApiError> {
        Ok(self
            .collection
            .update_one(doc! { "_id": id }, doc! { "$push": { "videos": url } })
            .await?)
    }

    /// Delete a course by ObjectId.
    pub async fn delete(&self, id: ObjectId) -> Result<mongodb::results::DeleteResult, ApiError> {
        Ok(self.collection.delete_one(doc! { "_id": id }).await?)
    }
}
