//! User repository for all MongoDB operations related to users.
//!
//! This repository encapsulates all database access logic for the users
//! collection, providing a clean interface for the service layer.

use futures::TryStreamExt;
use log::{debug, info};
use mongodb::bson::{doc, oid::ObjectId, Document};
use mongodb::{Collection, Database, IndexModel};

use crate::constants::COLLECTION_USERS;
use crate::errors::ApiError;
use crate::models::{PurchasedCourse, User};
use crate::pagination::PageRequest;

/// Repository for user-related database operations.
pub struct UserRepository {
    collection: Collection<User>,
}

impl UserRepository {
    /// Create a new UserRepository instance.
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection(COLLECTION_USERS),
        }
    }

    /// Create database indexes for commonly queried fields.
    ///
    /// Called once during application startup. Creates a unique index on
    /// `email` and a secondary index on `role`.
    pub async fn create_indexes(&self) -> Result<(), ApiError> {
        info!("Creating database indexes for users collection...");

        let indexes = vec![
            IndexModel::builder()
                .keys(doc! { "email": 1 })
                .options(
                    mongodb::options::IndexOptions::builder()
                        .unique(true)
                        .build(),
                )
                .build(),
            IndexModel::builder().keys(doc! { "role": 1 }).build(),
        ];

        self.collection.create_indexes(indexes).await?;
        info!("User indexes created successfully");
        Ok(())
    }

    /// Insert a new user into the database.
    pub async fn insert(&self, user: &User) -> Result<ObjectId, ApiError> {
        let result = self.collection.insert_one(user).await?;
        result
            .inserted_id
            .as_object_id()
            .ok_or_else(|| ApiError::InternalServerError("Inserted id was not an ObjectId".into()))
    }

    /// Find a user by their ObjectId.
    pub async fn find_by_id(&self, id: ObjectId) -> Result<Option<User>, ApiError> {
        debug!("Repository: Finding user by ID: {}", id);
        Ok(self.collection.find_one(doc! { "_id": id }).await?)
    }

    /// Find a user by email address (case-insensitive).
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, ApiError> {
        Ok(self
            .collection
            .find_one(doc! { "email": email.to_lowercase() })
            .await?)
    }

    /// Find one page of users matching a filter, newest first.
    pub async fn find_page(
        &self,
        filter: Document,
        request: PageRequest,
    ) -> Result<Vec<User>, ApiError> {
        debug!("Repository: Finding users with filter: {:?}", filter);
        let cursor = self
            .collection
            .find(filter)
            .skip(request.skip())
            .limit(request.limit())
            .sort(doc! { "created_at": -1 })
            .await?;

        Ok(cursor.try_collect().await?)
    }

    /// Count documents matching a filter.
    pub async fn count(&self, filter: Document) -> Result<u64, ApiError> {
        Ok(self.collection.count_documents(filter).await?)
    }

    /// Apply a `$set` update to a user document.
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

    /// Update last login timestamp for a user.
    pub async fn update_last_login(&self, id: ObjectId) -> Result<(), ApiError> {
        self.collection
            .update_one(
                doc! { "_id": id },
                doc! { "$set": { "last_login": mongodb::bson::DateTime::now() } },
            )
            .await?;
        Ok(())
    }

    /// Add a course to the user's enrolled list.
    pub async fn add_enrollment(
        &self,
        id: ObjectId,
        course_id: ObjectId,
    ) -> Result<(), ApiError> {
        debug!("Repository: Enrolling user {} in course {}", id, course_id);
        self.collection
            .update_one(
                doc! { "_id": id },
                doc! { "$addToSet": { "courses": course_id } },
            )
            .await?;
        Ok(())
    }

    /// Record a purchased course with its payment order id.
    pub async fn add_purchase(
        &self,
        id: ObjectId,
        purchase: &PurchasedCourse,
    ) -> Result<(), ApiError> {
        debug!(
            "Repository: Recording purchase of course {} for user {}",
            purchase.course_id, id
        );
        let entry = mongodb::bson::to_bson(purchase)
            .map_err(|e| ApiError::InternalServerError(e.to_string()))?;
        self.collection
            .update_one(doc! { "_id": id }, doc! { "$push": { "purchased_courses": entry } })
            .await?;
        Ok(())
    }
}
