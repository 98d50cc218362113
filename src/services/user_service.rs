//! User service for registration, profile management, and admin user listing.

use log::{debug, info, warn};
use mongodb::bson::{doc, oid::ObjectId};
use std::sync::Arc;

use crate::constants::{
    ERR_EMAIL_EXISTS, ERR_FAILED_FETCH_USER, ERR_INVALID_USER_ID, ERR_USER_NOT_FOUND,
};
use crate::errors::ApiError;
use crate::models::{RegisterRequest, Role, UpdateProfileRequest, User, UserResponse};
use crate::pagination::{Page, PageRequest};
use crate::repositories::UserRepository;
use crate::services::auth_service::hash_password;
use crate::services::MailService;
use crate::utils::mask_email;

pub struct UserService {
    repository: Arc<UserRepository>,
    mailer: Arc<MailService>,
}

impl UserService {
    pub fn new(repository: Arc<UserRepository>, mailer: Arc<MailService>) -> Self {
        Self { repository, mailer }
    }

    /// Get the underlying repository (for sharing with other services).
    #[allow(dead_code)]
    pub fn repository(&self) -> Arc<UserRepository> {
        Arc::clone(&self.repository)
    }

    /// Register a new user and send a welcome email.
    pub async fn register(&self, req: RegisterRequest) -> Result<User, ApiError> {
        if self.repository.find_by_email(&req.email).await?.is_some() {
            return Err(ApiError::Conflict(ERR_EMAIL_EXISTS.to_string()));
        }

        let password_hash = hash_password(&req.password)?;

        let user = User {
            id: None,
            name: req.name,
            email: req.email.to_lowercase(),
            password_hash,
            role: Role::User,
            avatar: None,
            courses: Vec::new(),
            purchased_courses: Vec::new(),
            created_at: mongodb::bson::DateTime::now(),
            last_login: None,
        };

        let id = self.repository.insert(&user).await?;
        info!("Registered new user {}", mask_email(&user.email));

        let user = User {
            id: Some(id),
            ..user
        };

        // Welcome mail is best-effort and never fails registration.
        self.mailer
            .send(
                &user.email,
                "Welcome to DevCourses",
                &format!("{} Welcome to DevCourses! Happy Learning 🚀", user.name),
            )
            .await;

        Ok(user)
    }

    pub async fn get_user_by_id(&self, id: &str) -> Result<Option<User>, ApiError> {
        debug!("Fetching user by ID: {}", id);
        let object_id = ObjectId::parse_str(id)
            .map_err(|_| ApiError::BadRequest(ERR_INVALID_USER_ID.to_string()))?;

        self.repository.find_by_id(object_id).await
    }

    /// Update the authenticated user's profile.
    pub async fn update_profile(
        &self,
        user_id: &str,
        req: UpdateProfileRequest,
    ) -> Result<User, ApiError> {
        info!("Updating profile for user_id: {}", user_id);

        let object_id = ObjectId::parse_str(user_id)
            .map_err(|_| ApiError::BadRequest(ERR_INVALID_USER_ID.to_string()))?;

        let existing_user = self
            .repository
            .find_by_id(object_id)
            .await?
            .ok_or_else(|| {
                warn!("Update failed: User not found with id: {}", user_id);
                ApiError::NotFound(ERR_USER_NOT_FOUND.to_string())
            })?;

        let mut update_doc = doc! {};

        if let Some(ref name) = req.name {
            if *name != existing_user.name {
                update_doc.insert("name", name.clone());
            }
        }

        if let Some(ref new_email) = req.email {
            let normalized_email = new_email.to_lowercase();
            if normalized_email != existing_user.email {
                if let Some(other) = self.repository.find_by_email(&normalized_email).await? {
                    if other.id != existing_user.id {
                        warn!(
                            "Update failed: email {} already taken",
                            mask_email(&normalized_email)
                        );
                        return Err(ApiError::Conflict(ERR_EMAIL_EXISTS.to_string()));
                    }
                }
                update_doc.insert("email", normalized_email);
            }
        }

        if let Some(ref password) = req.password {
            update_doc.insert("password_hash", hash_password(password)?);
        }

        if update_doc.is_empty() {
            debug!("No changes detected for user: {}", user_id);
            return Ok(existing_user);
        }

        self.repository.update(object_id, update_doc).await?;
        info!("Successfully updated user: {}", user_id);

        self.repository
            .find_by_id(object_id)
            .await?
            .ok_or_else(|| ApiError::InternalServerError(ERR_FAILED_FETCH_USER.to_string()))
    }

    /// Record a new avatar url for the user.
    pub async fn update_avatar(
        &self,
        user_id: &str,
        public_id: &str,
        url: &str,
    ) -> Result<User, ApiError> {
        let object_id = ObjectId::parse_str(user_id)
            .map_err(|_| ApiError::BadRequest(ERR_INVALID_USER_ID.to_string()))?;

        self.repository
            .update(
                object_id,
                doc! { "avatar": { "public_id": public_id, "url": url } },
            )
            .await?;

        self.repository
            .find_by_id(object_id)
            .await?
            .ok_or_else(|| ApiError::NotFound(ERR_USER_NOT_FOUND.to_string()))
    }

    /// List users with pagination, role filter, and search (admin only).
    pub async fn list_users(
        &self,
        request: PageRequest,
        role_filter: Option<&str>,
        search_query: Option<&str>,
    ) -> Result<Page<UserResponse>, ApiError> {
        let mut filter = doc! {};

        if let Some(role) = role_filter {
            filter.insert("role", role.to_lowercase());
        }

        if let Some(search) = search_query {
            if !search.trim().is_empty() {
                let pattern = mongodb::bson::Regex {
                    pattern: regex::escape(search.trim()),
                    options: "i".to_string(),
                };
                filter.insert(
                    "$or",
                    vec![
                        doc! { "name": { "$regex": &pattern } },
                        doc! { "email": { "$regex": &pattern } },
                    ],
                );
            }
        }

        debug!("Fetching users with filter: {:?}", filter);

        // Count is computed fresh per request, never cached.
        let total = self.repository.count(filter.clone()).await?;
        let users = self.repository.find_page(filter, request).await?;
        let responses: Vec<UserResponse> = users.into_iter().map(|u| u.into()).collect();

        Ok(Page::from_parts(responses, request, total))
    }
}
