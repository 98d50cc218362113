//! Handlers for the authenticated user's profile and purchased courses.

use actix_multipart::Multipart;
use actix_web::{web, HttpRequest, HttpResponse};
use log::{debug, info, warn};
use validator::Validate;

use crate::config::CONFIG;
use crate::constants::{
    ERR_AUTH_REQUIRED, ERR_NO_AVATAR_FILE, ERR_USER_NOT_FOUND, MSG_PROFILE_RETRIEVED,
    MSG_PROFILE_UPDATED,
};
use crate::errors::ApiError;
use crate::middleware::RequestExt;
use crate::models::{
    ApiResponse, CourseResponse, PageQuery, PaginatedResponse, UpdateProfileRequest, UserResponse,
};
use crate::pagination::{paginate, PageRequest};
use crate::services::{EnrollmentService, FileService, UserService};
use crate::validators::{validation_errors_to_api_error, UploadKind};

/// Get the currently authenticated user's profile
#[utoipa::path(
    get,
    path = "/api/users/me",
    tag = "Users",
    responses(
        (status = 200, description = "Current user profile", body = UserResponse),
        (status = 401, description = "Unauthorized", body = crate::models::ErrorResponse),
        (status = 404, description = "User not found", body = crate::models::ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_current_user(
    user_service: web::Data<UserService>,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let claims = req
        .get_claims()
        .ok_or_else(|| ApiError::Unauthorized(ERR_AUTH_REQUIRED.to_string()))?;

    debug!("Fetching current user with id: {}", claims.sub);

    let user = user_service
        .get_user_by_id(&claims.sub)
        .await?
        .ok_or_else(|| {
            warn!("Current user not found with id: {}", claims.sub);
            ApiError::NotFound(ERR_USER_NOT_FOUND.to_string())
        })?;

    let user_response: UserResponse = user.into();
    Ok(HttpResponse::Ok().json(ApiResponse::success(MSG_PROFILE_RETRIEVED, user_response)))
}

/// Update the authenticated user's profile
#[utoipa::path(
    put,
    path = "/api/users/me",
    tag = "Users",
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Profile updated", body = UserResponse),
        (status = 400, description = "Validation error", body = crate::models::ErrorResponse),
        (status = 401, description = "Unauthorized", body = crate::models::ErrorResponse),
        (status = 409, description = "Email already registered", body = crate::models::ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn update_profile(
    user_service: web::Data<UserService>,
    body: web::Json<UpdateProfileRequest>,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let claims = req
        .get_claims()
        .ok_or_else(|| ApiError::Unauthorized(ERR_AUTH_REQUIRED.to_string()))?;

    body.validate().map_err(validation_errors_to_api_error)?;

    let user = user_service
        .update_profile(&claims.sub, body.into_inner())
        .await?;
    let user_response: UserResponse = user.into();

    Ok(HttpResponse::Ok().json(ApiResponse::success(MSG_PROFILE_UPDATED, user_response)))
}

/// Upload an avatar image for the authenticated user
#[utoipa::path(
    post,
    path = "/api/users/me/avatar",
    tag = "Users",
    responses(
        (status = 200, description = "Avatar uploaded", body = UserResponse),
        (status = 400, description = "Invalid file", body = crate::models::ErrorResponse),
        (status = 401, description = "Unauthorized", body = crate::models::ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn upload_avatar(
    user_service: web::Data<UserService>,
    file_service: web::Data<FileService>,
    mut payload: Multipart,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let claims = req
        .get_claims()
        .ok_or_else(|| ApiError::Unauthorized(ERR_AUTH_REQUIRED.to_string()))?;

    let (stored, _) = file_service
        .save_upload(&claims.sub, UploadKind::Avatar, &mut payload)
        .await?;
    let stored =
        stored.ok_or_else(|| ApiError::BadRequest(ERR_NO_AVATAR_FILE.to_string()))?;

    let user = user_service
        .update_avatar(&claims.sub, &stored.public_id, &stored.url)
        .await?;
    let user_response: UserResponse = user.into();

    info!("Avatar uploaded for user {}", claims.sub);
    Ok(HttpResponse::Ok().json(ApiResponse::success("Avatar uploaded successfully", user_response)))
}

/// List the authenticated user's purchased courses, paginated
///
/// The user's purchases are fetched as one collection and sliced in
/// memory by the pagination core.
#[utoipa::path(
    get,
    path = "/api/users/me/courses",
    tag = "Users",
    params(PageQuery),
    responses(
        (status = 200, description = "Purchased courses", body = PaginatedResponse<CourseResponse>),
        (status = 401, description = "Unauthorized", body = crate::models::ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_purchased_courses(
    enrollment_service: web::Data<EnrollmentService>,
    query: web::Query<PageQuery>,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let claims = req
        .get_claims()
        .ok_or_else(|| ApiError::Unauthorized(ERR_AUTH_REQUIRED.to_string()))?;

    let request = PageRequest::resolve(
        query.page.as_deref(),
        query.page_size.as_deref(),
        CONFIG.default_page_size,
    )?;

    let courses = enrollment_service.purchased_courses(&claims.sub).await?;
    let page = paginate(&courses, request);

    Ok(HttpResponse::Ok().json(PaginatedResponse::from(page)))
}
