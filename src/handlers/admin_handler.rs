//! Admin-only handlers for course content management and user listing.

use actix_multipart::Multipart;
use actix_web::{web, HttpRequest, HttpResponse};
use log::info;
use validator::Validate;

use crate::config::CONFIG;
use crate::constants::{
    ERR_ADMIN_ONLY, ERR_AUTH_REQUIRED, ERR_NO_THUMBNAIL_FILE, ERR_NO_VIDEO_FILE,
    MSG_COURSE_CREATED, MSG_COURSE_DELETED, MSG_COURSE_UPDATED, MSG_MODULES_ADDED,
    MSG_VIDEO_UPLOADED,
};
use crate::errors::ApiError;
use crate::middleware::RequestExt;
use crate::models::{
    AddModulesRequest, ApiResponse, Claims, CourseResponse, CreateCourseFields,
    PaginatedResponse, Thumbnail, UpdatePricingRequest, UserListQuery, UserResponse,
};
use crate::pagination::PageRequest;
use crate::services::{CourseService, FileService, UserService};
use crate::validators::{validation_errors_to_api_error, UploadKind};

fn require_admin(req: &HttpRequest) -> Result<Claims, ApiError> {
    let claims = req
        .get_claims()
        .ok_or_else(|| ApiError::Unauthorized(ERR_AUTH_REQUIRED.to_string()))?;

    if !claims.is_admin() {
        return Err(ApiError::Forbidden(ERR_ADMIN_ONLY.to_string()));
    }

    Ok(claims)
}

/// Create a new course with a thumbnail upload
///
/// Multipart request: text fields (title, description, price, discount,
/// topic_tags, difficulty_level) plus a `thumbnail` image file.
#[utoipa::path(
    post,
    path = "/api/admin/courses",
    tag = "Admin",
    responses(
        (status = 201, description = "Course created", body = CourseResponse),
        (status = 400, description = "Validation error or missing thumbnail", body = crate::models::ErrorResponse),
        (status = 401, description = "Unauthorized", body = crate::models::ErrorResponse),
        (status = 403, description = "Admin only", body = crate::models::ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn create_course(
    course_service: web::Data<CourseService>,
    file_service: web::Data<FileService>,
    mut payload: Multipart,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let claims = require_admin(&req)?;

    let (stored, text_fields) = file_service
        .save_upload(&claims.sub, UploadKind::Thumbnail, &mut payload)
        .await?;
    let stored =
        stored.ok_or_else(|| ApiError::BadRequest(ERR_NO_THUMBNAIL_FILE.to_string()))?;

    // The thumbnail is already on disk; remove it if the course never
    // comes into existence.
    let fields = match parse_course_fields(text_fields).and_then(|fields| {
        fields
            .validate()
            .map_err(validation_errors_to_api_error)
            .map(|_| fields)
    }) {
        Ok(fields) => fields,
        Err(e) => {
            let _ = file_service.delete_file(&stored.url);
            return Err(e);
        }
    };

    let course = match course_service
        .create_course(
            &claims.sub,
            fields,
            Thumbnail {
                public_id: stored.public_id.clone(),
                url: stored.url.clone(),
            },
        )
        .await
    {
        Ok(course) => course,
        Err(e) => {
            let _ = file_service.delete_file(&stored.url);
            return Err(e);
        }
    };

    info!("Admin {} created course {}", claims.sub, course.title);
    let response: CourseResponse = course.into();
    Ok(HttpResponse::Created().json(ApiResponse::success(MSG_COURSE_CREATED, response)))
}

/// Append content modules to a course
#[utoipa::path(
    post,
    path = "/api/admin/courses/{id}/modules",
    tag = "Admin",
    params(
        ("id" = String, Path, description = "Course ID")
    ),
    request_body = AddModulesRequest,
    responses(
        (status = 200, description = "Modules added", body = CourseResponse),
        (status = 403, description = "Admin only", body = crate::models::ErrorResponse),
        (status = 404, description = "Course not found", body = crate::models::ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn add_modules(
    course_service: web::Data<CourseService>,
    path: web::Path<String>,
    body: web::Json<AddModulesRequest>,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    require_admin(&req)?;
    body.validate().map_err(validation_errors_to_api_error)?;

    let course = course_service
        .add_modules(&path.into_inner(), body.into_inner().modules)
        .await?;
    let response: CourseResponse = course.into();

    Ok(HttpResponse::Ok().json(ApiResponse::success(MSG_MODULES_ADDED, response)))
}

/// Update a course's price and discount
#[utoipa::path(
    patch,
    path = "/api/admin/courses/{id}/pricing",
    tag = "Admin",
    params(
        ("id" = String, Path, description = "Course ID")
    ),
    request_body = UpdatePricingRequest,
    responses(
        (status = 200, description = "Pricing updated", body = CourseResponse),
        (status = 403, description = "Admin only", body = crate::models::ErrorResponse),
        (status = 404, description = "Course not found", body = crate::models::ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn update_pricing(
    course_service: web::Data<CourseService>,
    path: web::Path<String>,
    body: web::Json<UpdatePricingRequest>,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    require_admin(&req)?;
    body.validate().map_err(validation_errors_to_api_error)?;

    let course = course_service
        .update_pricing(&path.into_inner(), body.price, body.discount)
        .await?;
    let response: CourseResponse = course.into();

    Ok(HttpResponse::Ok().json(ApiResponse::success(MSG_COURSE_UPDATED, response)))
}

/// Upload a video for a course
#[utoipa::path(
    post,
    path = "/api/admin/courses/{id}/videos",
    tag = "Admin",
    params(
        ("id" = String, Path, description = "Course ID")
    ),
    responses(
        (status = 200, description = "Video uploaded", body = CourseResponse),
        (status = 400, description = "Invalid or missing video file", body = crate::models::ErrorResponse),
        (status = 403, description = "Admin only", body = crate::models::ErrorResponse),
        (status = 404, description = "Course not found", body = crate::models::ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn upload_video(
    course_service: web::Data<CourseService>,
    file_service: web::Data<FileService>,
    path: web::Path<String>,
    mut payload: Multipart,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let claims = require_admin(&req)?;
    let course_id = path.into_inner();

    let (stored, _) = file_service
        .save_upload(&claims.sub, UploadKind::Video, &mut payload)
        .await?;
    let stored = stored.ok_or_else(|| ApiError::BadRequest(ERR_NO_VIDEO_FILE.to_string()))?;

    // Remove the stored video if the course turns out not to exist.
    let course = match course_service.add_video(&course_id, &stored.url).await {
        Ok(course) => course,
        Err(e) => {
            let _ = file_service.delete_file(&stored.url);
            return Err(e);
        }
    };
    let response: CourseResponse = course.into();

    Ok(HttpResponse::Ok().json(ApiResponse::success(MSG_VIDEO_UPLOADED, response)))
}

/// Delete a course
#[utoipa::path(
    delete,
    path = "/api/admin/courses/{id}",
    tag = "Admin",
    params(
        ("id" = String, Path, description = "Course ID")
    ),
    responses(
        (status = 200, description = "Course deleted"),
        (status = 403, description = "Admin only", body = crate::models::ErrorResponse),
        (status = 404, description = "Course not found", body = crate::models::ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn delete_course(
    course_service: web::Data<CourseService>,
    path: web::Path<String>,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    require_admin(&req)?;

    course_service.delete_course(&path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::<()>::message(MSG_COURSE_DELETED)))
}

/// List users with pagination, role filter, and search
#[utoipa::path(
    get,
    path = "/api/admin/users",
    tag = "Admin",
    params(UserListQuery),
    responses(
        (status = 200, description = "Paginated user list", body = PaginatedResponse<UserResponse>),
        (status = 403, description = "Admin only", body = crate::models::ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_users(
    user_service: web::Data<UserService>,
    query: web::Query<UserListQuery>,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    require_admin(&req)?;
    let query = query.into_inner();

    let request = PageRequest::resolve(
        query.page.as_deref(),
        query.page_size.as_deref(),
        CONFIG.default_page_size,
    )?;

    let page = user_service
        .list_users(request, query.role.as_deref(), query.search.as_deref())
        .await?;

    Ok(HttpResponse::Ok().json(PaginatedResponse::from(page)))
}

/// Deserialize course creation fields collected from a multipart payload.
fn parse_course_fields(fields: Vec<(String, String)>) -> Result<CreateCourseFields, ApiError> {
    let mut title = None;
    let mut description = None;
    let mut price = None;
    let mut discount = None;
    let mut topic_tags = None;
    let mut difficulty_level = None;

    for (name, value) in fields {
        match name.as_str() {
            "title" => title = Some(value),
            "description" => description = Some(value),
            "price" => {
                price = Some(value.trim().parse::<f64>().map_err(|_| {
                    ApiError::BadRequest("Price must be a number".to_string())
                })?)
            }
            "discount" => {
                discount = Some(value.trim().parse::<f64>().map_err(|_| {
                    ApiError::BadRequest("Discount must be a number".to_string())
                })?)
            }
            "topic_tags" => topic_tags = Some(value),
            "difficulty_level" => difficulty_level = Some(value),
            _ => {}
        }
    }

    let missing = |field: &str| ApiError::BadRequest(format!("Missing field '{}'", field));

    Ok(CreateCourseFields {
        title: title.ok_or_else(|| missing("title"))?,
        description: description.ok_or_else(|| missing("description"))?,
        price: price.ok_or_else(|| missing("price"))?,
        discount: discount.ok_or_else(|| missing("discount"))?,
        topic_tags: topic_tags.ok_or_else(|| missing("topic_tags"))?,
        difficulty_level: difficulty_level.ok_or_else(|| missing("difficulty_level"))?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(name: &str, value: &str) -> (String, String) {
        (name.to_string(), value.to_string())
    }

    #[test]
    fn test_parse_course_fields() {
        let fields = vec![
            field("title", "Rust for Backend Engineers"),
            field("description", "A course"),
            field("price", "499"),
            field("discount", "10"),
            field("topic_tags", "rust,backend"),
            field("difficulty_level", "beginner"),
        ];

        let parsed = parse_course_fields(fields).unwrap();
        assert_eq!(parsed.title, "Rust for Backend Engineers");
        assert_eq!(parsed.price, 499.0);
        assert_eq!(parsed.discount, 10.0);
    }

    #[test]
    fn test_parse_course_fields_missing_field() {
        let fields = vec![field("title", "No price here")];
        assert!(parse_course_fields(fields).is_err());
    }

    #[test]
    fn test_parse_course_fields_bad_number() {
        let fields = vec![
            field("title", "t"),
            field("description", "d"),
            field("price", "not-a-number"),
            field("discount", "0"),
            field("topic_tags", "rust"),
            field("difficulty_level", "beginner"),
        ];
        assert!(parse_course_fields(fields).is_err());
    }
}
