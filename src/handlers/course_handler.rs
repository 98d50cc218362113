//! Public course browsing, enrollment, and purchase handlers.

use actix_web::{web, HttpRequest, HttpResponse};
use log::debug;
use validator::Validate;

use crate::config::CONFIG;
use crate::constants::{ERR_AUTH_REQUIRED, MSG_COURSE_FOUND, MSG_ENROLLED, MSG_PAYMENT_PROCESSED};
use crate::errors::ApiError;
use crate::middleware::RequestExt;
use crate::models::{
    ApiResponse, CourseListQuery, CourseResponse, PaginatedResponse, PurchaseRequest,
    PurchaseResponse,
};
use crate::pagination::PageRequest;
use crate::services::course_service::CourseFilters;
use crate::services::{CourseService, EnrollmentService};
use crate::validators::validation_errors_to_api_error;

/// List courses with optional filters, paginated
///
/// Unparseable or missing `page`/`page_size` values silently fall back to
/// defaults; requesting a page past the end returns an empty data list.
#[utoipa::path(
    get,
    path = "/api/courses",
    tag = "Courses",
    params(CourseListQuery),
    responses(
        (status = 200, description = "Paginated course list", body = PaginatedResponse<CourseResponse>)
    )
)]
pub async fn list_courses(
    course_service: web::Data<CourseService>,
    query: web::Query<CourseListQuery>,
) -> Result<HttpResponse, ApiError> {
    let query = query.into_inner();

    let request = PageRequest::resolve(
        query.page.as_deref(),
        query.page_size.as_deref(),
        CONFIG.default_page_size,
    )?;

    debug!(
        "Listing courses: page {} size {}",
        request.page, request.page_size
    );

    let page = course_service
        .list_courses(
            CourseFilters {
                difficulty: query.difficulty,
                topic_tags: query.topic_tags,
            },
            request,
        )
        .await?;

    Ok(HttpResponse::Ok().json(PaginatedResponse::from(page)))
}

/// Get a single course by id
#[utoipa::path(
    get,
    path = "/api/courses/{id}",
    tag = "Courses",
    params(
        ("id" = String, Path, description = "Course ID")
    ),
    responses(
        (status = 200, description = "Course found", body = CourseResponse),
        (status = 404, description = "Course not found", body = crate::models::ErrorResponse)
    )
)]
pub async fn get_course(
    course_service: web::Data<CourseService>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let course = course_service.get_course_by_id(&path.into_inner()).await?;
    let response: CourseResponse = course.into();

    Ok(HttpResponse::Ok().json(ApiResponse::success(MSG_COURSE_FOUND, response)))
}

/// Find courses by topic tag, case-insensitive
#[utoipa::path(
    get,
    path = "/api/courses/topic/{topic}",
    tag = "Courses",
    params(
        ("topic" = String, Path, description = "Topic tag to search for")
    ),
    responses(
        (status = 200, description = "Matching courses", body = [CourseResponse])
    )
)]
pub async fn get_courses_by_topic(
    course_service: web::Data<CourseService>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let courses = course_service
        .get_courses_by_topic(&path.into_inner())
        .await?;

    if courses.is_empty() {
        return Ok(HttpResponse::Ok().json(ApiResponse::<()>::message("No Course Found")));
    }

    Ok(HttpResponse::Ok().json(ApiResponse::success(MSG_COURSE_FOUND, courses)))
}

/// Enroll the authenticated user in a course
#[utoipa::path(
    post,
    path = "/api/courses/{id}/enroll",
    tag = "Courses",
    params(
        ("id" = String, Path, description = "Course ID")
    ),
    responses(
        (status = 200, description = "Enrolled successfully", body = CourseResponse),
        (status = 401, description = "Unauthorized", body = crate::models::ErrorResponse),
        (status = 404, description = "Course not found", body = crate::models::ErrorResponse),
        (status = 409, description = "Already enrolled", body = crate::models::ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn enroll(
    enrollment_service: web::Data<EnrollmentService>,
    path: web::Path<String>,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let claims = req
        .get_claims()
        .ok_or_else(|| ApiError::Unauthorized(ERR_AUTH_REQUIRED.to_string()))?;

    let course = enrollment_service
        .enroll(&claims.sub, &path.into_inner())
        .await?;
    let response: CourseResponse = course.into();

    Ok(HttpResponse::Ok().json(ApiResponse::success(MSG_ENROLLED, response)))
}

/// Create a payment order for an enrolled course
///
/// Creates an order at the payment gateway for the course's discounted
/// price and records the purchase. Settlement is not verified here.
#[utoipa::path(
    post,
    path = "/api/courses/{id}/purchase",
    tag = "Courses",
    params(
        ("id" = String, Path, description = "Course ID")
    ),
    request_body = PurchaseRequest,
    responses(
        (status = 200, description = "Payment order created", body = PurchaseResponse),
        (status = 400, description = "Not enrolled in the course", body = crate::models::ErrorResponse),
        (status = 401, description = "Unauthorized", body = crate::models::ErrorResponse),
        (status = 409, description = "Already purchased", body = crate::models::ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn purchase(
    enrollment_service: web::Data<EnrollmentService>,
    path: web::Path<String>,
    body: web::Json<PurchaseRequest>,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let claims = req
        .get_claims()
        .ok_or_else(|| ApiError::Unauthorized(ERR_AUTH_REQUIRED.to_string()))?;

    body.validate().map_err(validation_errors_to_api_error)?;

    let (order, course) = enrollment_service
        .purchase(&claims.sub, &path.into_inner(), &body.currency)
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        MSG_PAYMENT_PROCESSED,
        PurchaseResponse {
            order_id: order.id,
            amount: order.amount,
            currency: order.currency,
            course: course.into(),
        },
    )))
}
