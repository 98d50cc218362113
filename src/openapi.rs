use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::models::{
    AddModulesRequest, AuthResponse, CourseModule, CourseResponse, CreateCourseFields,
    DifficultyLevel, ErrorResponse, HealthResponse, LoginRequest, PurchaseRequest,
    PurchaseResponse, RegisterRequest, Role, UpdatePricingRequest, UpdateProfileRequest,
    UserResponse,
};

/// OpenAPI documentation for the DevCourses API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "DevCourses API",
        version = "1.0.0",
        description = "E-learning platform backend: user accounts, course catalog, enrollment, payments, and admin content management.",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    tags(
        (name = "Health", description = "Health check endpoints"),
        (name = "Authentication", description = "User registration, login, and logout"),
        (name = "Users", description = "Authenticated user's profile and purchased courses"),
        (name = "Courses", description = "Course browsing, enrollment, and purchase"),
        (name = "Admin", description = "Admin-only course content management and user listing")
    ),
    paths(
        crate::handlers::register,
        crate::handlers::login,
        crate::handlers::logout,
        crate::handlers::get_current_user,
        crate::handlers::update_profile,
        crate::handlers::upload_avatar,
        crate::handlers::get_purchased_courses,
        crate::handlers::list_courses,
        crate::handlers::get_course,
        crate::handlers::get_courses_by_topic,
        crate::handlers::enroll,
        crate::handlers::purchase,
        crate::handlers::create_course,
        crate::handlers::add_modules,
        crate::handlers::update_pricing,
        crate::handlers::upload_video,
        crate::handlers::delete_course,
        crate::handlers::list_users,
        crate::routes::health_check
    ),
    components(
        schemas(
            RegisterRequest,
            LoginRequest,
            UpdateProfileRequest,
            CreateCourseFields,
            UpdatePricingRequest,
            AddModulesRequest,
            PurchaseRequest,
            Role,
            DifficultyLevel,
            CourseModule,
            UserResponse,
            AuthResponse,
            CourseResponse,
            PurchaseResponse,
            ErrorResponse,
            HealthResponse
        )
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}
