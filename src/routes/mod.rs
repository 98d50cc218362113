use actix_web::web;

use crate::handlers;
use crate::middleware::AuthMiddleware;
use crate::services::TokenBlacklist;

pub fn configure_routes(cfg: &mut web::ServiceConfig, blacklist: TokenBlacklist) {
    cfg.service(
        web::scope("/api")
            // Health check
            .route("/health", web::get().to(health_check))
            // Auth routes (logout needs a valid token to revoke)
            .service(
                web::scope("/auth")
                    .route("/register", web::post().to(handlers::register))
                    .route("/login", web::post().to(handlers::login))
                    .service(
                        web::scope("/logout")
                            .wrap(AuthMiddleware::new(blacklist.clone()))
                            .route("", web::post().to(handlers::logout)),
                    ),
            )
            // Current user routes (protected)
            .service(
                web::scope("/users")
                    .wrap(AuthMiddleware::new(blacklist.clone()))
                    .route("/me", web::get().to(handlers::get_current_user))
                    .route("/me", web::put().to(handlers::update_profile))
                    .route("/me/avatar", web::post().to(handlers::upload_avatar))
                    // Purchased courses, paginated in memory
                    .route("/me/courses", web::get().to(handlers::get_purchased_courses)),
            )
            // Course routes (browsing is public, enrollment/purchase protected)
            .service(
                web::scope("/courses")
                    .route("", web::get().to(handlers::list_courses))
                    .route("/topic/{topic}", web::get().to(handlers::get_courses_by_topic))
                    .route("/{id}", web::get().to(handlers::get_course))
                    .service(
                        web::scope("/{id}")
                            .wrap(AuthMiddleware::new(blacklist.clone()))
                            .route("/enroll", web::post().to(handlers::enroll))
                            .route("/purchase", web::post().to(handlers::purchase)),
                    ),
            )
            // Admin routes (protected, admin only)
            .service(
                web::scope("/admin")
                    .wrap(AuthMiddleware::new(blacklist))
                    .route("/courses", web::post().to(handlers::create_course))
                    .route(
                        "/courses/{id}/modules",
                        web::post().to(handlers::add_modules),
                    )
                    .route(
                        "/courses/{id}/pricing",
                        web::patch().to(handlers::update_pricing),
                    )
                    .route(
                        "/courses/{id}/videos",
                        web::post().to(handlers::upload_video),
                    )
                    .route("/courses/{id}", web::delete().to(handlers::delete_course))
                    .route("/users", web::get().to(handlers::list_users)),
            ),
    );
}

/// Service health check
#[utoipa::path(
    get,
    path = "/api/health",
    tag = "Health",
    responses(
        (status = 200, description = "Server is healthy", body = crate::models::HealthResponse)
    )
)]
pub async fn health_check() -> actix_web::HttpResponse {
    actix_web::HttpResponse::Ok().json(serde_json::json!({
        "status": "OK",
        "message": "Server is running"
    }))
}
