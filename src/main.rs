mod config;
mod constants;
mod errors;
mod handlers;
mod middleware;
mod models;
mod openapi;
mod pagination;
mod repositories;
mod routes;
mod services;
mod utils;
mod validators;

use std::sync::Arc;

use actix_web::{middleware::Logger, web, App, HttpServer};
use log::info;
use mongodb::Client;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::config::CONFIG;
use crate::repositories::{CourseRepository, UserRepository};
use crate::services::{
    AuthService, CourseService, EnrollmentService, FileService, MailService, PaymentService,
    TokenBlacklist, UserService,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    if CONFIG.default_page_size == 0 {
        panic!("DEFAULT_PAGE_SIZE must be at least 1");
    }

    // Connect to MongoDB
    info!("Connecting to MongoDB...");
    let client = Client::with_uri_str(&CONFIG.mongodb_uri)
        .await
        .expect("Failed to connect to MongoDB");

    let db = client.database(&CONFIG.database_name);

    db.run_command(mongodb::bson::doc! { "ping": 1 })
        .await
        .expect("Failed to ping MongoDB");
    info!("Connected to MongoDB successfully!");

    // Repositories are shared across services
    let user_repository = Arc::new(UserRepository::new(&db));
    let course_repository = Arc::new(CourseRepository::new(&db));

    if let Err(e) = user_repository.create_indexes().await {
        log::warn!("Failed to create user indexes: {}", e);
    }
    if let Err(e) = course_repository.create_indexes().await {
        log::warn!("Failed to create course indexes: {}", e);
    }

    let mailer = Arc::new(MailService::new());
    let payments = Arc::new(PaymentService::new());

    let user_service = web::Data::new(UserService::new(
        Arc::clone(&user_repository),
        Arc::clone(&mailer),
    ));
    let auth_service = web::Data::new(AuthService::new(Arc::clone(&user_repository)));
    let course_service = web::Data::new(CourseService::new(Arc::clone(&course_repository)));
    let enrollment_service = web::Data::new(EnrollmentService::new(
        Arc::clone(&user_repository),
        Arc::clone(&course_repository),
        payments,
        mailer,
    ));
    let file_service = web::Data::new(FileService::new());
    let token_blacklist_data = web::Data::new(TokenBlacklist::new());

    // Start HTTP server
    let server_addr = format!("{}:{}", CONFIG.server_host, CONFIG.server_port);
    info!("Starting server at http://{}", server_addr);

    HttpServer::new(move || {
        let blacklist = token_blacklist_data.get_ref().clone();
        App::new()
            .wrap(Logger::default())
            .app_data(user_service.clone())
            .app_data(auth_service.clone())
            .app_data(course_service.clone())
            .app_data(enrollment_service.clone())
            .app_data(file_service.clone())
            .app_data(token_blacklist_data.clone())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", openapi::ApiDoc::openapi()),
            )
            // Uploaded media (thumbnails, videos, avatars)
            .service(actix_files::Files::new("/uploads", &CONFIG.upload_dir))
            .configure(|cfg| routes::configure_routes(cfg, blacklist))
    })
    .bind(&server_addr)?
    .run()
    .await
}
