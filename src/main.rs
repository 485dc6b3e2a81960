mod api;
mod database;
mod middleware;
mod models;
mod services;
mod utils;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use dotenv::dotenv;
use std::env;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    // Get configuration from environment
    let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = env::var("PORT").unwrap_or_else(|_| "5000".to_string());
    let database_url = env::var("MONGODB_URI").expect("MONGODB_URI must be set");
    let database_name = env::var("MONGODB_DATABASE").unwrap_or_else(|_| "musicDb".to_string());

    // The signing and processor secrets have no sane defaults; fail at boot
    // rather than on the first request
    env::var("TOKEN_SECRET").expect("TOKEN_SECRET must be set");
    env::var("PAYMENT_SECRET_KEY").expect("PAYMENT_SECRET_KEY must be set");

    log::info!("🚀 Starting Music School Service...");
    log::info!("📊 Database: {}", database_name);

    // Initialize MongoDB connection
    let db = database::MongoDB::new(&database_url, &database_name)
        .await
        .expect("Failed to connect to MongoDB");

    let db_data = web::Data::new(db.clone());

    log::info!("✅ MongoDB connected successfully");

    log::info!("🌐 Server starting on {}:{}", host, port);
    log::info!("📚 Swagger UI available at: http://{}:{}/swagger-ui/", host, port);
    log::info!("📄 OpenAPI spec at: http://{}:{}/api-docs/openapi.json", host, port);

    // Start HTTP server
    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allowed_methods(vec!["GET", "POST", "PATCH", "DELETE", "OPTIONS"])
            .allowed_headers(vec![
                actix_web::http::header::AUTHORIZATION,
                actix_web::http::header::CONTENT_TYPE,
                actix_web::http::header::ACCEPT,
            ])
            .max_age(3600);

        // Generate OpenAPI specification
        let openapi = api::swagger::ApiDoc::openapi();

        App::new()
            .app_data(db_data.clone())
            .wrap(cors)
            .wrap(Logger::default())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", openapi.clone()),
            )
            // Liveness & health
            .route("/", web::get().to(api::health::liveness))
            .route("/health", web::get().to(api::health::health_check))
            // Public catalog
            .route("/instructors", web::get().to(api::users::list_instructors))
            .route("/classes", web::get().to(api::classes::list_classes))
            // Session tokens
            .route("/jwt", web::post().to(api::auth::issue_token))
            // Enrollments - the only token-gated surface
            .service(
                web::scope("/userclasses")
                    .wrap(middleware::auth::AuthMiddleware)
                    .route("", web::post().to(api::enrollments::create_enrollment))
                    .route("", web::get().to(api::enrollments::list_enrollments))
                    .route("/{email}", web::get().to(api::enrollments::list_unpaid)),
            )
            // Payments
            .route(
                "/create-payment-intent",
                web::post().to(api::payments::create_payment_intent),
            )
            .route("/payment/{id}", web::patch().to(api::payments::confirm_payment))
            .route("/payment/{email}", web::get().to(api::payments::list_paid))
            .route(
                "/deleteclass/{id}",
                web::delete().to(api::enrollments::delete_enrollment),
            )
            // User management
            .route("/users", web::post().to(api::users::create_user))
            .route("/users", web::get().to(api::users::list_users))
            .route("/users/admin/{email}", web::get().to(api::users::check_admin))
            .route("/makeadmin/{id}", web::patch().to(api::users::update_role))
            .route("/makeinstructor/{id}", web::patch().to(api::users::update_role))
    })
    .bind(format!("{}:{}", host, port))?
    .run()
    .await
}
