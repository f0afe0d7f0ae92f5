mod api;
mod client;
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
    let port = env::var("PORT").unwrap_or_else(|_| "8080".to_string());
    let database_url = env::var("DATABASE_URL")
        .unwrap_or_else(|_| "mongodb://127.0.0.1:27017/youtube_clone_db".to_string());

    log::info!("🚀 Starting Tube Service...");
    log::info!("📊 Database: {}", database_url);

    // Initialize MongoDB connection (creates the unique indexes the
    // conflict paths rely on)
    let db = database::MongoDB::new(&database_url)
        .await
        .expect("Failed to connect to MongoDB");

    let db_data = web::Data::new(db.clone());

    log::info!("✅ MongoDB connected successfully");
    log::info!("🌐 Server starting on {}:{}", host, port);
    log::info!("📚 Swagger UI available at: http://{}:{}/swagger-ui/", host, port);
    log::info!("📄 OpenAPI spec at: http://{}:{}/api-docs/openapi.json", host, port);

    // Start HTTP server
    HttpServer::new(move || {
        let frontend_url =
            env::var("FRONTEND_URL").unwrap_or_else(|_| "http://localhost:5173".to_string());

        let cors = Cors::default()
            .allowed_origin(&frontend_url)
            .allowed_origin("http://localhost:3000")
            .allowed_origin("http://localhost:5173")
            .allowed_origin("http://127.0.0.1:3000")
            .allowed_origin("http://127.0.0.1:5173")
            .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
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
            // Swagger UI
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", openapi.clone()),
            )
            // Health check
            .route("/health", web::get().to(api::health::health_check))
            // Application API. The gate lets GETs plus register/login pass;
            // every other route resolves the bearer token to a live user.
            .service(
                web::scope("/api")
                    .wrap(middleware::auth::AuthMiddleware)
                    // Auth endpoints
                    .route("/register", web::post().to(api::auth::register))
                    .route("/login", web::post().to(api::auth::login))
                    // Channels
                    .route("/channel", web::post().to(api::channels::create_channel))
                    .route("/channel/{handle}", web::get().to(api::channels::get_channel))
                    // Videos
                    .route("/videos", web::get().to(api::videos::list_videos))
                    .route("/video", web::post().to(api::videos::create_video))
                    .route("/video/{id}", web::get().to(api::videos::get_video))
                    .route("/video/{id}", web::delete().to(api::videos::delete_video))
                    .route("/video/{id}/edit", web::post().to(api::videos::update_video))
                    // Comments (embedded in the video document)
                    .route("/video/{id}/comment", web::post().to(api::comments::add_comment))
                    .route("/video/{id}/comment", web::delete().to(api::comments::delete_comment))
                    .route(
                        "/video/{id}/comment/edit",
                        web::post().to(api::comments::edit_comment),
                    )
                    // Engagement counters
                    .route(
                        "/video/{id}/interact",
                        web::post().to(api::interactions::interact),
                    ),
            )
    })
    .bind(format!("{}:{}", host, port))?
    .run()
    .await
}
