mod api;
mod clients;
mod domain;
mod repo;
mod service;

use std::sync::Arc;

use actix_web::{web, App, HttpServer};
use authz::JwtValidator;
use common::config::AppConfig;

use clients::{HttpMediaStore, MediaStore};
use repo::{CategoryRepository, RoomRepository, UserRepository};
use service::{AuthService, CategoryService, RoomService};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    tracing_subscriber::fmt::init();

    let config = AppConfig::from_env();
    let pool = db::create_pool(&config.database_url)
        .await
        .expect("Failed to create database pool");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    std::fs::create_dir_all(&config.upload_dir).expect("Failed to create upload directory");

    let jwt_secret = std::env::var("JWT_SECRET").unwrap_or_else(|_| {
        tracing::warn!("JWT_SECRET not set, using default secret (INSECURE for production!)");
        "dev-secret-12345".to_string()
    });
    let media_base_url =
        std::env::var("MEDIA_STORE_URL").expect("MEDIA_STORE_URL must be set");
    let media_api_key =
        std::env::var("MEDIA_STORE_API_KEY").expect("MEDIA_STORE_API_KEY must be set");
    let media: Arc<dyn MediaStore> = Arc::new(HttpMediaStore::new(media_base_url, media_api_key));

    let user_repo = UserRepository::new(pool.clone());
    let category_repo = CategoryRepository::new(pool.clone());
    let room_repo = RoomRepository::new(pool.clone());

    let auth_service = AuthService::new(user_repo, jwt_secret.clone());
    let category_service = CategoryService::new(category_repo.clone(), room_repo.clone());
    let room_service = RoomService::new(room_repo, category_repo, media);
    let jwt_validator = JwtValidator::new(jwt_secret);

    let server_address = config.server_address();
    tracing::info!("🏨 Booking API starting on http://{}", server_address);
    tracing::info!("📁 Upload directory: {}", config.upload_dir);

    let config_data = web::Data::new(config);
    HttpServer::new(move || {
        App::new()
            .app_data(config_data.clone())
            .app_data(web::Data::new(auth_service.clone()))
            .app_data(web::Data::new(category_service.clone()))
            .app_data(web::Data::new(room_service.clone()))
            .app_data(web::Data::new(jwt_validator.clone()))
            .configure(api::routes::configure)
    })
    .bind(&server_address)?
    .run()
    .await
}
