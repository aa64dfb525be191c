use actix_web::web;

use super::handlers::{self, categories, rooms, users};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(handlers::health_check))
        // users & auth
        .route("/users", web::post().to(users::register))
        .route("/users", web::get().to(users::get_all))
        .route("/verify-user/{token}", web::get().to(users::verify_user))
        .route("/login", web::post().to(users::login))
        .route("/make-admin/{id}", web::patch().to(users::make_admin))
        .route("/auth/google/login", web::post().to(users::google_login))
        // categories
        .route("/category", web::post().to(categories::create_category))
        .route("/category", web::get().to(categories::get_all))
        // rooms (unauthenticated, matching the public contract)
        .route("/room/{id}", web::post().to(rooms::create_room))
        .route("/room/{id}/{imageId}", web::delete().to(rooms::delete_room_image))
        .route(
            "/roomthesecond/{id}/{imageId}",
            web::patch().to(rooms::update_room_image),
        );
}
