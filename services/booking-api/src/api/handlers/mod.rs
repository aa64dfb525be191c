pub mod categories;
pub mod rooms;
pub mod users;

use actix_web::{HttpResponse, Responder};
use serde::Serialize;
use serde_json::json;

use common::errors::AppError;

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    service: String,
}

pub async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "ok".to_string(),
        service: "booking-api".to_string(),
    })
}

/// Maps service failures onto the wire contract. Database, media-store, and
/// internal failures all collapse to a generic 500; details stay in the
/// server log.
pub(crate) fn error_response(err: AppError) -> HttpResponse {
    match err {
        AppError::NotFound(message) => HttpResponse::NotFound().json(json!({ "message": message })),
        AppError::Validation(message) => {
            HttpResponse::BadRequest().json(json!({ "message": message }))
        }
        AppError::Unauthorized => {
            HttpResponse::Unauthorized().json(json!({ "message": "Unauthorized" }))
        }
        AppError::Forbidden => HttpResponse::Forbidden().json(json!({ "message": "Forbidden" })),
        AppError::Database(_) | AppError::ExternalService(_) | AppError::Internal => {
            HttpResponse::InternalServerError().json(json!({ "message": "Internal Server Error" }))
        }
    }
}
