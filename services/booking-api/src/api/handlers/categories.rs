use actix_web::{web, HttpResponse, Responder};
use serde::Deserialize;
use serde_json::json;

use authz::AdminOnly;

use crate::service::CategoryService;

use super::error_response;

#[derive(Deserialize)]
pub struct CreateCategoryRequest {
    pub name: String,
    #[serde(default)]
    pub amenities: Vec<String>,
}

pub async fn create_category(
    _principal: AdminOnly,
    category_service: web::Data<CategoryService>,
    request: web::Json<CreateCategoryRequest>,
) -> impl Responder {
    match category_service
        .create(&request.name, request.amenities.clone())
        .await
    {
        Ok(category) => HttpResponse::Created().json(json!({
            "message": "Category created successfully",
            "data": category
        })),
        Err(e) => error_response(e),
    }
}

pub async fn get_all(category_service: web::Data<CategoryService>) -> impl Responder {
    match category_service.list_with_rooms().await {
        Ok(categories) => HttpResponse::Ok().json(json!({
            "message": "All categories",
            "data": categories
        })),
        Err(e) => error_response(e),
    }
}
