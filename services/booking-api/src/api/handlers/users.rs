use actix_web::{web, HttpResponse, Responder};
use serde::Deserialize;
use serde_json::json;

use authz::{Authenticated, SuperAdminOnly};
use common::errors::AppError;

use crate::service::{AuthService, ExternalIdentity};

use super::error_response;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub full_name: String,
    pub email: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

pub async fn register(
    auth_service: web::Data<AuthService>,
    request: web::Json<RegisterRequest>,
) -> impl Responder {
    match auth_service
        .register(&request.full_name, &request.email, &request.password)
        .await
    {
        Ok(user) => HttpResponse::Created().json(json!({
            "message": "User registered successfully",
            "data": user
        })),
        Err(e) => error_response(e),
    }
}

pub async fn verify_user(
    auth_service: web::Data<AuthService>,
    token: web::Path<String>,
) -> impl Responder {
    match auth_service.verify_user(&token).await {
        Ok(()) => HttpResponse::Ok().json(json!({
            "message": "User verified successfully"
        })),
        Err(e) => error_response(e),
    }
}

pub async fn login(
    auth_service: web::Data<AuthService>,
    request: web::Json<LoginRequest>,
) -> impl Responder {
    match auth_service.login(&request.email, &request.password).await {
        Ok((token, user)) => HttpResponse::Ok().json(json!({
            "message": "Login successful",
            "data": { "token": token, "user": user }
        })),
        Err(AppError::Unauthorized) => HttpResponse::Unauthorized().json(json!({
            "message": "Invalid credentials"
        })),
        Err(e) => error_response(e),
    }
}

pub async fn google_login(
    auth_service: web::Data<AuthService>,
    profile: web::Json<ExternalIdentity>,
) -> impl Responder {
    match auth_service
        .login_with_external_identity(profile.into_inner())
        .await
    {
        Ok((token, user)) => HttpResponse::Ok().json(json!({
            "message": "Login successful",
            "data": { "token": token, "user": user }
        })),
        Err(e) => error_response(e),
    }
}

pub async fn get_all(
    _principal: Authenticated,
    auth_service: web::Data<AuthService>,
) -> impl Responder {
    match auth_service.list_users().await {
        Ok(users) => HttpResponse::Ok().json(json!({
            "message": "All users",
            "data": users
        })),
        Err(e) => error_response(e),
    }
}

pub async fn make_admin(
    _principal: SuperAdminOnly,
    auth_service: web::Data<AuthService>,
    id: web::Path<i32>,
) -> impl Responder {
    match auth_service.make_admin(*id).await {
        Ok(user) => HttpResponse::Ok().json(json!({
            "message": "User is now an admin",
            "data": user
        })),
        Err(e) => error_response(e),
    }
}
