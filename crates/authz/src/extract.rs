use std::future::{ready, Ready};

use actix_web::{dev::Payload, web, Error, FromRequest, HttpRequest};

use crate::jwt::{Claims, JwtValidator};

/// Any request carrying a valid bearer token.
pub struct Authenticated(pub Claims);

/// Valid bearer token whose claims carry the admin flag.
pub struct AdminOnly(pub Claims);

/// Valid bearer token whose claims carry the super-admin flag.
pub struct SuperAdminOnly(pub Claims);

fn claims_from_request(req: &HttpRequest) -> Result<Claims, Error> {
    let validator = req
        .app_data::<web::Data<JwtValidator>>()
        .ok_or_else(|| actix_web::error::ErrorInternalServerError("JWT validator not configured"))?;

    let header = req.headers().get("Authorization").ok_or_else(|| {
        actix_web::error::ErrorUnauthorized(
            serde_json::json!({"message": "Missing authorization header"}),
        )
    })?;

    let header_str = header.to_str().map_err(|_| {
        actix_web::error::ErrorUnauthorized(
            serde_json::json!({"message": "Invalid authorization header"}),
        )
    })?;

    // Extract token from "Bearer <token>"
    let token = header_str.strip_prefix("Bearer ").ok_or_else(|| {
        actix_web::error::ErrorUnauthorized(
            serde_json::json!({"message": "Invalid authorization format"}),
        )
    })?;

    validator.verify_token(token).map_err(|e| {
        actix_web::error::ErrorUnauthorized(
            serde_json::json!({"message": format!("Unauthorized: {}", e)}),
        )
    })
}

impl FromRequest for Authenticated {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(claims_from_request(req).map(Authenticated))
    }
}

impl FromRequest for AdminOnly {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(claims_from_request(req).and_then(|claims| {
            if claims.is_admin || claims.is_super_admin {
                Ok(AdminOnly(claims))
            } else {
                tracing::warn!(user = %claims.sub, "admin route refused");
                Err(actix_web::error::ErrorForbidden(
                    serde_json::json!({"message": "Admin access required"}),
                ))
            }
        }))
    }
}

impl FromRequest for SuperAdminOnly {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(claims_from_request(req).and_then(|claims| {
            if claims.is_super_admin {
                Ok(SuperAdminOnly(claims))
            } else {
                tracing::warn!(user = %claims.sub, "super-admin route refused");
                Err(actix_web::error::ErrorForbidden(
                    serde_json::json!({"message": "Super admin access required"}),
                ))
            }
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;
    use jsonwebtoken::{encode, EncodingKey, Header};
    use std::time::{SystemTime, UNIX_EPOCH};

    const SECRET: &str = "extract-test-secret";

    fn mint(is_admin: bool, is_super_admin: bool) -> String {
        let exp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_secs() as i64
            + 3600;
        let claims = Claims {
            sub: "guest@example.com".to_string(),
            user_id: 1,
            is_admin,
            is_super_admin,
            exp,
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap()
    }

    fn request_with(token: Option<&str>) -> HttpRequest {
        let mut req = TestRequest::default()
            .app_data(web::Data::new(JwtValidator::new(SECRET.to_string())));
        if let Some(token) = token {
            req = req.insert_header(("Authorization", format!("Bearer {}", token)));
        }
        req.to_http_request()
    }

    #[actix_web::test]
    async fn bearer_token_yields_claims() {
        let req = request_with(Some(&mint(false, false)));
        let got = Authenticated::from_request(&req, &mut Payload::None)
            .await
            .unwrap();
        assert_eq!(got.0.sub, "guest@example.com");
    }

    #[actix_web::test]
    async fn missing_header_is_rejected() {
        let req = request_with(None);
        assert!(Authenticated::from_request(&req, &mut Payload::None)
            .await
            .is_err());
    }

    #[actix_web::test]
    async fn admin_gate_refuses_plain_users() {
        let req = request_with(Some(&mint(false, false)));
        assert!(AdminOnly::from_request(&req, &mut Payload::None)
            .await
            .is_err());
    }

    #[actix_web::test]
    async fn admin_gate_accepts_admins_and_super_admins() {
        let req = request_with(Some(&mint(true, false)));
        assert!(AdminOnly::from_request(&req, &mut Payload::None)
            .await
            .is_ok());

        let req = request_with(Some(&mint(false, true)));
        assert!(AdminOnly::from_request(&req, &mut Payload::None)
            .await
            .is_ok());
    }

    #[actix_web::test]
    async fn super_admin_gate_refuses_mere_admins() {
        let req = request_with(Some(&mint(true, false)));
        assert!(SuperAdminOnly::from_request(&req, &mut Payload::None)
            .await
            .is_err());

        let req = request_with(Some(&mint(true, true)));
        assert!(SuperAdminOnly::from_request(&req, &mut Payload::None)
            .await
            .is_ok());
    }
}
