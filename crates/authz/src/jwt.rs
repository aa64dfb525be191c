use jsonwebtoken::{decode, DecodingKey, Validation, Algorithm};
use serde::{Deserialize, Serialize};
use anyhow::{Result, anyhow};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: String,      // email
    pub user_id: i32,
    #[serde(default)]
    pub is_admin: bool,
    #[serde(default)]
    pub is_super_admin: bool,
    pub exp: i64,         // expiration timestamp
}

#[derive(Clone)]
pub struct JwtValidator {
    secret: String,
}

impl JwtValidator {
    pub fn new(secret: String) -> Self {
        Self { secret }
    }

    pub fn verify_token(&self, token: &str) -> Result<Claims> {
        let validation = Validation::new(Algorithm::HS256);

        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &validation,
        )
        .map_err(|e| anyhow!("Invalid token: {}", e))?;

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};
    use std::time::{SystemTime, UNIX_EPOCH};

    fn unix_now() -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_secs() as i64
    }

    fn mint(secret: &str, exp: i64, is_admin: bool, is_super_admin: bool) -> String {
        let claims = Claims {
            sub: "guest@example.com".to_string(),
            user_id: 7,
            is_admin,
            is_super_admin,
            exp,
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn verifies_a_valid_token() {
        let validator = JwtValidator::new("test-secret".to_string());
        let token = mint("test-secret", unix_now() + 3600, true, false);

        let claims = validator.verify_token(&token).unwrap();
        assert_eq!(claims.sub, "guest@example.com");
        assert_eq!(claims.user_id, 7);
        assert!(claims.is_admin);
        assert!(!claims.is_super_admin);
    }

    #[test]
    fn rejects_an_expired_token() {
        let validator = JwtValidator::new("test-secret".to_string());
        let token = mint("test-secret", unix_now() - 3600, false, false);

        assert!(validator.verify_token(&token).is_err());
    }

    #[test]
    fn rejects_a_token_signed_with_another_secret() {
        let validator = JwtValidator::new("test-secret".to_string());
        let token = mint("other-secret", unix_now() + 3600, false, false);

        assert!(validator.verify_token(&token).is_err());
    }
}
