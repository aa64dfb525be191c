use bcrypt::{hash, verify, DEFAULT_COST};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use authz::Claims;
use common::errors::AppError;

use crate::domain::{User, UserPublic};
use crate::repo::UserRepository;

use super::db_error;

const ACCESS_TOKEN_TTL_HOURS: i64 = 24;
const VERIFICATION_TOKEN_TTL_HOURS: i64 = 1;

/// Claims carried by the account-verification token.
#[derive(Serialize, Deserialize)]
struct VerificationClaims {
    sub: String,
    user_id: i32,
    exp: i64,
}

/// A profile already checked by the external OAuth collaborator; this service
/// only upserts the matching local record.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalIdentity {
    pub email: String,
    pub full_name: String,
    #[serde(default)]
    pub verified: bool,
}

#[derive(Clone)]
pub struct AuthService {
    user_repo: UserRepository,
    jwt_secret: String,
}

impl AuthService {
    pub fn new(user_repo: UserRepository, jwt_secret: String) -> Self {
        Self {
            user_repo,
            jwt_secret,
        }
    }

    pub async fn register(
        &self,
        full_name: &str,
        email: &str,
        password: &str,
    ) -> Result<UserPublic, AppError> {
        let full_name = full_name.trim();
        let email = email.trim().to_lowercase();
        validate_registration(full_name, &email, password)?;

        if self.user_repo.email_exists(&email).await.map_err(db_error)? {
            return Err(AppError::Validation("Email already registered".to_string()));
        }

        let hashed_password = hash(password, DEFAULT_COST).map_err(|e| {
            tracing::error!("Failed to hash password: {}", e);
            AppError::Internal
        })?;

        let user_id = self
            .user_repo
            .create(full_name, &email, &hashed_password, false)
            .await
            .map_err(db_error)?;

        // No mailer in this deployment; the token is logged for the operator
        // to forward.
        let verification_token = mint_verification_token(&self.jwt_secret, user_id, &email)?;
        tracing::info!(user = %email, "verification token issued: {}", verification_token);

        let user = self
            .user_repo
            .find_by_id(user_id)
            .await
            .map_err(db_error)?
            .ok_or(AppError::Internal)?;

        Ok(user.into())
    }

    pub async fn verify_user(&self, token: &str) -> Result<(), AppError> {
        let claims = decode_verification_token(&self.jwt_secret, token)?;

        let user = self
            .user_repo
            .find_by_id(claims.user_id)
            .await
            .map_err(db_error)?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        if !user.is_verified {
            self.user_repo.mark_verified(user.id).await.map_err(db_error)?;
        }

        Ok(())
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<(String, UserPublic), AppError> {
        let email = email.trim().to_lowercase();
        let user = self
            .user_repo
            .find_by_email(&email)
            .await
            .map_err(db_error)?
            .ok_or(AppError::Unauthorized)?;

        // Accounts created from an external identity carry no local password.
        if user.password.is_empty() {
            return Err(AppError::Unauthorized);
        }

        let password_match = verify(password, &user.password).map_err(|e| {
            tracing::error!("Password verification failed: {}", e);
            AppError::Internal
        })?;

        if !password_match {
            return Err(AppError::Unauthorized);
        }

        let token = mint_access_token(&self.jwt_secret, &user)?;
        Ok((token, user.into()))
    }

    pub async fn login_with_external_identity(
        &self,
        profile: ExternalIdentity,
    ) -> Result<(String, UserPublic), AppError> {
        let email = profile.email.trim().to_lowercase();

        let user = match self.user_repo.find_by_email(&email).await.map_err(db_error)? {
            Some(user) => user,
            None => {
                let user_id = self
                    .user_repo
                    .create(profile.full_name.trim(), &email, "", profile.verified)
                    .await
                    .map_err(db_error)?;
                self.user_repo
                    .find_by_id(user_id)
                    .await
                    .map_err(db_error)?
                    .ok_or(AppError::Internal)?
            }
        };

        let token = mint_access_token(&self.jwt_secret, &user)?;
        Ok((token, user.into()))
    }

    pub async fn list_users(&self) -> Result<Vec<UserPublic>, AppError> {
        let users = self.user_repo.list_all().await.map_err(db_error)?;
        Ok(users.into_iter().map(UserPublic::from).collect())
    }

    pub async fn make_admin(&self, id: i32) -> Result<UserPublic, AppError> {
        let user = self
            .user_repo
            .find_by_id(id)
            .await
            .map_err(db_error)?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        if !user.is_admin {
            self.user_repo.set_admin(user.id).await.map_err(db_error)?;
        }

        let mut public = UserPublic::from(user);
        public.is_admin = true;
        Ok(public)
    }
}

fn validate_registration(full_name: &str, email: &str, password: &str) -> Result<(), AppError> {
    if full_name.chars().count() < 3 {
        return Err(AppError::Validation(
            "FullName should not be less than 3 letters".to_string(),
        ));
    }
    if !full_name
        .chars()
        .all(|c| c.is_ascii_alphabetic() || c == ' ')
    {
        return Err(AppError::Validation(
            "FullName should only contain alphabets".to_string(),
        ));
    }
    if !is_valid_email(email) {
        return Err(AppError::Validation("Invalid email format".to_string()));
    }
    if password.chars().count() < 6 {
        return Err(AppError::Validation(
            "Password must be at least 6 characters".to_string(),
        ));
    }
    Ok(())
}

fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.is_empty() || local.contains(' ') || domain.contains(' ') {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}

fn mint_access_token(secret: &str, user: &User) -> Result<String, AppError> {
    let expiration = Utc::now()
        .checked_add_signed(Duration::hours(ACCESS_TOKEN_TTL_HOURS))
        .ok_or(AppError::Internal)?
        .timestamp();

    let claims = Claims {
        sub: user.email.clone(),
        user_id: user.id,
        is_admin: user.is_admin,
        is_super_admin: user.is_super_admin,
        exp: expiration,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| {
        tracing::error!("Token generation failed: {}", e);
        AppError::Internal
    })
}

fn mint_verification_token(secret: &str, user_id: i32, email: &str) -> Result<String, AppError> {
    let expiration = Utc::now()
        .checked_add_signed(Duration::hours(VERIFICATION_TOKEN_TTL_HOURS))
        .ok_or(AppError::Internal)?
        .timestamp();

    let claims = VerificationClaims {
        sub: email.to_string(),
        user_id,
        exp: expiration,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| {
        tracing::error!("Token generation failed: {}", e);
        AppError::Internal
    })
}

fn decode_verification_token(secret: &str, token: &str) -> Result<VerificationClaims, AppError> {
    let validation = Validation::new(Algorithm::HS256);
    decode::<VerificationClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|_| AppError::Validation("Invalid or expired verification token".to_string()))
}
