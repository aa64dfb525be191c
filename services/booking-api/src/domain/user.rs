use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i32,
    pub full_name: String,
    pub email: String,
    /// Bcrypt hash; empty string for accounts created from an external
    /// identity.
    #[serde(skip_serializing)]
    pub password: String,
    pub is_verified: bool,
    pub is_admin: bool,
    pub is_super_admin: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPublic {
    pub id: i32,
    pub full_name: String,
    pub email: String,
    pub is_verified: bool,
    pub is_admin: bool,
    pub is_super_admin: bool,
}

impl From<User> for UserPublic {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            full_name: user.full_name,
            email: user.email,
            is_verified: user.is_verified,
            is_admin: user.is_admin,
            is_super_admin: user.is_super_admin,
        }
    }
}
