use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AdminUser {
    pub id: i64,
    pub username: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Public view of an admin account.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AdminInfo {
    pub id: i64,
    pub username: String,
}

impl From<&AdminUser> for AdminInfo {
    fn from(admin: &AdminUser) -> Self {
        AdminInfo {
            id: admin.id,
            username: admin.username.clone(),
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1))]
    pub username: String,

    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    #[validate(length(min = 1))]
    pub current_password: String,

    #[validate(length(min = 8))]
    pub new_password: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub success: bool,
    pub admin: AdminInfo,
    pub token: String,
    pub token_type: String,
    pub expires_at: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // Admin ID
    pub exp: i64,
    pub iat: i64,
}
