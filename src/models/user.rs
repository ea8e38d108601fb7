// src/models/user.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Represents the 'users' table in the database.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct User {
    pub id: i64,

    /// Subject id issued by the identity provider.
    pub provider_subject: String,

    pub email: String,
    pub name: Option<String>,

    /// Avatar URL.
    pub picture: Option<String>,

    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Public view of a user, without the provider subject.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserProfile {
    pub id: i64,
    pub email: String,
    pub name: Option<String>,
    pub picture: Option<String>,
}

impl From<User> for UserProfile {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            name: user.name,
            picture: user.picture,
        }
    }
}

/// Profile handed back by the identity provider after a successful login.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ExternalProfile {
    #[validate(length(min = 1, max = 255))]
    pub sub: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(max = 255))]
    pub name: Option<String>,
    #[validate(url)]
    pub picture: Option<String>,
}

/// Query string of the OAuth redirect back to us.
#[derive(Debug, Deserialize, Validate)]
pub struct AuthCallbackParams {
    #[validate(length(min = 1, max = 2048))]
    pub code: String,
    pub state: Option<String>,
}

/// DTO returned after login.
#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub token: String,
    #[serde(rename = "type")]
    pub token_type: &'static str,
    pub user: UserProfile,
}
