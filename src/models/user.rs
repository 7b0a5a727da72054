//! User model for storage and API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// User row as stored. The password hash never leaves this type;
/// API responses go through [`PublicUser`].
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    /// Email, stored trimmed and lowercased
    pub email: String,
    /// Argon2id PHC string
    pub password_hash: String,
    /// Optional display name
    pub name: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Projection safe to return to clients.
    pub fn public(&self) -> PublicUser {
        PublicUser {
            id: self.id,
            email: self.email.clone(),
            name: self.name.clone(),
            created_at: self.created_at,
        }
    }
}

/// User fields exposed over the API.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicUser {
    pub id: i64,
    pub email: String,
    pub name: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Registration request body.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[validate(email(message = "must be a valid email address"))]
    pub email: String,
    #[validate(length(min = 6, message = "must be at least 6 characters"))]
    pub password: String,
    pub name: Option<String>,
}

/// Login request body.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Normalize an email for storage and lookup: trim and lowercase.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
