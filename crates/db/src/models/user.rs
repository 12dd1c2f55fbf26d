//! User (teacher/admin) entity model and DTOs.

use schoolrec_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A full row from the `users` table, including the password hash.
///
/// Only the auth path may hold this; everything user-facing goes through
/// [`UserResponse`].
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub username: String,
    pub password_hash: String,
    pub full_name: String,
    pub system_roles: Vec<String>,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Safe projection of a user for API responses. No password hash.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: DbId,
    pub username: String,
    pub full_name: String,
    pub system_roles: Vec<String>,
    pub is_active: bool,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            full_name: user.full_name,
            system_roles: user.system_roles,
            is_active: user.is_active,
        }
    }
}

/// DTO for inserting a user. `password_hash` is already hashed by the caller.
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub username: String,
    pub password_hash: String,
    pub full_name: String,
    pub system_roles: Vec<String>,
}

/// DTO for updating an existing user.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUser {
    pub username: Option<String>,
    #[serde(skip)]
    pub password_hash: Option<String>,
    pub full_name: Option<String>,
    pub system_roles: Option<Vec<String>>,
    pub is_active: Option<bool>,
}
