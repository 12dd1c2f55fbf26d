//! Parent entity model and DTOs.
//!
//! The portal password hash is write-only: the column is never part of the
//! selected column list, so no read path can leak it.

use schoolrec_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `parents` table, minus the password hash.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Parent {
    pub id: DbId,
    pub full_name: String,
    pub phone: String,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for inserting a parent. `password_hash` is already hashed by the
/// caller; plaintext never reaches this layer.
#[derive(Debug, Clone)]
pub struct CreateParent {
    pub full_name: String,
    pub phone: String,
    pub password_hash: Option<String>,
}

/// DTO for updating an existing parent.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateParent {
    pub full_name: Option<String>,
    pub phone: Option<String>,
}
