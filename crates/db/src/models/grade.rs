//! Grade (year level) entity model and DTOs.

use schoolrec_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `grades` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Grade {
    pub id: DbId,
    pub name: String,
    pub level: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new grade.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGrade {
    pub name: String,
    pub level: i32,
}

/// DTO for updating an existing grade.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateGrade {
    pub name: Option<String>,
    pub level: Option<i32>,
}
