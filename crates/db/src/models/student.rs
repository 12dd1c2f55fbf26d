//! Student entity model and DTOs.

use chrono::NaiveDate;
use schoolrec_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `students` table. Students are soft-deleted; default read
/// paths filter `is_deleted = false`.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: DbId,
    pub student_code: String,
    pub full_name: String,
    pub dob: NaiveDate,
    pub gender: String,
    pub parent_id: Option<DbId>,
    pub is_deleted: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new student.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateStudent {
    pub student_code: String,
    pub full_name: String,
    pub dob: NaiveDate,
    pub gender: String,
    pub parent_id: Option<DbId>,
}

/// DTO for updating an existing student.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStudent {
    pub student_code: Option<String>,
    pub full_name: Option<String>,
    pub dob: Option<NaiveDate>,
    pub gender: Option<String>,
    pub parent_id: Option<DbId>,
}
