//! Class entity model, DTOs, and list projections.

use schoolrec_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `classes` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Class {
    pub id: DbId,
    pub name: String,
    pub grade_id: DbId,
    pub academic_year_id: DbId,
    pub homeroom_teacher_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// List projection: a class joined with its grade/year names and the number
/// of enrolled students.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassSummary {
    pub id: DbId,
    pub name: String,
    pub grade_id: DbId,
    pub grade_name: String,
    pub academic_year_id: DbId,
    pub academic_year_name: String,
    pub homeroom_teacher_id: Option<DbId>,
    pub enrollment_count: i64,
}

/// DTO for creating a new class.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateClass {
    pub name: String,
    pub grade_id: DbId,
    pub academic_year_id: DbId,
    pub homeroom_teacher_id: Option<DbId>,
}

/// DTO for updating an existing class.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateClass {
    pub name: Option<String>,
    pub grade_id: Option<DbId>,
    pub academic_year_id: Option<DbId>,
    pub homeroom_teacher_id: Option<DbId>,
}
