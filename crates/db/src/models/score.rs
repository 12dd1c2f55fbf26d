//! Score entity model, DTOs, and joined projections.

use schoolrec_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `scores` table. Keyed by enrollment, not by raw
/// (student, class), so every score provably belongs to a real enrollment.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Score {
    pub id: DbId,
    pub enrollment_id: DbId,
    pub subject_id: DbId,
    pub score_type: String,
    pub value: f64,
    pub semester: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// List/detail projection joining the enrollment back out to student, class,
/// and subject.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreDetail {
    pub id: DbId,
    pub enrollment_id: DbId,
    pub student_id: DbId,
    pub student_code: String,
    pub student_name: String,
    pub class_id: DbId,
    pub class_name: String,
    pub subject_id: DbId,
    pub subject_code: String,
    pub subject_name: String,
    pub score_type: String,
    pub value: f64,
    pub semester: i32,
}

/// DTO for inserting a score. Built by the scoring engine after the
/// enrollment has been resolved and the value validated.
#[derive(Debug, Clone)]
pub struct CreateScore {
    pub enrollment_id: DbId,
    pub subject_id: DbId,
    pub score_type: String,
    pub value: f64,
    pub semester: i32,
}

/// DTO for updating a score. Validated fields only; enrollment is never
/// re-keyed.
#[derive(Debug, Clone, Default)]
pub struct UpdateScore {
    pub score_type: Option<String>,
    pub value: Option<f64>,
    pub semester: Option<i32>,
}
