//! Class enrollment (student <-> class link) model and projections.

use schoolrec_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `class_enrollments` table. The authoritative proof that a
/// student is registered in a class; scores hang off this row.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassEnrollment {
    pub id: DbId,
    pub student_id: DbId,
    pub class_id: DbId,
    pub enrolled_at: Timestamp,
}

/// Projection for listing the members of a class.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrolledStudent {
    pub enrollment_id: DbId,
    pub student_id: DbId,
    pub student_code: String,
    pub full_name: String,
}

/// Projection for listing the classes a student belongs to.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentEnrollment {
    pub enrollment_id: DbId,
    pub class_id: DbId,
    pub class_name: String,
    pub academic_year_id: DbId,
    pub academic_year_name: String,
}
