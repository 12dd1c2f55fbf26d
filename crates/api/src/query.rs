//! Shared query parameter types for API handlers.

use schoolrec_core::types::DbId;
use serde::Deserialize;

/// Generic pagination + search parameters (`?page=&limit=&search=`).
///
/// Values are normalized via `PageRequest::new` before reaching a repository.
#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub search: Option<String>,
}

/// Filters for the class list endpoint.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassListParams {
    pub academic_year_id: Option<DbId>,
    pub grade_id: Option<DbId>,
}

/// Filters for the score list endpoint. Class and student filters travel
/// through the enrollment join.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreListParams {
    pub class_id: Option<DbId>,
    pub student_id: Option<DbId>,
    pub subject_id: Option<DbId>,
}
