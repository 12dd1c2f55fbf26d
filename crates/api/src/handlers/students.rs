//! Handlers for the `/students` resource.
//!
//! Students are soft-deleted; every default read path filters deleted rows.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use schoolrec_core::error::CoreError;
use schoolrec_core::pagination::PageRequest;
use schoolrec_core::types::DbId;
use schoolrec_db::models::enrollment::StudentEnrollment;
use schoolrec_db::models::student::{CreateStudent, Student, UpdateStudent};
use schoolrec_db::repositories::{EnrollmentRepo, StudentRepo};
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::query::ListParams;
use crate::response::{MessageResponse, Paginated};
use crate::state::AppState;

/// Detail response: the student row plus their class memberships.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentDetail {
    #[serde(flatten)]
    pub student: Student,
    pub enrollments: Vec<StudentEnrollment>,
}

/// GET /api/students?page=&limit=&search=
pub async fn list_students(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(params): Query<ListParams>,
) -> AppResult<Json<Paginated<Student>>> {
    let page = PageRequest::new(params.page, params.limit);
    let search = params.search.as_deref();

    let data = StudentRepo::list(&state.pool, page.limit, page.offset(), search).await?;
    let total = StudentRepo::count(&state.pool, search).await?;

    Ok(Json(Paginated::new(data, total, page)))
}

/// GET /api/students/{id}
pub async fn get_student(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<StudentDetail>> {
    let student = StudentRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Student",
            id,
        }))?;
    let enrollments = EnrollmentRepo::list_by_student(&state.pool, id).await?;
    Ok(Json(StudentDetail {
        student,
        enrollments,
    }))
}

/// POST /api/students
pub async fn create_student(
    State(state): State<AppState>,
    _user: AuthUser,
    Json(input): Json<CreateStudent>,
) -> AppResult<(StatusCode, Json<Student>)> {
    if StudentRepo::find_by_code(&state.pool, &input.student_code)
        .await?
        .is_some()
    {
        return Err(AppError::Core(CoreError::Conflict(
            "Student code already exists".into(),
        )));
    }

    let student = StudentRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(student)))
}

/// PUT /api/students/{id}
pub async fn update_student(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateStudent>,
) -> AppResult<Json<Student>> {
    if let Some(code) = &input.student_code {
        let duplicate = StudentRepo::find_by_code(&state.pool, code).await?;
        if duplicate.is_some_and(|other| other.id != id) {
            return Err(AppError::Core(CoreError::Conflict(
                "Student code already exists".into(),
            )));
        }
    }

    let student = StudentRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Student",
            id,
        }))?;
    Ok(Json(student))
}

/// DELETE /api/students/{id}
///
/// Soft delete: the row survives with `isDeleted = true` for referential
/// history.
pub async fn delete_student(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<MessageResponse>> {
    if !StudentRepo::soft_delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Student",
            id,
        }));
    }
    Ok(Json(MessageResponse::new("Student deleted successfully")))
}
