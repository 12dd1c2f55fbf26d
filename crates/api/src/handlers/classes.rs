//! Handlers for the `/classes` resource and the enrollment ledger beneath it.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use schoolrec_core::error::CoreError;
use schoolrec_core::types::DbId;
use schoolrec_db::models::class::{Class, ClassSummary, CreateClass, UpdateClass};
use schoolrec_db::models::enrollment::{ClassEnrollment, EnrolledStudent};
use schoolrec_db::repositories::{ClassRepo, EnrollmentRepo, GuardedDelete, StudentRepo};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::query::ClassListParams;
use crate::response::MessageResponse;
use crate::state::AppState;

/// Request body for `POST /classes/{id}/students`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrollRequest {
    pub student_id: DbId,
}

/// Detail response: the class row plus its roster.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassDetail {
    #[serde(flatten)]
    pub class: Class,
    pub students: Vec<EnrolledStudent>,
}

/// GET /api/classes?academicYearId=&gradeId=
pub async fn list_classes(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(params): Query<ClassListParams>,
) -> AppResult<Json<Vec<ClassSummary>>> {
    let classes = ClassRepo::list(&state.pool, params.academic_year_id, params.grade_id).await?;
    Ok(Json(classes))
}

/// GET /api/classes/{id}
pub async fn get_class(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<ClassDetail>> {
    let class = ClassRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Class",
            id,
        }))?;
    let students = EnrollmentRepo::list_by_class(&state.pool, id).await?;
    Ok(Json(ClassDetail { class, students }))
}

/// POST /api/classes
///
/// The `(name, academicYearId)` pair must be unique; grade/year/teacher ids
/// must resolve (the FK surfaces as 400 otherwise).
pub async fn create_class(
    State(state): State<AppState>,
    _user: AuthUser,
    Json(input): Json<CreateClass>,
) -> AppResult<(StatusCode, Json<Class>)> {
    if ClassRepo::find_by_name_and_year(&state.pool, &input.name, input.academic_year_id)
        .await?
        .is_some()
    {
        return Err(AppError::Core(CoreError::Conflict(
            "Class name already exists in this academic year".into(),
        )));
    }

    let class = ClassRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(class)))
}

/// PUT /api/classes/{id}
pub async fn update_class(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateClass>,
) -> AppResult<Json<Class>> {
    let existing = ClassRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Class",
            id,
        }))?;

    // Re-check uniqueness with the effective (name, year) pair.
    let name = input.name.as_deref().unwrap_or(&existing.name);
    let year_id = input.academic_year_id.unwrap_or(existing.academic_year_id);
    let duplicate = ClassRepo::find_by_name_and_year(&state.pool, name, year_id).await?;
    if duplicate.is_some_and(|other| other.id != id) {
        return Err(AppError::Core(CoreError::Conflict(
            "Class name already exists in this academic year".into(),
        )));
    }

    let class = ClassRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Class",
            id,
        }))?;
    Ok(Json(class))
}

/// DELETE /api/classes/{id}
///
/// Refuses while any enrollment references the class.
pub async fn delete_class(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<MessageResponse>> {
    match ClassRepo::delete(&state.pool, id).await? {
        GuardedDelete::Deleted => Ok(Json(MessageResponse::new("Class deleted successfully"))),
        GuardedDelete::Blocked(_) => Err(AppError::Core(CoreError::PreconditionFailed(
            "Cannot delete class with existing enrollments".into(),
        ))),
        GuardedDelete::NotFound => Err(AppError::Core(CoreError::NotFound {
            entity: "Class",
            id,
        })),
    }
}

/// GET /api/classes/{id}/students
pub async fn class_roster(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Vec<EnrolledStudent>>> {
    // 404 for a missing class, not an empty roster.
    ClassRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Class",
            id,
        }))?;
    let students = EnrollmentRepo::list_by_class(&state.pool, id).await?;
    Ok(Json(students))
}

/// POST /api/classes/{id}/students
///
/// Enroll a student. The `(studentId, classId)` unique constraint is the
/// authoritative duplicate guard; the lookup here only provides the nicer
/// message when no race is involved.
pub async fn enroll_student(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<EnrollRequest>,
) -> AppResult<(StatusCode, Json<ClassEnrollment>)> {
    ClassRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Class",
            id,
        }))?;
    StudentRepo::find_by_id(&state.pool, input.student_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Student",
            id: input.student_id,
        }))?;

    if EnrollmentRepo::find_by_class_and_student(&state.pool, id, input.student_id)
        .await?
        .is_some()
    {
        return Err(AppError::Core(CoreError::Conflict(
            "Student is already enrolled in this class".into(),
        )));
    }

    let enrollment = EnrollmentRepo::enroll(&state.pool, id, input.student_id).await?;
    Ok((StatusCode::CREATED, Json(enrollment)))
}

/// DELETE /api/classes/{id}/students/{student_id}
///
/// Remove an enrollment. Scores are never cascaded: an enrollment with
/// recorded scores refuses to go away.
pub async fn unenroll_student(
    State(state): State<AppState>,
    _user: AuthUser,
    Path((id, student_id)): Path<(DbId, DbId)>,
) -> AppResult<Json<MessageResponse>> {
    match EnrollmentRepo::unenroll(&state.pool, id, student_id).await? {
        GuardedDelete::Deleted => Ok(Json(MessageResponse::new("Student removed from class"))),
        GuardedDelete::Blocked(_) => Err(AppError::Core(CoreError::PreconditionFailed(
            "Cannot remove enrollment with existing scores".into(),
        ))),
        GuardedDelete::NotFound => Err(AppError::NotFound("Enrollment not found".into())),
    }
}
