//! Handlers for the `/grades` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use schoolrec_core::error::CoreError;
use schoolrec_core::reference::validate_grade_level;
use schoolrec_core::types::DbId;
use schoolrec_db::models::grade::{CreateGrade, Grade, UpdateGrade};
use schoolrec_db::repositories::{GradeRepo, GuardedDelete};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::MessageResponse;
use crate::state::AppState;

/// GET /api/grades
pub async fn list_grades(
    State(state): State<AppState>,
    _user: AuthUser,
) -> AppResult<Json<Vec<Grade>>> {
    let grades = GradeRepo::list(&state.pool).await?;
    Ok(Json(grades))
}

/// GET /api/grades/{id}
pub async fn get_grade(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Grade>> {
    let grade = GradeRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Grade",
            id,
        }))?;
    Ok(Json(grade))
}

/// POST /api/grades
pub async fn create_grade(
    State(state): State<AppState>,
    _user: AuthUser,
    Json(input): Json<CreateGrade>,
) -> AppResult<(StatusCode, Json<Grade>)> {
    validate_grade_level(input.level)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    if GradeRepo::find_by_name(&state.pool, &input.name)
        .await?
        .is_some()
    {
        return Err(AppError::Core(CoreError::Conflict(
            "Grade name already exists".into(),
        )));
    }

    let grade = GradeRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(grade)))
}

/// PUT /api/grades/{id}
pub async fn update_grade(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateGrade>,
) -> AppResult<Json<Grade>> {
    if let Some(level) = input.level {
        validate_grade_level(level).map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;
    }

    if let Some(name) = &input.name {
        let duplicate = GradeRepo::find_by_name(&state.pool, name).await?;
        if duplicate.is_some_and(|other| other.id != id) {
            return Err(AppError::Core(CoreError::Conflict(
                "Grade name already exists".into(),
            )));
        }
    }

    let grade = GradeRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Grade",
            id,
        }))?;
    Ok(Json(grade))
}

/// DELETE /api/grades/{id}
///
/// Refuses while any class references the grade.
pub async fn delete_grade(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<MessageResponse>> {
    match GradeRepo::delete(&state.pool, id).await? {
        GuardedDelete::Deleted => Ok(Json(MessageResponse::new("Grade deleted successfully"))),
        GuardedDelete::Blocked(_) => Err(AppError::Core(CoreError::PreconditionFailed(
            "Cannot delete grade with existing classes".into(),
        ))),
        GuardedDelete::NotFound => Err(AppError::Core(CoreError::NotFound {
            entity: "Grade",
            id,
        })),
    }
}
