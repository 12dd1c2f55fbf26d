//! Handlers for the `/subjects` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use schoolrec_core::error::CoreError;
use schoolrec_core::types::DbId;
use schoolrec_db::models::subject::{CreateSubject, Subject, UpdateSubject};
use schoolrec_db::repositories::{GuardedDelete, SubjectRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::MessageResponse;
use crate::state::AppState;

/// GET /api/subjects
pub async fn list_subjects(
    State(state): State<AppState>,
    _user: AuthUser,
) -> AppResult<Json<Vec<Subject>>> {
    let subjects = SubjectRepo::list(&state.pool).await?;
    Ok(Json(subjects))
}

/// GET /api/subjects/{id}
pub async fn get_subject(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Subject>> {
    let subject = SubjectRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Subject",
            id,
        }))?;
    Ok(Json(subject))
}

/// POST /api/subjects
pub async fn create_subject(
    State(state): State<AppState>,
    _user: AuthUser,
    Json(input): Json<CreateSubject>,
) -> AppResult<(StatusCode, Json<Subject>)> {
    if SubjectRepo::find_by_code(&state.pool, &input.code)
        .await?
        .is_some()
    {
        return Err(AppError::Core(CoreError::Conflict(
            "Subject code already exists".into(),
        )));
    }

    let subject = SubjectRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(subject)))
}

/// PUT /api/subjects/{id}
pub async fn update_subject(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateSubject>,
) -> AppResult<Json<Subject>> {
    if let Some(code) = &input.code {
        let duplicate = SubjectRepo::find_by_code(&state.pool, code).await?;
        if duplicate.is_some_and(|other| other.id != id) {
            return Err(AppError::Core(CoreError::Conflict(
                "Subject code already exists".into(),
            )));
        }
    }

    let subject = SubjectRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Subject",
            id,
        }))?;
    Ok(Json(subject))
}

/// DELETE /api/subjects/{id}
///
/// Refuses while any score references the subject.
pub async fn delete_subject(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<MessageResponse>> {
    match SubjectRepo::delete(&state.pool, id).await? {
        GuardedDelete::Deleted => Ok(Json(MessageResponse::new("Subject deleted successfully"))),
        GuardedDelete::Blocked(_) => Err(AppError::Core(CoreError::PreconditionFailed(
            "Cannot delete subject with existing scores".into(),
        ))),
        GuardedDelete::NotFound => Err(AppError::Core(CoreError::NotFound {
            entity: "Subject",
            id,
        })),
    }
}
