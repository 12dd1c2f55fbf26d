//! Handlers for the `/academic-years` resource.
//!
//! Home of the active-year invariant: at most one year carries
//! `isCurrent = true`, enforced transactionally by the repository on every
//! flip.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use schoolrec_core::error::CoreError;
use schoolrec_core::reference::validate_year_dates;
use schoolrec_core::types::DbId;
use schoolrec_db::models::academic_year::{AcademicYear, CreateAcademicYear, UpdateAcademicYear};
use schoolrec_db::repositories::{AcademicYearRepo, GuardedDelete};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::MessageResponse;
use crate::state::AppState;

/// GET /api/academic-years
pub async fn list_years(
    State(state): State<AppState>,
    _user: AuthUser,
) -> AppResult<Json<Vec<AcademicYear>>> {
    let years = AcademicYearRepo::list(&state.pool).await?;
    Ok(Json(years))
}

/// GET /api/academic-years/active
///
/// The single current year. 404 is reachable (e.g. right after deleting the
/// only current year) and deliberate.
pub async fn get_active_year(
    State(state): State<AppState>,
    _user: AuthUser,
) -> AppResult<Json<AcademicYear>> {
    let year = AcademicYearRepo::find_active(&state.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("No active academic year found".into()))?;
    Ok(Json(year))
}

/// GET /api/academic-years/{id}
pub async fn get_year(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<AcademicYear>> {
    let year = AcademicYearRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Academic year",
            id,
        }))?;
    Ok(Json(year))
}

/// POST /api/academic-years
///
/// Validates date ordering and name uniqueness before inserting. A year
/// created as current clears the flag everywhere else in the same
/// transaction.
pub async fn create_year(
    State(state): State<AppState>,
    _user: AuthUser,
    Json(input): Json<CreateAcademicYear>,
) -> AppResult<(StatusCode, Json<AcademicYear>)> {
    validate_year_dates(input.start_date, input.end_date)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    if AcademicYearRepo::find_by_name(&state.pool, &input.name)
        .await?
        .is_some()
    {
        return Err(AppError::Core(CoreError::Conflict(
            "Academic year name already exists".into(),
        )));
    }

    let year = AcademicYearRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(year)))
}

/// PUT /api/academic-years/{id}
///
/// Partial update. Dates are validated against their stored counterparts
/// when only one of the pair is supplied; a flip to current excludes this id
/// from the clear step.
pub async fn update_year(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateAcademicYear>,
) -> AppResult<Json<AcademicYear>> {
    let existing = AcademicYearRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Academic year",
            id,
        }))?;

    let start = input.start_date.unwrap_or(existing.start_date);
    let end = input.end_date.unwrap_or(existing.end_date);
    validate_year_dates(start, end)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    if let Some(name) = &input.name {
        let duplicate = AcademicYearRepo::find_by_name(&state.pool, name).await?;
        if duplicate.is_some_and(|other| other.id != id) {
            return Err(AppError::Core(CoreError::Conflict(
                "Academic year name already exists".into(),
            )));
        }
    }

    let year = AcademicYearRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Academic year",
            id,
        }))?;
    Ok(Json(year))
}

/// DELETE /api/academic-years/{id}
///
/// Refuses while any class references the year.
pub async fn delete_year(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<MessageResponse>> {
    match AcademicYearRepo::delete(&state.pool, id).await? {
        GuardedDelete::Deleted => Ok(Json(MessageResponse::new(
            "Academic year deleted successfully",
        ))),
        GuardedDelete::Blocked(_) => Err(AppError::Core(CoreError::PreconditionFailed(
            "Cannot delete academic year with existing classes".into(),
        ))),
        GuardedDelete::NotFound => Err(AppError::Core(CoreError::NotFound {
            entity: "Academic year",
            id,
        })),
    }
}
