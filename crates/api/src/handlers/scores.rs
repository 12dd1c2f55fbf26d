//! Handlers for the `/scores` resource -- the scoring engine.
//!
//! A score can only be created against an existing enrollment; the row is
//! keyed by the resolved enrollment id, never by raw (student, class).

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use schoolrec_core::error::CoreError;
use schoolrec_core::scoring::{
    parse_score_value, validate_score_value, validate_semester, ScoreType, DEFAULT_SEMESTER,
};
use schoolrec_core::types::DbId;
use schoolrec_db::models::score::{CreateScore, Score, ScoreDetail, UpdateScore};
use schoolrec_db::repositories::{EnrollmentRepo, ScoreRepo};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::query::ScoreListParams;
use crate::response::MessageResponse;
use crate::state::AppState;

/// Request body for `POST /scores`.
///
/// `value` stays raw JSON here because clients may send it as a number or a
/// string-encoded number; the scoring rules parse it before range checking.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateScoreRequest {
    pub student_id: DbId,
    pub class_id: DbId,
    pub subject_id: DbId,
    pub score_type: String,
    pub value: serde_json::Value,
    pub semester: Option<i32>,
}

/// Request body for `PUT /scores/{id}`. All fields optional.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateScoreRequest {
    pub score_type: Option<String>,
    pub value: Option<serde_json::Value>,
    pub semester: Option<i32>,
}

/// GET /api/scores?classId=&studentId=&subjectId=
pub async fn list_scores(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(params): Query<ScoreListParams>,
) -> AppResult<Json<Vec<ScoreDetail>>> {
    let scores = ScoreRepo::list(
        &state.pool,
        params.class_id,
        params.student_id,
        params.subject_id,
    )
    .await?;
    Ok(Json(scores))
}

/// GET /api/scores/{id}
pub async fn get_score(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<ScoreDetail>> {
    let score = ScoreRepo::find_detail_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Score",
            id,
        }))?;
    Ok(Json(score))
}

/// POST /api/scores
///
/// Records a score for an enrolled student:
/// 1. resolve the enrollment for (studentId, classId) -- no enrollment, no
///    score;
/// 2. parse and range-check the value ([0, 10] inclusive);
/// 3. parse the type tag and semester (defaulting to semester 1);
/// 4. persist keyed by the enrollment id.
pub async fn create_score(
    State(state): State<AppState>,
    _user: AuthUser,
    Json(input): Json<CreateScoreRequest>,
) -> AppResult<(StatusCode, Json<Score>)> {
    let enrollment =
        EnrollmentRepo::find_by_class_and_student(&state.pool, input.class_id, input.student_id)
            .await?
            .ok_or_else(|| {
                AppError::Core(CoreError::Validation(
                    "Student is not enrolled in this class".into(),
                ))
            })?;

    let value = parse_score_value(&input.value)
        .and_then(|v| validate_score_value(v).map(|()| v))
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    let score_type = ScoreType::parse(&input.score_type)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    let semester = input.semester.unwrap_or(DEFAULT_SEMESTER);
    validate_semester(semester).map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    let create_dto = CreateScore {
        enrollment_id: enrollment.id,
        subject_id: input.subject_id,
        score_type: score_type.as_str().to_string(),
        value,
        semester,
    };
    let score = ScoreRepo::create(&state.pool, &create_dto).await?;
    Ok((StatusCode::CREATED, Json(score)))
}

/// PUT /api/scores/{id}
///
/// Re-validates whatever is present; the enrollment reference the score
/// already carries is never re-keyed.
pub async fn update_score(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateScoreRequest>,
) -> AppResult<Json<Score>> {
    let value = match &input.value {
        Some(raw) => {
            let v = parse_score_value(raw)
                .and_then(|v| validate_score_value(v).map(|()| v))
                .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;
            Some(v)
        }
        None => None,
    };

    let score_type = match &input.score_type {
        Some(raw) => Some(
            ScoreType::parse(raw)
                .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?
                .as_str()
                .to_string(),
        ),
        None => None,
    };

    if let Some(semester) = input.semester {
        validate_semester(semester).map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;
    }

    let update_dto = UpdateScore {
        score_type,
        value,
        semester: input.semester,
    };
    let score = ScoreRepo::update(&state.pool, id, &update_dto)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Score",
            id,
        }))?;
    Ok(Json(score))
}

/// DELETE /api/scores/{id}
pub async fn delete_score(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<MessageResponse>> {
    if !ScoreRepo::delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Score",
            id,
        }));
    }
    Ok(Json(MessageResponse::new("Score deleted successfully")))
}
