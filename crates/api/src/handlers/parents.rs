//! Handlers for the `/parents` resource.
//!
//! Parent deletion is the two-step cascade: student references are cleared
//! before the row goes away. Portal passwords are hashed on the way in and
//! never serialized back out.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use schoolrec_core::error::CoreError;
use schoolrec_core::pagination::PageRequest;
use schoolrec_core::types::DbId;
use schoolrec_db::models::parent::{CreateParent, Parent, UpdateParent};
use schoolrec_db::repositories::ParentRepo;
use serde::Deserialize;

use crate::auth::password::{hash_password, validate_password_strength};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::query::ListParams;
use crate::response::{MessageResponse, Paginated};
use crate::state::AppState;

/// Minimum length for optional parent portal passwords.
const MIN_PASSWORD_LENGTH: usize = 8;

/// Request body for `POST /parents`. The plaintext password, when present,
/// is hashed before it reaches the repository.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateParentRequest {
    pub full_name: String,
    pub phone: String,
    pub password: Option<String>,
}

/// GET /api/parents?page=&limit=&search=
pub async fn list_parents(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(params): Query<ListParams>,
) -> AppResult<Json<Paginated<Parent>>> {
    let page = PageRequest::new(params.page, params.limit);
    let search = params.search.as_deref();

    let data = ParentRepo::list(&state.pool, page.limit, page.offset(), search).await?;
    let total = ParentRepo::count(&state.pool, search).await?;

    Ok(Json(Paginated::new(data, total, page)))
}

/// GET /api/parents/{id}
pub async fn get_parent(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Parent>> {
    let parent = ParentRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Parent",
            id,
        }))?;
    Ok(Json(parent))
}

/// POST /api/parents
pub async fn create_parent(
    State(state): State<AppState>,
    _user: AuthUser,
    Json(input): Json<CreateParentRequest>,
) -> AppResult<(StatusCode, Json<Parent>)> {
    if ParentRepo::find_by_phone(&state.pool, &input.phone)
        .await?
        .is_some()
    {
        return Err(AppError::Core(CoreError::Conflict(
            "Phone number already exists".into(),
        )));
    }

    let password_hash = match &input.password {
        Some(password) => {
            validate_password_strength(password, MIN_PASSWORD_LENGTH)
                .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;
            let hashed = hash_password(password)
                .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;
            Some(hashed)
        }
        None => None,
    };

    let create_dto = CreateParent {
        full_name: input.full_name,
        phone: input.phone,
        password_hash,
    };
    let parent = ParentRepo::create(&state.pool, &create_dto).await?;
    Ok((StatusCode::CREATED, Json(parent)))
}

/// PUT /api/parents/{id}
pub async fn update_parent(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateParent>,
) -> AppResult<Json<Parent>> {
    if let Some(phone) = &input.phone {
        let duplicate = ParentRepo::find_by_phone(&state.pool, phone).await?;
        if duplicate.is_some_and(|other| other.id != id) {
            return Err(AppError::Core(CoreError::Conflict(
                "Phone number already exists".into(),
            )));
        }
    }

    let parent = ParentRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Parent",
            id,
        }))?;
    Ok(Json(parent))
}

/// DELETE /api/parents/{id}
///
/// Clears `parentId` on every referencing student, then removes the row;
/// students are never deleted with their parent.
pub async fn delete_parent(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<MessageResponse>> {
    if !ParentRepo::delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Parent",
            id,
        }));
    }
    Ok(Json(MessageResponse::new("Parent deleted successfully")))
}
