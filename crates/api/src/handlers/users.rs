//! Handlers for the `/users` resource (teacher/admin accounts).
//!
//! All handlers require the `ADMIN` capability via [`RequireAdmin`]. The
//! password hash never appears in a response; reads go through the safe
//! projection.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use schoolrec_core::error::CoreError;
use schoolrec_core::pagination::PageRequest;
use schoolrec_core::roles::{validate_roles, ROLE_TEACHER};
use schoolrec_core::types::DbId;
use schoolrec_db::models::user::{CreateUser, UpdateUser, UserResponse};
use schoolrec_db::repositories::UserRepo;
use serde::Deserialize;

use crate::auth::password::{hash_password, validate_password_strength};
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::query::ListParams;
use crate::response::{MessageResponse, Paginated};
use crate::state::AppState;

/// Minimum password length enforced on user creation and password change.
const MIN_PASSWORD_LENGTH: usize = 8;

/// Request body for `POST /users`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    pub username: String,
    pub password: String,
    pub full_name: String,
    /// Defaults to `[TEACHER]` if omitted.
    pub system_roles: Option<Vec<String>>,
}

/// Request body for `PUT /users/{id}`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    pub username: Option<String>,
    pub password: Option<String>,
    pub full_name: Option<String>,
    pub system_roles: Option<Vec<String>>,
    pub is_active: Option<bool>,
}

/// GET /api/users?page=&limit=&search=
pub async fn list_users(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Query(params): Query<ListParams>,
) -> AppResult<Json<Paginated<UserResponse>>> {
    let page = PageRequest::new(params.page, params.limit);
    let search = params.search.as_deref();

    let data = UserRepo::list(&state.pool, page.limit, page.offset(), search).await?;
    let total = UserRepo::count(&state.pool, search).await?;

    Ok(Json(Paginated::new(data, total, page)))
}

/// GET /api/users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Json<UserResponse>> {
    let user = UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;
    Ok(Json(user))
}

/// POST /api/users
///
/// Validates the role set against the closed role model, checks username
/// uniqueness, hashes the password, and returns the safe projection with
/// 201 Created.
pub async fn create_user(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(input): Json<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    let system_roles = input
        .system_roles
        .unwrap_or_else(|| vec![ROLE_TEACHER.to_string()]);
    validate_roles(&system_roles).map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    validate_password_strength(&input.password, MIN_PASSWORD_LENGTH)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    if UserRepo::find_by_username(&state.pool, &input.username)
        .await?
        .is_some()
    {
        return Err(AppError::Core(CoreError::Conflict(
            "Username already exists".into(),
        )));
    }

    let hashed = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let create_dto = CreateUser {
        username: input.username,
        password_hash: hashed,
        full_name: input.full_name,
        system_roles,
    };
    let user = UserRepo::create(&state.pool, &create_dto).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// PUT /api/users/{id}
///
/// A password change is re-hashed; a role change is re-validated against the
/// closed set.
pub async fn update_user(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateUserRequest>,
) -> AppResult<Json<UserResponse>> {
    if let Some(roles) = &input.system_roles {
        validate_roles(roles).map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;
    }

    if let Some(username) = &input.username {
        let duplicate = UserRepo::find_by_username(&state.pool, username).await?;
        if duplicate.is_some_and(|other| other.id != id) {
            return Err(AppError::Core(CoreError::Conflict(
                "Username already exists".into(),
            )));
        }
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

    let update_dto = UpdateUser {
        username: input.username,
        password_hash,
        full_name: input.full_name,
        system_roles: input.system_roles,
        is_active: input.is_active,
    };
    let user = UserRepo::update(&state.pool, id, &update_dto)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;
    Ok(Json(user))
}

/// DELETE /api/users/{id}
///
/// Soft delete: the account is deactivated, never removed.
pub async fn delete_user(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Json<MessageResponse>> {
    if !UserRepo::soft_delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::NotFound { entity: "User", id }));
    }
    Ok(Json(MessageResponse::new("User deleted successfully")))
}
