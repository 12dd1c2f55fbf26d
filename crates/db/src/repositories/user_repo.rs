//! Repository for the `users` table (teachers and administrators).
//!
//! Users are soft-deleted via `is_active = false`. The full row (with the
//! password hash) is only reachable through the lookups the auth path needs;
//! list and detail reads select the safe column set.

use schoolrec_core::types::DbId;
use sqlx::PgPool;

use crate::models::user::{CreateUser, UpdateUser, User, UserResponse};

const COLUMNS: &str =
    "id, username, password_hash, full_name, system_roles, is_active, created_at, updated_at";

/// Columns safe to return to API consumers.
const SAFE_COLUMNS: &str = "id, username, full_name, system_roles, is_active";

/// Provides CRUD operations for users.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user, returning the safe projection.
    pub async fn create(pool: &PgPool, input: &CreateUser) -> Result<UserResponse, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (username, password_hash, full_name, system_roles)
             VALUES ($1, $2, $3, $4)
             RETURNING {SAFE_COLUMNS}"
        );
        sqlx::query_as::<_, UserResponse>(&query)
            .bind(&input.username)
            .bind(&input.password_hash)
            .bind(&input.full_name)
            .bind(&input.system_roles)
            .fetch_one(pool)
            .await
    }

    /// Full-row lookup by username for password verification. Includes
    /// inactive accounts; the auth path decides how to treat them.
    pub async fn find_by_username(
        pool: &PgPool,
        username: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE username = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(username)
            .fetch_optional(pool)
            .await
    }

    /// Safe projection by ID. Excludes deactivated accounts.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<UserResponse>, sqlx::Error> {
        let query = format!("SELECT {SAFE_COLUMNS} FROM users WHERE id = $1 AND is_active = TRUE");
        sqlx::query_as::<_, UserResponse>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Safe projection by ID, including deactivated accounts.
    pub async fn find_by_id_include_inactive(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<UserResponse>, sqlx::Error> {
        let query = format!("SELECT {SAFE_COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, UserResponse>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// One page of active users matching an optional case-insensitive search
    /// over username and full name, newest first.
    pub async fn list(
        pool: &PgPool,
        limit: i64,
        offset: i64,
        search: Option<&str>,
    ) -> Result<Vec<UserResponse>, sqlx::Error> {
        let pattern = search.map(|s| format!("%{s}%"));
        let query = format!(
            "SELECT {SAFE_COLUMNS} FROM users
             WHERE is_active = TRUE
               AND ($1::TEXT IS NULL OR username ILIKE $1 OR full_name ILIKE $1)
             ORDER BY id DESC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, UserResponse>(&query)
            .bind(pattern)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Total rows under the same filter as [`UserRepo::list`].
    pub async fn count(pool: &PgPool, search: Option<&str>) -> Result<i64, sqlx::Error> {
        let pattern = search.map(|s| format!("%{s}%"));
        let (count,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM users
             WHERE is_active = TRUE
               AND ($1::TEXT IS NULL OR username ILIKE $1 OR full_name ILIKE $1)",
        )
        .bind(pattern)
        .fetch_one(pool)
        .await?;
        Ok(count)
    }

    /// Update a user. Only non-`None` fields are applied; the password hash,
    /// when present, has already been re-hashed by the caller.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateUser,
    ) -> Result<Option<UserResponse>, sqlx::Error> {
        let query = format!(
            "UPDATE users SET
                username = COALESCE($2, username),
                password_hash = COALESCE($3, password_hash),
                full_name = COALESCE($4, full_name),
                system_roles = COALESCE($5, system_roles),
                is_active = COALESCE($6, is_active),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {SAFE_COLUMNS}"
        );
        sqlx::query_as::<_, UserResponse>(&query)
            .bind(id)
            .bind(&input.username)
            .bind(&input.password_hash)
            .bind(&input.full_name)
            .bind(&input.system_roles)
            .bind(input.is_active)
            .fetch_optional(pool)
            .await
    }

    /// Deactivate a user. Returns `true` if a row was deactivated.
    pub async fn soft_delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE users SET is_active = FALSE, updated_at = NOW()
             WHERE id = $1 AND is_active = TRUE",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
