//! Repository for the `parents` table.
//!
//! Parent deletion is a two-step cascade: first every referencing student has
//! its `parent_id` cleared, then the parent row is hard-deleted. Both steps
//! run in one transaction so no student is ever left pointing at a missing
//! parent.

use schoolrec_core::types::DbId;
use sqlx::PgPool;

use crate::models::parent::{CreateParent, Parent, UpdateParent};

/// The password hash is deliberately absent from this list; no read path
/// ever returns it.
const COLUMNS: &str = "id, full_name, phone, is_active, created_at, updated_at";

/// Provides CRUD operations for parents.
pub struct ParentRepo;

impl ParentRepo {
    /// Insert a new parent, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateParent) -> Result<Parent, sqlx::Error> {
        let query = format!(
            "INSERT INTO parents (full_name, phone, password_hash)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Parent>(&query)
            .bind(&input.full_name)
            .bind(&input.phone)
            .bind(&input.password_hash)
            .fetch_one(pool)
            .await
    }

    /// Find a parent by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Parent>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM parents WHERE id = $1");
        sqlx::query_as::<_, Parent>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Fast-fail duplicate check; `uq_parents_phone` is the authoritative guard.
    pub async fn find_by_phone(pool: &PgPool, phone: &str) -> Result<Option<Parent>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM parents WHERE phone = $1");
        sqlx::query_as::<_, Parent>(&query)
            .bind(phone)
            .fetch_optional(pool)
            .await
    }

    /// One page of parents matching an optional case-insensitive search over
    /// full name and phone, newest first.
    pub async fn list(
        pool: &PgPool,
        limit: i64,
        offset: i64,
        search: Option<&str>,
    ) -> Result<Vec<Parent>, sqlx::Error> {
        let pattern = search.map(|s| format!("%{s}%"));
        let query = format!(
            "SELECT {COLUMNS} FROM parents
             WHERE ($1::TEXT IS NULL OR full_name ILIKE $1 OR phone ILIKE $1)
             ORDER BY id DESC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Parent>(&query)
            .bind(pattern)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Total rows under the same filter as [`ParentRepo::list`].
    pub async fn count(pool: &PgPool, search: Option<&str>) -> Result<i64, sqlx::Error> {
        let pattern = search.map(|s| format!("%{s}%"));
        let (count,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM parents
             WHERE ($1::TEXT IS NULL OR full_name ILIKE $1 OR phone ILIKE $1)",
        )
        .bind(pattern)
        .fetch_one(pool)
        .await?;
        Ok(count)
    }

    /// Update a parent. Only non-`None` fields are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateParent,
    ) -> Result<Option<Parent>, sqlx::Error> {
        let query = format!(
            "UPDATE parents SET
                full_name = COALESCE($2, full_name),
                phone = COALESCE($3, phone),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Parent>(&query)
            .bind(id)
            .bind(&input.full_name)
            .bind(&input.phone)
            .fetch_optional(pool)
            .await
    }

    /// Delete a parent, clearing the reference on all of their students
    /// first. The order matters; both steps share one transaction.
    ///
    /// Returns `true` if the parent row existed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query(
            "UPDATE students SET parent_id = NULL, updated_at = NOW()
             WHERE parent_id = $1",
        )
        .bind(id)
        .execute(&mut *tx)
        .await?;

        let result = sqlx::query("DELETE FROM parents WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }
}
