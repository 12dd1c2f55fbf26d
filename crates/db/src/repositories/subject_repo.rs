//! Repository for the `subjects` table.

use schoolrec_core::types::DbId;
use sqlx::PgPool;

use crate::models::subject::{CreateSubject, Subject, UpdateSubject};
use crate::repositories::GuardedDelete;

const COLUMNS: &str = "id, code, name, created_at, updated_at";

/// Provides CRUD operations for subjects.
pub struct SubjectRepo;

impl SubjectRepo {
    /// Insert a new subject, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateSubject) -> Result<Subject, sqlx::Error> {
        let query = format!(
            "INSERT INTO subjects (code, name)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Subject>(&query)
            .bind(&input.code)
            .bind(&input.name)
            .fetch_one(pool)
            .await
    }

    /// Find a subject by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Subject>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM subjects WHERE id = $1");
        sqlx::query_as::<_, Subject>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Fast-fail duplicate check; `uq_subjects_code` is the authoritative guard.
    pub async fn find_by_code(pool: &PgPool, code: &str) -> Result<Option<Subject>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM subjects WHERE code = $1");
        sqlx::query_as::<_, Subject>(&query)
            .bind(code)
            .fetch_optional(pool)
            .await
    }

    /// List all subjects ordered by code.
    pub async fn list(pool: &PgPool) -> Result<Vec<Subject>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM subjects ORDER BY code ASC");
        sqlx::query_as::<_, Subject>(&query).fetch_all(pool).await
    }

    /// Update a subject. Only non-`None` fields are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateSubject,
    ) -> Result<Option<Subject>, sqlx::Error> {
        let query = format!(
            "UPDATE subjects SET
                code = COALESCE($2, code),
                name = COALESCE($3, name),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Subject>(&query)
            .bind(id)
            .bind(&input.code)
            .bind(&input.name)
            .fetch_optional(pool)
            .await
    }

    /// Delete a subject unless scores still reference it.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<GuardedDelete, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let (score_count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM scores WHERE subject_id = $1")
                .bind(id)
                .fetch_one(&mut *tx)
                .await?;
        if score_count > 0 {
            return Ok(GuardedDelete::Blocked(score_count));
        }

        let result = sqlx::query("DELETE FROM subjects WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(if result.rows_affected() > 0 {
            GuardedDelete::Deleted
        } else {
            GuardedDelete::NotFound
        })
    }
}
