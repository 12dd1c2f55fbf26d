//! Repository for the `grades` table.

use schoolrec_core::types::DbId;
use sqlx::PgPool;

use crate::models::grade::{CreateGrade, Grade, UpdateGrade};
use crate::repositories::GuardedDelete;

const COLUMNS: &str = "id, name, level, created_at, updated_at";

/// Provides CRUD operations for grades.
pub struct GradeRepo;

impl GradeRepo {
    /// Insert a new grade, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateGrade) -> Result<Grade, sqlx::Error> {
        let query = format!(
            "INSERT INTO grades (name, level)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Grade>(&query)
            .bind(&input.name)
            .bind(input.level)
            .fetch_one(pool)
            .await
    }

    /// Find a grade by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Grade>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM grades WHERE id = $1");
        sqlx::query_as::<_, Grade>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Fast-fail duplicate check; `uq_grades_name` is the authoritative guard.
    pub async fn find_by_name(pool: &PgPool, name: &str) -> Result<Option<Grade>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM grades WHERE name = $1");
        sqlx::query_as::<_, Grade>(&query)
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    /// List all grades ordered by level.
    pub async fn list(pool: &PgPool) -> Result<Vec<Grade>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM grades ORDER BY level ASC");
        sqlx::query_as::<_, Grade>(&query).fetch_all(pool).await
    }

    /// Update a grade. Only non-`None` fields are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateGrade,
    ) -> Result<Option<Grade>, sqlx::Error> {
        let query = format!(
            "UPDATE grades SET
                name = COALESCE($2, name),
                level = COALESCE($3, level),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Grade>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(input.level)
            .fetch_optional(pool)
            .await
    }

    /// Delete a grade unless classes still reference it.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<GuardedDelete, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let (class_count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM classes WHERE grade_id = $1")
                .bind(id)
                .fetch_one(&mut *tx)
                .await?;
        if class_count > 0 {
            return Ok(GuardedDelete::Blocked(class_count));
        }

        let result = sqlx::query("DELETE FROM grades WHERE id = $1")
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
