//! Repository for the `academic_years` table.
//!
//! Owns the single-active-year invariant: any write that sets `is_current`
//! clears the flag on every other row inside the same transaction, so there
//! is never a window with two current years.

use schoolrec_core::types::DbId;
use sqlx::PgPool;

use crate::models::academic_year::{AcademicYear, CreateAcademicYear, UpdateAcademicYear};
use crate::repositories::GuardedDelete;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, start_date, end_date, is_current, created_at, updated_at";

/// Provides CRUD operations for academic years.
pub struct AcademicYearRepo;

impl AcademicYearRepo {
    /// Insert a new academic year, returning the created row.
    ///
    /// If the new year is marked current, every other row's flag is cleared
    /// first, in the same transaction as the insert.
    pub async fn create(
        pool: &PgPool,
        input: &CreateAcademicYear,
    ) -> Result<AcademicYear, sqlx::Error> {
        let mut tx = pool.begin().await?;

        if input.is_current {
            sqlx::query(
                "UPDATE academic_years SET is_current = FALSE, updated_at = NOW()
                 WHERE is_current = TRUE",
            )
            .execute(&mut *tx)
            .await?;
        }

        let query = format!(
            "INSERT INTO academic_years (name, start_date, end_date, is_current)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        let year = sqlx::query_as::<_, AcademicYear>(&query)
            .bind(&input.name)
            .bind(input.start_date)
            .bind(input.end_date)
            .bind(input.is_current)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(year)
    }

    /// Find an academic year by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<AcademicYear>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM academic_years WHERE id = $1");
        sqlx::query_as::<_, AcademicYear>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find an academic year by name. Used as the fast-fail duplicate check;
    /// the `uq_academic_years_name` constraint remains the authoritative guard.
    pub async fn find_by_name(
        pool: &PgPool,
        name: &str,
    ) -> Result<Option<AcademicYear>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM academic_years WHERE name = $1");
        sqlx::query_as::<_, AcademicYear>(&query)
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    /// The single year flagged current, if any.
    pub async fn find_active(pool: &PgPool) -> Result<Option<AcademicYear>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM academic_years WHERE is_current = TRUE");
        sqlx::query_as::<_, AcademicYear>(&query)
            .fetch_optional(pool)
            .await
    }

    /// List all academic years, most recent first.
    pub async fn list(pool: &PgPool) -> Result<Vec<AcademicYear>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM academic_years ORDER BY start_date DESC");
        sqlx::query_as::<_, AcademicYear>(&query)
            .fetch_all(pool)
            .await
    }

    /// Update an academic year. Only non-`None` fields are applied.
    ///
    /// A flip to current clears the flag on all rows except `id`, atomically
    /// with the update itself. Returns `None` if no row with `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateAcademicYear,
    ) -> Result<Option<AcademicYear>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        if input.is_current == Some(true) {
            sqlx::query(
                "UPDATE academic_years SET is_current = FALSE, updated_at = NOW()
                 WHERE is_current = TRUE AND id <> $1",
            )
            .bind(id)
            .execute(&mut *tx)
            .await?;
        }

        let query = format!(
            "UPDATE academic_years SET
                name = COALESCE($2, name),
                start_date = COALESCE($3, start_date),
                end_date = COALESCE($4, end_date),
                is_current = COALESCE($5, is_current),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let year = sqlx::query_as::<_, AcademicYear>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(input.start_date)
            .bind(input.end_date)
            .bind(input.is_current)
            .fetch_optional(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(year)
    }

    /// Delete an academic year unless classes still reference it.
    ///
    /// Count and delete run in one transaction, closing the check-then-delete
    /// race.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<GuardedDelete, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let (class_count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM classes WHERE academic_year_id = $1")
                .bind(id)
                .fetch_one(&mut *tx)
                .await?;
        if class_count > 0 {
            return Ok(GuardedDelete::Blocked(class_count));
        }

        let result = sqlx::query("DELETE FROM academic_years WHERE id = $1")
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
