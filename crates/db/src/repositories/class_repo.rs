//! Repository for the `classes` table.

use schoolrec_core::types::DbId;
use sqlx::PgPool;

use crate::models::class::{Class, ClassSummary, CreateClass, UpdateClass};
use crate::repositories::GuardedDelete;

const COLUMNS: &str =
    "id, name, grade_id, academic_year_id, homeroom_teacher_id, created_at, updated_at";

/// Summary projection shared by the list query.
const SUMMARY_COLUMNS: &str = "c.id, c.name, c.grade_id, g.name AS grade_name, \
    c.academic_year_id, y.name AS academic_year_name, c.homeroom_teacher_id, \
    (SELECT COUNT(*) FROM class_enrollments e WHERE e.class_id = c.id) AS enrollment_count";

/// Provides CRUD operations for classes.
pub struct ClassRepo;

impl ClassRepo {
    /// Insert a new class, returning the created row.
    ///
    /// Foreign keys are left to the database; a 23503 violation means the
    /// grade/year/teacher id did not resolve.
    pub async fn create(pool: &PgPool, input: &CreateClass) -> Result<Class, sqlx::Error> {
        let query = format!(
            "INSERT INTO classes (name, grade_id, academic_year_id, homeroom_teacher_id)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Class>(&query)
            .bind(&input.name)
            .bind(input.grade_id)
            .bind(input.academic_year_id)
            .bind(input.homeroom_teacher_id)
            .fetch_one(pool)
            .await
    }

    /// Find a class by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Class>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM classes WHERE id = $1");
        sqlx::query_as::<_, Class>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Fast-fail check for the `(name, academic_year_id)` uniqueness rule.
    pub async fn find_by_name_and_year(
        pool: &PgPool,
        name: &str,
        academic_year_id: DbId,
    ) -> Result<Option<Class>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM classes WHERE name = $1 AND academic_year_id = $2");
        sqlx::query_as::<_, Class>(&query)
            .bind(name)
            .bind(academic_year_id)
            .fetch_optional(pool)
            .await
    }

    /// List classes with grade/year names and enrollment counts, optionally
    /// filtered by academic year and/or grade.
    pub async fn list(
        pool: &PgPool,
        academic_year_id: Option<DbId>,
        grade_id: Option<DbId>,
    ) -> Result<Vec<ClassSummary>, sqlx::Error> {
        let query = format!(
            "SELECT {SUMMARY_COLUMNS}
             FROM classes c
             JOIN grades g ON g.id = c.grade_id
             JOIN academic_years y ON y.id = c.academic_year_id
             WHERE ($1::BIGINT IS NULL OR c.academic_year_id = $1)
               AND ($2::BIGINT IS NULL OR c.grade_id = $2)
             ORDER BY y.start_date DESC, c.name ASC"
        );
        sqlx::query_as::<_, ClassSummary>(&query)
            .bind(academic_year_id)
            .bind(grade_id)
            .fetch_all(pool)
            .await
    }

    /// Update a class. Only non-`None` fields are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateClass,
    ) -> Result<Option<Class>, sqlx::Error> {
        let query = format!(
            "UPDATE classes SET
                name = COALESCE($2, name),
                grade_id = COALESCE($3, grade_id),
                academic_year_id = COALESCE($4, academic_year_id),
                homeroom_teacher_id = COALESCE($5, homeroom_teacher_id),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Class>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(input.grade_id)
            .bind(input.academic_year_id)
            .bind(input.homeroom_teacher_id)
            .fetch_optional(pool)
            .await
    }

    /// Delete a class unless enrollments still reference it.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<GuardedDelete, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let (enrollment_count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM class_enrollments WHERE class_id = $1")
                .bind(id)
                .fetch_one(&mut *tx)
                .await?;
        if enrollment_count > 0 {
            return Ok(GuardedDelete::Blocked(enrollment_count));
        }

        let result = sqlx::query("DELETE FROM classes WHERE id = $1")
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
