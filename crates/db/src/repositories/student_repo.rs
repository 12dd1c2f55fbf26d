//! Repository for the `students` table.
//!
//! Students are soft-deleted: `delete` flips `is_deleted` and every default
//! read path filters it out. The row itself survives so enrollments and
//! scores keep a valid ancestor.

use schoolrec_core::types::DbId;
use sqlx::PgPool;

use crate::models::student::{CreateStudent, Student, UpdateStudent};

const COLUMNS: &str =
    "id, student_code, full_name, dob, gender, parent_id, is_deleted, created_at, updated_at";

/// Provides CRUD operations for students.
pub struct StudentRepo;

impl StudentRepo {
    /// Insert a new student, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateStudent) -> Result<Student, sqlx::Error> {
        let query = format!(
            "INSERT INTO students (student_code, full_name, dob, gender, parent_id)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Student>(&query)
            .bind(&input.student_code)
            .bind(&input.full_name)
            .bind(input.dob)
            .bind(&input.gender)
            .bind(input.parent_id)
            .fetch_one(pool)
            .await
    }

    /// Find a student by its internal ID. Excludes soft-deleted rows.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Student>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM students WHERE id = $1 AND is_deleted = FALSE");
        sqlx::query_as::<_, Student>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a student by ID, including soft-deleted rows. Used by tests and
    /// integrity checks that need to see the tombstone.
    pub async fn find_by_id_include_deleted(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<Student>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM students WHERE id = $1");
        sqlx::query_as::<_, Student>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Fast-fail duplicate check over all rows, deleted included, since the
    /// `uq_students_student_code` constraint spans them too.
    pub async fn find_by_code(pool: &PgPool, code: &str) -> Result<Option<Student>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM students WHERE student_code = $1");
        sqlx::query_as::<_, Student>(&query)
            .bind(code)
            .fetch_optional(pool)
            .await
    }

    /// One page of non-deleted students matching an optional case-insensitive
    /// search over full name and student code, newest first.
    pub async fn list(
        pool: &PgPool,
        limit: i64,
        offset: i64,
        search: Option<&str>,
    ) -> Result<Vec<Student>, sqlx::Error> {
        let pattern = search.map(|s| format!("%{s}%"));
        let query = format!(
            "SELECT {COLUMNS} FROM students
             WHERE is_deleted = FALSE
               AND ($1::TEXT IS NULL OR full_name ILIKE $1 OR student_code ILIKE $1)
             ORDER BY id DESC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Student>(&query)
            .bind(pattern)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Total rows under the same filter as [`StudentRepo::list`], so the
    /// pagination envelope is accurate.
    pub async fn count(pool: &PgPool, search: Option<&str>) -> Result<i64, sqlx::Error> {
        let pattern = search.map(|s| format!("%{s}%"));
        let (count,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM students
             WHERE is_deleted = FALSE
               AND ($1::TEXT IS NULL OR full_name ILIKE $1 OR student_code ILIKE $1)",
        )
        .bind(pattern)
        .fetch_one(pool)
        .await?;
        Ok(count)
    }

    /// Update a student. Only non-`None` fields are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateStudent,
    ) -> Result<Option<Student>, sqlx::Error> {
        let query = format!(
            "UPDATE students SET
                student_code = COALESCE($2, student_code),
                full_name = COALESCE($3, full_name),
                dob = COALESCE($4, dob),
                gender = COALESCE($5, gender),
                parent_id = COALESCE($6, parent_id),
                updated_at = NOW()
             WHERE id = $1 AND is_deleted = FALSE
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Student>(&query)
            .bind(id)
            .bind(&input.student_code)
            .bind(&input.full_name)
            .bind(input.dob)
            .bind(&input.gender)
            .bind(input.parent_id)
            .fetch_optional(pool)
            .await
    }

    /// Soft-delete a student. Returns `true` if a row was marked deleted.
    pub async fn soft_delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE students SET is_deleted = TRUE, updated_at = NOW()
             WHERE id = $1 AND is_deleted = FALSE",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
