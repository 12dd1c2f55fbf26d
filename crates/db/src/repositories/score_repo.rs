//! Repository for the `scores` table.
//!
//! Every insert is keyed by a resolved enrollment id; the scoring engine
//! performs the enrollment lookup and value validation before anything
//! reaches this layer.

use schoolrec_core::types::DbId;
use sqlx::PgPool;

use crate::models::score::{CreateScore, Score, ScoreDetail, UpdateScore};

const COLUMNS: &str =
    "id, enrollment_id, subject_id, score_type, value, semester, created_at, updated_at";

/// Joined projection shared by the list and detail queries.
const DETAIL_COLUMNS: &str = "sc.id, sc.enrollment_id, \
    st.id AS student_id, st.student_code, st.full_name AS student_name, \
    c.id AS class_id, c.name AS class_name, \
    su.id AS subject_id, su.code AS subject_code, su.name AS subject_name, \
    sc.score_type, sc.value, sc.semester";

const DETAIL_FROM: &str = "FROM scores sc \
    JOIN class_enrollments e ON e.id = sc.enrollment_id \
    JOIN students st ON st.id = e.student_id \
    JOIN classes c ON c.id = e.class_id \
    JOIN subjects su ON su.id = sc.subject_id";

/// Provides persistence for validated score entries.
pub struct ScoreRepo;

impl ScoreRepo {
    /// Insert a score, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateScore) -> Result<Score, sqlx::Error> {
        let query = format!(
            "INSERT INTO scores (enrollment_id, subject_id, score_type, value, semester)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Score>(&query)
            .bind(input.enrollment_id)
            .bind(input.subject_id)
            .bind(&input.score_type)
            .bind(input.value)
            .bind(input.semester)
            .fetch_one(pool)
            .await
    }

    /// Find a score row by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Score>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM scores WHERE id = $1");
        sqlx::query_as::<_, Score>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a score with its student/class/subject context.
    pub async fn find_detail_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ScoreDetail>, sqlx::Error> {
        let query = format!("SELECT {DETAIL_COLUMNS} {DETAIL_FROM} WHERE sc.id = $1");
        sqlx::query_as::<_, ScoreDetail>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List scores with full context, optionally filtered by class, student,
    /// and/or subject. Class and student filters travel through the
    /// enrollment join.
    pub async fn list(
        pool: &PgPool,
        class_id: Option<DbId>,
        student_id: Option<DbId>,
        subject_id: Option<DbId>,
    ) -> Result<Vec<ScoreDetail>, sqlx::Error> {
        let query = format!(
            "SELECT {DETAIL_COLUMNS} {DETAIL_FROM}
             WHERE ($1::BIGINT IS NULL OR e.class_id = $1)
               AND ($2::BIGINT IS NULL OR e.student_id = $2)
               AND ($3::BIGINT IS NULL OR sc.subject_id = $3)
             ORDER BY sc.enrollment_id ASC, sc.subject_id ASC"
        );
        sqlx::query_as::<_, ScoreDetail>(&query)
            .bind(class_id)
            .bind(student_id)
            .bind(subject_id)
            .fetch_all(pool)
            .await
    }

    /// Update a score. Only non-`None` fields are applied; the enrollment
    /// key is immutable. Returns `None` if no row with `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateScore,
    ) -> Result<Option<Score>, sqlx::Error> {
        let query = format!(
            "UPDATE scores SET
                score_type = COALESCE($2, score_type),
                value = COALESCE($3, value),
                semester = COALESCE($4, semester),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Score>(&query)
            .bind(id)
            .bind(&input.score_type)
            .bind(input.value)
            .bind(input.semester)
            .fetch_optional(pool)
            .await
    }

    /// Delete a score by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM scores WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
