//! Repository for the `class_enrollments` table -- the enrollment ledger.
//!
//! The `(student_id, class_id)` unique constraint is the authoritative guard
//! against duplicate enrollments; application-level lookups here are only
//! fast-fail conveniences.

use schoolrec_core::types::DbId;
use sqlx::PgPool;

use crate::models::enrollment::{ClassEnrollment, EnrolledStudent, StudentEnrollment};
use crate::repositories::GuardedDelete;

const COLUMNS: &str = "id, student_id, class_id, enrolled_at";

/// Lifecycle manager for student <-> class links.
pub struct EnrollmentRepo;

impl EnrollmentRepo {
    /// Enroll a student into a class, returning the created link.
    ///
    /// A duplicate pair trips `uq_class_enrollments_student_class` (23505);
    /// an unresolved student/class id trips the FK (23503).
    pub async fn enroll(
        pool: &PgPool,
        class_id: DbId,
        student_id: DbId,
    ) -> Result<ClassEnrollment, sqlx::Error> {
        let query = format!(
            "INSERT INTO class_enrollments (student_id, class_id)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ClassEnrollment>(&query)
            .bind(student_id)
            .bind(class_id)
            .fetch_one(pool)
            .await
    }

    /// Composite-key lookup. The scoring engine uses this to authorize
    /// score writes.
    pub async fn find_by_class_and_student(
        pool: &PgPool,
        class_id: DbId,
        student_id: DbId,
    ) -> Result<Option<ClassEnrollment>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM class_enrollments WHERE class_id = $1 AND student_id = $2");
        sqlx::query_as::<_, ClassEnrollment>(&query)
            .bind(class_id)
            .bind(student_id)
            .fetch_optional(pool)
            .await
    }

    /// Remove an enrollment unless scores still reference it.
    ///
    /// Scores are never cascaded; an enrollment with recorded scores refuses
    /// to go away (the RESTRICT FK backs this up at the storage layer).
    pub async fn unenroll(
        pool: &PgPool,
        class_id: DbId,
        student_id: DbId,
    ) -> Result<GuardedDelete, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let enrollment_id: Option<(DbId,)> = sqlx::query_as(
            "SELECT id FROM class_enrollments WHERE class_id = $1 AND student_id = $2",
        )
        .bind(class_id)
        .bind(student_id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some((enrollment_id,)) = enrollment_id else {
            return Ok(GuardedDelete::NotFound);
        };

        let (score_count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM scores WHERE enrollment_id = $1")
                .bind(enrollment_id)
                .fetch_one(&mut *tx)
                .await?;
        if score_count > 0 {
            return Ok(GuardedDelete::Blocked(score_count));
        }

        sqlx::query("DELETE FROM class_enrollments WHERE id = $1")
            .bind(enrollment_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(GuardedDelete::Deleted)
    }

    /// Students enrolled in a class, in student-code order.
    pub async fn list_by_class(
        pool: &PgPool,
        class_id: DbId,
    ) -> Result<Vec<EnrolledStudent>, sqlx::Error> {
        sqlx::query_as::<_, EnrolledStudent>(
            "SELECT e.id AS enrollment_id, s.id AS student_id, s.student_code, s.full_name
             FROM class_enrollments e
             JOIN students s ON s.id = e.student_id
             WHERE e.class_id = $1 AND s.is_deleted = FALSE
             ORDER BY s.student_code ASC",
        )
        .bind(class_id)
        .fetch_all(pool)
        .await
    }

    /// Classes a student is enrolled in, most recent year first.
    pub async fn list_by_student(
        pool: &PgPool,
        student_id: DbId,
    ) -> Result<Vec<StudentEnrollment>, sqlx::Error> {
        sqlx::query_as::<_, StudentEnrollment>(
            "SELECT e.id AS enrollment_id, c.id AS class_id, c.name AS class_name,
                    y.id AS academic_year_id, y.name AS academic_year_name
             FROM class_enrollments e
             JOIN classes c ON c.id = e.class_id
             JOIN academic_years y ON y.id = c.academic_year_id
             WHERE e.student_id = $1
             ORDER BY y.start_date DESC, c.name ASC",
        )
        .bind(student_id)
        .fetch_all(pool)
        .await
    }
}
