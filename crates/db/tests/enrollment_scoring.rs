//! Integration tests for the enrollment ledger and score persistence.

use chrono::NaiveDate;
use schoolrec_db::models::academic_year::CreateAcademicYear;
use schoolrec_db::models::class::CreateClass;
use schoolrec_db::models::grade::CreateGrade;
use schoolrec_db::models::score::CreateScore;
use schoolrec_db::models::student::CreateStudent;
use schoolrec_db::models::subject::CreateSubject;
use schoolrec_db::repositories::{
    AcademicYearRepo, ClassRepo, EnrollmentRepo, GradeRepo, GuardedDelete, ScoreRepo, StudentRepo,
    SubjectRepo,
};
use schoolrec_core::types::DbId;
use sqlx::PgPool;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Create the reference rows a class needs, returning (class_id, subject_id).
async fn fixture_class(pool: &PgPool) -> (DbId, DbId) {
    let year = AcademicYearRepo::create(
        pool,
        &CreateAcademicYear {
            name: "2025-2026".to_string(),
            start_date: date(2025, 9, 1),
            end_date: date(2026, 6, 30),
            is_current: true,
        },
    )
    .await
    .unwrap();
    let grade = GradeRepo::create(
        pool,
        &CreateGrade {
            name: "Grade 10".to_string(),
            level: 10,
        },
    )
    .await
    .unwrap();
    let class = ClassRepo::create(
        pool,
        &CreateClass {
            name: "10A".to_string(),
            grade_id: grade.id,
            academic_year_id: year.id,
            homeroom_teacher_id: None,
        },
    )
    .await
    .unwrap();
    let subject = SubjectRepo::create(
        pool,
        &CreateSubject {
            code: "MATH".to_string(),
            name: "Mathematics".to_string(),
        },
    )
    .await
    .unwrap();
    (class.id, subject.id)
}

async fn fixture_student(pool: &PgPool, code: &str) -> DbId {
    StudentRepo::create(
        pool,
        &CreateStudent {
            student_code: code.to_string(),
            full_name: format!("Student {code}"),
            dob: date(2010, 1, 15),
            gender: "F".to_string(),
            parent_id: None,
        },
    )
    .await
    .unwrap()
    .id
}

#[sqlx::test]
async fn enroll_then_lookup_by_composite_key(pool: PgPool) {
    let (class_id, _) = fixture_class(&pool).await;
    let student_id = fixture_student(&pool, "S001").await;

    let enrollment = EnrollmentRepo::enroll(&pool, class_id, student_id)
        .await
        .unwrap();

    let found = EnrollmentRepo::find_by_class_and_student(&pool, class_id, student_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.id, enrollment.id);

    let members = EnrollmentRepo::list_by_class(&pool, class_id).await.unwrap();
    assert_eq!(members.len(), 1);
    assert_eq!(members[0].student_code, "S001");
}

#[sqlx::test]
async fn duplicate_enrollment_trips_the_unique_pair(pool: PgPool) {
    let (class_id, _) = fixture_class(&pool).await;
    let student_id = fixture_student(&pool, "S001").await;

    EnrollmentRepo::enroll(&pool, class_id, student_id)
        .await
        .unwrap();
    let err = EnrollmentRepo::enroll(&pool, class_id, student_id)
        .await
        .unwrap_err();

    match err {
        sqlx::Error::Database(db_err) => {
            assert_eq!(db_err.code().as_deref(), Some("23505"));
            assert_eq!(
                db_err.constraint(),
                Some("uq_class_enrollments_student_class")
            );
        }
        other => panic!("expected a database error, got {other:?}"),
    }
}

#[sqlx::test]
async fn enroll_with_unknown_student_trips_the_fk(pool: PgPool) {
    let (class_id, _) = fixture_class(&pool).await;
    let err = EnrollmentRepo::enroll(&pool, class_id, 999_999)
        .await
        .unwrap_err();
    match err {
        sqlx::Error::Database(db_err) => {
            assert_eq!(db_err.code().as_deref(), Some("23503"));
        }
        other => panic!("expected a database error, got {other:?}"),
    }
}

#[sqlx::test]
async fn unenroll_removes_the_link(pool: PgPool) {
    let (class_id, _) = fixture_class(&pool).await;
    let student_id = fixture_student(&pool, "S001").await;
    EnrollmentRepo::enroll(&pool, class_id, student_id)
        .await
        .unwrap();

    assert_eq!(
        EnrollmentRepo::unenroll(&pool, class_id, student_id)
            .await
            .unwrap(),
        GuardedDelete::Deleted
    );
    assert!(
        EnrollmentRepo::find_by_class_and_student(&pool, class_id, student_id)
            .await
            .unwrap()
            .is_none()
    );
    // Second attempt: nothing left to remove.
    assert_eq!(
        EnrollmentRepo::unenroll(&pool, class_id, student_id)
            .await
            .unwrap(),
        GuardedDelete::NotFound
    );
}

#[sqlx::test]
async fn unenroll_is_blocked_while_scores_exist(pool: PgPool) {
    let (class_id, subject_id) = fixture_class(&pool).await;
    let student_id = fixture_student(&pool, "S001").await;
    let enrollment = EnrollmentRepo::enroll(&pool, class_id, student_id)
        .await
        .unwrap();

    ScoreRepo::create(
        &pool,
        &CreateScore {
            enrollment_id: enrollment.id,
            subject_id,
            score_type: "MIDTERM".to_string(),
            value: 8.5,
            semester: 1,
        },
    )
    .await
    .unwrap();

    assert_eq!(
        EnrollmentRepo::unenroll(&pool, class_id, student_id)
            .await
            .unwrap(),
        GuardedDelete::Blocked(1)
    );
}

#[sqlx::test]
async fn score_detail_traces_back_through_the_enrollment(pool: PgPool) {
    let (class_id, subject_id) = fixture_class(&pool).await;
    let student_id = fixture_student(&pool, "S001").await;
    let enrollment = EnrollmentRepo::enroll(&pool, class_id, student_id)
        .await
        .unwrap();

    let score = ScoreRepo::create(
        &pool,
        &CreateScore {
            enrollment_id: enrollment.id,
            subject_id,
            score_type: "FINAL".to_string(),
            value: 9.0,
            semester: 2,
        },
    )
    .await
    .unwrap();
    assert_eq!(score.enrollment_id, enrollment.id);

    let detail = ScoreRepo::find_detail_by_id(&pool, score.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(detail.student_id, student_id);
    assert_eq!(detail.class_id, class_id);
    assert_eq!(detail.subject_code, "MATH");
    assert_eq!(detail.value, 9.0);
    assert_eq!(detail.semester, 2);
}

#[sqlx::test]
async fn score_list_filters_travel_through_the_enrollment_join(pool: PgPool) {
    let (class_id, subject_id) = fixture_class(&pool).await;
    let first = fixture_student(&pool, "S001").await;
    let second = fixture_student(&pool, "S002").await;
    let e1 = EnrollmentRepo::enroll(&pool, class_id, first).await.unwrap();
    let e2 = EnrollmentRepo::enroll(&pool, class_id, second).await.unwrap();

    for (enrollment_id, value) in [(e1.id, 7.0), (e2.id, 8.0)] {
        ScoreRepo::create(
            &pool,
            &CreateScore {
                enrollment_id,
                subject_id,
                score_type: "REGULAR".to_string(),
                value,
                semester: 1,
            },
        )
        .await
        .unwrap();
    }

    let all = ScoreRepo::list(&pool, Some(class_id), None, None).await.unwrap();
    assert_eq!(all.len(), 2);

    let only_first = ScoreRepo::list(&pool, Some(class_id), Some(first), None)
        .await
        .unwrap();
    assert_eq!(only_first.len(), 1);
    assert_eq!(only_first[0].value, 7.0);
}
