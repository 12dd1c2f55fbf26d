//! HTTP-level tests for class CRUD and the enrollment ledger.

mod common;

use axum::http::StatusCode;
use sqlx::PgPool;

use common::{
    body_json, create_class, create_grade, create_student, create_year, delete, enroll, get,
    post_json,
};

/// (year_id, grade_id) pair most class tests need.
async fn reference_fixture(app: &axum::Router) -> (i64, i64) {
    let year = create_year(app, "2025-2026", true).await;
    let grade = create_grade(app, "Grade 10", 10).await;
    (year, grade)
}

#[sqlx::test(migrations = "../db/migrations")]
async fn create_class_returns_201(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (year, grade) = reference_fixture(&app).await;

    let response = post_json(
        &app,
        "/api/classes",
        serde_json::json!({ "name": "10A", "gradeId": grade, "academicYearId": year }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert_eq!(json["name"], "10A");
    assert_eq!(json["academicYearId"], year);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn class_name_is_unique_per_year_only(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (year, grade) = reference_fixture(&app).await;
    create_class(&app, "10A", grade, year).await;

    // Same name, same year: conflict.
    let duplicate = post_json(
        &app,
        "/api/classes",
        serde_json::json!({ "name": "10A", "gradeId": grade, "academicYearId": year }),
    )
    .await;
    assert_eq!(duplicate.status(), StatusCode::CONFLICT);

    // Same name in another year is fine.
    let other_year = post_json(
        &app,
        "/api/academic-years",
        serde_json::json!({
            "name": "2026-2027",
            "startDate": "2026-09-01",
            "endDate": "2027-06-30",
        }),
    )
    .await;
    let other_year = body_json(other_year).await["id"].as_i64().unwrap();

    let response = post_json(
        &app,
        "/api/classes",
        serde_json::json!({ "name": "10A", "gradeId": grade, "academicYearId": other_year }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn create_class_with_unresolved_grade_returns_400(pool: PgPool) {
    let app = common::build_test_app(pool);
    let year = create_year(&app, "2025-2026", true).await;

    let response = post_json(
        &app,
        "/api/classes",
        serde_json::json!({ "name": "10A", "gradeId": 999999, "academicYearId": year }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn enroll_then_roster_shows_the_student(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (year, grade) = reference_fixture(&app).await;
    let class = create_class(&app, "10A", grade, year).await;
    let student = create_student(&app, "S001", "An Pham").await;

    enroll(&app, class, student).await;

    let roster = body_json(get(&app, &format!("/api/classes/{class}/students")).await).await;
    let roster = roster.as_array().unwrap();
    assert_eq!(roster.len(), 1);
    assert_eq!(roster[0]["studentCode"], "S001");

    // The class detail carries the roster too.
    let detail = body_json(get(&app, &format!("/api/classes/{class}")).await).await;
    assert_eq!(detail["students"].as_array().unwrap().len(), 1);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn double_enrollment_returns_409(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (year, grade) = reference_fixture(&app).await;
    let class = create_class(&app, "10A", grade, year).await;
    let student = create_student(&app, "S001", "An Pham").await;
    enroll(&app, class, student).await;

    let response = post_json(
        &app,
        &format!("/api/classes/{class}/students"),
        serde_json::json!({ "studentId": student }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let json = body_json(response).await;
    assert_eq!(json["message"], "Student is already enrolled in this class");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn enrolling_an_unknown_student_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (year, grade) = reference_fixture(&app).await;
    let class = create_class(&app, "10A", grade, year).await;

    let response = post_json(
        &app,
        &format!("/api/classes/{class}/students"),
        serde_json::json!({ "studentId": 999999 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn unenroll_removes_the_link(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (year, grade) = reference_fixture(&app).await;
    let class = create_class(&app, "10A", grade, year).await;
    let student = create_student(&app, "S001", "An Pham").await;
    enroll(&app, class, student).await;

    let response = delete(&app, &format!("/api/classes/{class}/students/{student}")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let roster = body_json(get(&app, &format!("/api/classes/{class}/students")).await).await;
    assert!(roster.as_array().unwrap().is_empty());

    // Removing again: the enrollment no longer exists.
    let again = delete(&app, &format!("/api/classes/{class}/students/{student}")).await;
    assert_eq!(again.status(), StatusCode::NOT_FOUND);
    let json = body_json(again).await;
    assert_eq!(json["message"], "Enrollment not found");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn delete_class_is_blocked_by_enrollments(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (year, grade) = reference_fixture(&app).await;
    let class = create_class(&app, "10A", grade, year).await;
    let student = create_student(&app, "S001", "An Pham").await;
    enroll(&app, class, student).await;

    let response = delete(&app, &format!("/api/classes/{class}")).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["message"], "Cannot delete class with existing enrollments");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn list_classes_filters_by_year_and_reports_enrollment_counts(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (year, grade) = reference_fixture(&app).await;
    let class = create_class(&app, "10A", grade, year).await;
    let student = create_student(&app, "S001", "An Pham").await;
    enroll(&app, class, student).await;

    let listed = body_json(get(&app, &format!("/api/classes?academicYearId={year}")).await).await;
    let listed = listed.as_array().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0]["enrollmentCount"], 1);
    assert_eq!(listed[0]["gradeName"], "Grade 10");

    let empty = body_json(get(&app, "/api/classes?academicYearId=999999").await).await;
    assert!(empty.as_array().unwrap().is_empty());
}
