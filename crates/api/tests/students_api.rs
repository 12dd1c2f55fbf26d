//! HTTP-level tests for the student endpoints: soft delete, pagination,
//! search.

mod common;

use axum::http::StatusCode;
use sqlx::PgPool;

use common::{body_json, create_student, delete, get, post_json, put_json};

#[sqlx::test(migrations = "../db/migrations")]
async fn create_returns_201(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = post_json(
        &app,
        "/api/students",
        serde_json::json!({
            "studentCode": "S001",
            "fullName": "An Pham",
            "dob": "2010-04-12",
            "gender": "F",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert_eq!(json["studentCode"], "S001");
    assert_eq!(json["isDeleted"], false);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn duplicate_student_code_returns_409(pool: PgPool) {
    let app = common::build_test_app(pool);
    create_student(&app, "S001", "An Pham").await;

    let response = post_json(
        &app,
        "/api/students",
        serde_json::json!({
            "studentCode": "S001",
            "fullName": "Someone Else",
            "dob": "2010-01-01",
            "gender": "M",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(response).await["message"], "Student code already exists");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn soft_deleted_student_disappears_but_the_row_survives(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let id = create_student(&app, "S001", "An Pham").await;

    let response = delete(&app, &format!("/api/students/{id}")).await;
    assert_eq!(response.status(), StatusCode::OK);

    // Gone from the default read paths.
    let gone = get(&app, &format!("/api/students/{id}")).await;
    assert_eq!(gone.status(), StatusCode::NOT_FOUND);
    let listed = body_json(get(&app, "/api/students").await).await;
    assert_eq!(listed["pagination"]["total"], 0);

    // The row is still in storage, flagged deleted.
    let (is_deleted,): (bool,) =
        sqlx::query_as("SELECT is_deleted FROM students WHERE id = $1")
            .bind(id)
            .fetch_one(&pool)
            .await
            .unwrap();
    assert!(is_deleted);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn pagination_envelope_reports_filtered_totals(pool: PgPool) {
    let app = common::build_test_app(pool);
    for i in 0..12 {
        create_student(&app, &format!("S{i:03}"), "Searchable Name").await;
    }
    create_student(&app, "X001", "Unrelated Person").await;

    let page = body_json(get(&app, "/api/students?page=2&limit=5").await).await;
    assert_eq!(page["data"].as_array().unwrap().len(), 5);
    assert_eq!(page["pagination"]["total"], 13);
    assert_eq!(page["pagination"]["page"], 2);
    assert_eq!(page["pagination"]["limit"], 5);
    assert_eq!(page["pagination"]["totalPages"], 3);

    // Search applies to both the slice and the count.
    let searched = body_json(get(&app, "/api/students?search=searchable").await).await;
    assert_eq!(searched["pagination"]["total"], 12);
    assert_eq!(searched["pagination"]["totalPages"], 2);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn update_changes_fields_and_rejects_stolen_codes(pool: PgPool) {
    let app = common::build_test_app(pool);
    let id = create_student(&app, "S001", "An Pham").await;
    create_student(&app, "S002", "Binh Vo").await;

    let response = put_json(
        &app,
        &format!("/api/students/{id}"),
        serde_json::json!({ "fullName": "An Pham Updated" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["fullName"], "An Pham Updated");

    // Taking another student's code is a conflict.
    let stolen = put_json(
        &app,
        &format!("/api/students/{id}"),
        serde_json::json!({ "studentCode": "S002" }),
    )
    .await;
    assert_eq!(stolen.status(), StatusCode::CONFLICT);

    // Re-asserting its own code is fine.
    let own = put_json(
        &app,
        &format!("/api/students/{id}"),
        serde_json::json!({ "studentCode": "S001" }),
    )
    .await;
    assert_eq!(own.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn student_detail_includes_enrollments(pool: PgPool) {
    let app = common::build_test_app(pool);
    let year = common::create_year(&app, "2025-2026", true).await;
    let grade = common::create_grade(&app, "Grade 10", 10).await;
    let class = common::create_class(&app, "10A", grade, year).await;
    let student = create_student(&app, "S001", "An Pham").await;
    common::enroll(&app, class, student).await;

    let detail = body_json(get(&app, &format!("/api/students/{student}")).await).await;
    let enrollments = detail["enrollments"].as_array().unwrap();
    assert_eq!(enrollments.len(), 1);
    assert_eq!(enrollments[0]["className"], "10A");
}
