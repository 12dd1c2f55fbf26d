//! Shared helpers for router-level integration tests.
//!
//! Builds the real application router (same middleware stack as production)
//! and drives it with `tower::ServiceExt::oneshot`, no TCP listener needed.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request, Response};
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use schoolrec_api::auth::jwt::{generate_access_token, JwtConfig};
use schoolrec_api::config::ServerConfig;
use schoolrec_api::router::build_app_router;
use schoolrec_api::state::AppState;

/// Signing secret shared by the test config and the tokens minted below.
const TEST_JWT_SECRET: &str = "integration-test-secret-not-for-production";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: TEST_JWT_SECRET.to_string(),
            expiry_mins: 60,
        },
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool. Mirrors the router construction in `main.rs`.
pub fn build_test_app(pool: PgPool) -> axum::Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

/// A valid token carrying only the TEACHER role.
pub fn teacher_token() -> String {
    generate_access_token(1, &["TEACHER".to_string()], &test_config().jwt)
        .expect("token generation should succeed")
}

/// A valid token carrying the ADMIN role.
pub fn admin_token() -> String {
    generate_access_token(1, &["ADMIN".to_string()], &test_config().jwt)
        .expect("token generation should succeed")
}

/// Send a request with an optional bearer token and optional JSON body.
pub async fn request(
    app: &axum::Router,
    method: Method,
    path: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(path);
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.clone().oneshot(request).await.unwrap()
}

/// GET with a teacher token.
pub async fn get(app: &axum::Router, path: &str) -> Response<Body> {
    request(app, Method::GET, path, Some(&teacher_token()), None).await
}

/// POST with a teacher token and JSON body.
pub async fn post_json(
    app: &axum::Router,
    path: &str,
    body: serde_json::Value,
) -> Response<Body> {
    request(app, Method::POST, path, Some(&teacher_token()), Some(body)).await
}

/// PUT with a teacher token and JSON body.
pub async fn put_json(app: &axum::Router, path: &str, body: serde_json::Value) -> Response<Body> {
    request(app, Method::PUT, path, Some(&teacher_token()), Some(body)).await
}

/// DELETE with a teacher token.
pub async fn delete(app: &axum::Router, path: &str) -> Response<Body> {
    request(app, Method::DELETE, path, Some(&teacher_token()), None).await
}

/// Read a response body as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap_or_else(|e| panic!("body was not JSON: {e}"))
}

// ---------------------------------------------------------------------------
// Fixture builders (all via the API, so FKs resolve the same way production
// requests do)
// ---------------------------------------------------------------------------

/// Create an academic year, returning its id.
pub async fn create_year(app: &axum::Router, name: &str, is_current: bool) -> i64 {
    let response = post_json(
        app,
        "/api/academic-years",
        serde_json::json!({
            "name": name,
            "startDate": "2025-09-01",
            "endDate": "2026-06-30",
            "isCurrent": is_current,
        }),
    )
    .await;
    assert_eq!(response.status(), 201, "year fixture should be created");
    body_json(response).await["id"].as_i64().unwrap()
}

/// Create a grade, returning its id.
pub async fn create_grade(app: &axum::Router, name: &str, level: i32) -> i64 {
    let response = post_json(
        app,
        "/api/grades",
        serde_json::json!({ "name": name, "level": level }),
    )
    .await;
    assert_eq!(response.status(), 201, "grade fixture should be created");
    body_json(response).await["id"].as_i64().unwrap()
}

/// Create a subject, returning its id.
pub async fn create_subject(app: &axum::Router, code: &str, name: &str) -> i64 {
    let response = post_json(
        app,
        "/api/subjects",
        serde_json::json!({ "code": code, "name": name }),
    )
    .await;
    assert_eq!(response.status(), 201, "subject fixture should be created");
    body_json(response).await["id"].as_i64().unwrap()
}

/// Create a class in the given grade and year, returning its id.
pub async fn create_class(app: &axum::Router, name: &str, grade_id: i64, year_id: i64) -> i64 {
    let response = post_json(
        app,
        "/api/classes",
        serde_json::json!({
            "name": name,
            "gradeId": grade_id,
            "academicYearId": year_id,
        }),
    )
    .await;
    assert_eq!(response.status(), 201, "class fixture should be created");
    body_json(response).await["id"].as_i64().unwrap()
}

/// Create a student, returning its id.
pub async fn create_student(app: &axum::Router, code: &str, name: &str) -> i64 {
    let response = post_json(
        app,
        "/api/students",
        serde_json::json!({
            "studentCode": code,
            "fullName": name,
            "dob": "2010-04-12",
            "gender": "F",
        }),
    )
    .await;
    assert_eq!(response.status(), 201, "student fixture should be created");
    body_json(response).await["id"].as_i64().unwrap()
}

/// Enroll a student into a class.
pub async fn enroll(app: &axum::Router, class_id: i64, student_id: i64) {
    let response = post_json(
        app,
        &format!("/api/classes/{class_id}/students"),
        serde_json::json!({ "studentId": student_id }),
    )
    .await;
    assert_eq!(response.status(), 201, "enrollment fixture should be created");
}
