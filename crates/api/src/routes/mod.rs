pub mod academic_years;
pub mod auth;
pub mod classes;
pub mod grades;
pub mod health;
pub mod parents;
pub mod scores;
pub mod students;
pub mod subjects;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                              login (public)
///
/// /academic-years                          list, create
/// /academic-years/active                   the single current year
/// /academic-years/{id}                     get, update, delete (guarded)
///
/// /grades                                  list, create
/// /grades/{id}                             get, update, delete (guarded)
///
/// /subjects                                list, create
/// /subjects/{id}                           get, update, delete (guarded)
///
/// /classes                                 list (filterable), create
/// /classes/{id}                            get, update, delete (guarded)
/// /classes/{id}/students                   roster, enroll (POST)
/// /classes/{id}/students/{student_id}      unenroll (guarded by scores)
///
/// /scores                                  list (filterable), create (enrollment-gated)
/// /scores/{id}                             get, update, delete
///
/// /students                                paginated list, create
/// /students/{id}                           get, update, soft delete
///
/// /parents                                 paginated list, create
/// /parents/{id}                            get, update, delete (cascades null-out)
///
/// /users                                   paginated list, create (admin only)
/// /users/{id}                              get, update, deactivate (admin only)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/academic-years", academic_years::router())
        .nest("/grades", grades::router())
        .nest("/subjects", subjects::router())
        .nest("/classes", classes::router())
        .nest("/scores", scores::router())
        .nest("/students", students::router())
        .nest("/parents", parents::router())
        .nest("/users", users::router())
}
