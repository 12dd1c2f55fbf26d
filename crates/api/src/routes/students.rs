//! Route definitions for students.
//!
//! ```text
//! GET    /      -> list_students (paginated, searchable)
//! POST   /      -> create_student
//! GET    /{id}  -> get_student (with enrollments)
//! PUT    /{id}  -> update_student
//! DELETE /{id}  -> delete_student (soft)
//! ```

use axum::routing::get;
use axum::Router;

use crate::handlers::students;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(students::list_students).post(students::create_student),
        )
        .route(
            "/{id}",
            get(students::get_student)
                .put(students::update_student)
                .delete(students::delete_student),
        )
}
