//! Route definitions for classes and the enrollment ledger.
//!
//! ```text
//! GET    /                          -> list_classes (filter by year/grade)
//! POST   /                          -> create_class
//! GET    /{id}                      -> get_class (with roster)
//! PUT    /{id}                      -> update_class
//! DELETE /{id}                      -> delete_class (guarded by enrollments)
//! GET    /{id}/students             -> class_roster
//! POST   /{id}/students             -> enroll_student
//! DELETE /{id}/students/{student_id} -> unenroll_student (guarded by scores)
//! ```

use axum::routing::{delete, get};
use axum::Router;

use crate::handlers::classes;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(classes::list_classes).post(classes::create_class))
        .route(
            "/{id}",
            get(classes::get_class)
                .put(classes::update_class)
                .delete(classes::delete_class),
        )
        .route(
            "/{id}/students",
            get(classes::class_roster).post(classes::enroll_student),
        )
        .route(
            "/{id}/students/{student_id}",
            delete(classes::unenroll_student),
        )
}
