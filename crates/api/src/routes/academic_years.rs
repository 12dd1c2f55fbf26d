//! Route definitions for academic years.
//!
//! ```text
//! GET    /          -> list_years
//! POST   /          -> create_year
//! GET    /active    -> get_active_year
//! GET    /{id}      -> get_year
//! PUT    /{id}      -> update_year
//! DELETE /{id}      -> delete_year (guarded by classes)
//! ```

use axum::routing::get;
use axum::Router;

use crate::handlers::academic_years;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(academic_years::list_years).post(academic_years::create_year),
        )
        .route("/active", get(academic_years::get_active_year))
        .route(
            "/{id}",
            get(academic_years::get_year)
                .put(academic_years::update_year)
                .delete(academic_years::delete_year),
        )
}
