//! Route definitions for scores.
//!
//! ```text
//! GET    /      -> list_scores (filter by class/student/subject)
//! POST   /      -> create_score (enrollment-gated)
//! GET    /{id}  -> get_score
//! PUT    /{id}  -> update_score
//! DELETE /{id}  -> delete_score
//! ```

use axum::routing::get;
use axum::Router;

use crate::handlers::scores;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(scores::list_scores).post(scores::create_score))
        .route(
            "/{id}",
            get(scores::get_score)
                .put(scores::update_score)
                .delete(scores::delete_score),
        )
}
