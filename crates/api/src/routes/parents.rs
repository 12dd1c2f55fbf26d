//! Route definitions for parents.
//!
//! ```text
//! GET    /      -> list_parents (paginated, searchable)
//! POST   /      -> create_parent
//! GET    /{id}  -> get_parent
//! PUT    /{id}  -> update_parent
//! DELETE /{id}  -> delete_parent (clears student references first)
//! ```

use axum::routing::get;
use axum::Router;

use crate::handlers::parents;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(parents::list_parents).post(parents::create_parent))
        .route(
            "/{id}",
            get(parents::get_parent)
                .put(parents::update_parent)
                .delete(parents::delete_parent),
        )
}
