//! Route definitions for the `/findings` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::finding;
use crate::state::AppState;

/// Routes mounted at `/findings`.
///
/// ```text
/// GET    /        -> list (?engagement_id=)
/// POST   /        -> create
/// GET    /{id}    -> get_by_id
/// PUT    /{id}    -> update
/// DELETE /{id}    -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(finding::list).post(finding::create))
        .route(
            "/{id}",
            get(finding::get_by_id)
                .put(finding::update)
                .delete(finding::delete),
        )
}
