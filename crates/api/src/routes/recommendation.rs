//! Route definitions for the `/recommendations` resource and its nested
//! action plans.

use axum::routing::get;
use axum::Router;

use crate::handlers::recommendation;
use crate::state::AppState;

/// Routes mounted at `/recommendations`.
///
/// ```text
/// GET    /                     -> list (?finding_id=)
/// POST   /                     -> create
/// GET    /published            -> list_published
/// GET    /{id}                 -> get_by_id
/// PUT    /{id}                 -> update
/// DELETE /{id}                 -> delete
/// GET    /{id}/action-plans    -> list_action_plans
/// POST   /{id}/action-plans    -> create_action_plan
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(recommendation::list).post(recommendation::create))
        .route("/published", get(recommendation::list_published))
        .route(
            "/{id}",
            get(recommendation::get_by_id)
                .put(recommendation::update)
                .delete(recommendation::delete),
        )
        .route(
            "/{id}/action-plans",
            get(recommendation::list_action_plans).post(recommendation::create_action_plan),
        )
}
