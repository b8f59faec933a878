pub mod dashboard;
pub mod engagement;
pub mod export;
pub mod finding;
pub mod health;
pub mod kra;
pub mod notification;
pub mod org_unit;
pub mod psap;
pub mod recommendation;
pub mod risk;

use axum::routing::put;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /engagements                          CRUD
/// /findings                             CRUD (?engagement_id=)
/// /recommendations                      CRUD (?finding_id=), published view,
///                                       nested action plans
/// /action-plans/{id}                    update
/// /org-units, /people                   directory
/// /risk-profiles, /risk-events,
/// /risk-register                        risk
/// /psap                                 standards, assessments, scores, ratings
/// /kras, /kra-activities/{id}/quarters  workplan
/// /notifications                        list, mark read
/// /dashboard/widgets, /dashboard/trends aggregates
/// /exports/{dataset}                    CSV download
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/engagements", engagement::router())
        .nest("/findings", finding::router())
        .nest("/recommendations", recommendation::router())
        .route(
            "/action-plans/{id}",
            put(handlers::recommendation::update_action_plan),
        )
        .merge(org_unit::router())
        .merge(risk::router())
        .nest("/psap", psap::router())
        .merge(kra::router())
        .nest("/notifications", notification::router())
        .nest("/dashboard", dashboard::router())
        .nest("/exports", export::router())
}
