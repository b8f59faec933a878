use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::risk;
use crate::state::AppState;

/// Risk routes, merged at the `/api/v1` root.
///
/// ```text
/// GET  /risk-profiles              -> list_profiles
/// POST /risk-profiles              -> create_profile
/// GET  /risk-profiles/{id}         -> get_profile (with items)
/// POST /risk-profiles/{id}/items   -> add_item
/// GET  /risk-events                -> list_events (?status=)
/// POST /risk-events                -> create_event
/// PUT  /risk-events/{id}/status    -> update_event_status
/// GET  /risk-register              -> list_register
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/risk-profiles",
            get(risk::list_profiles).post(risk::create_profile),
        )
        .route("/risk-profiles/{id}", get(risk::get_profile))
        .route("/risk-profiles/{id}/items", post(risk::add_item))
        .route(
            "/risk-events",
            get(risk::list_events).post(risk::create_event),
        )
        .route("/risk-events/{id}/status", put(risk::update_event_status))
        .route("/risk-register", get(risk::list_register))
}
