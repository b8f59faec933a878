use axum::routing::get;
use axum::Router;

use crate::handlers::dashboard;
use crate::state::AppState;

/// Routes mounted at `/dashboard`.
///
/// ```text
/// GET /widgets/risk-profile          -> risk_profile_widget
/// GET /widgets/kra-completion        -> kra_completion_widget (?year=&quarter=)
/// GET /widgets/pending-risk-events   -> pending_risk_events_widget (?limit=)
/// GET /trends/psap                   -> psap_trend (?org_unit_id=)
/// GET /trends/kra                    -> kra_trend (?kra_id=)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/widgets/risk-profile",
            get(dashboard::risk_profile_widget),
        )
        .route(
            "/widgets/kra-completion",
            get(dashboard::kra_completion_widget),
        )
        .route(
            "/widgets/pending-risk-events",
            get(dashboard::pending_risk_events_widget),
        )
        .route("/trends/psap", get(dashboard::psap_trend))
        .route("/trends/kra", get(dashboard::kra_trend))
}
