use axum::routing::{get, put};
use axum::Router;

use crate::handlers::kra;
use crate::state::AppState;

/// KRA routes, merged at the `/api/v1` root.
///
/// ```text
/// GET  /kras                          -> list
/// POST /kras                          -> create
/// GET  /kras/{id}/activities          -> list_activities
/// POST /kras/{id}/activities          -> create_activity
/// PUT  /kra-activities/{id}/quarters  -> upsert_quarter
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/kras", get(kra::list).post(kra::create))
        .route(
            "/kras/{id}/activities",
            get(kra::list_activities).post(kra::create_activity),
        )
        .route("/kra-activities/{id}/quarters", put(kra::upsert_quarter))
}
