use axum::routing::get;
use axum::Router;

use crate::handlers::org_unit;
use crate::state::AppState;

/// Directory routes, merged at the `/api/v1` root.
///
/// ```text
/// GET  /org-units        -> list
/// POST /org-units        -> create
/// GET  /org-units/{id}   -> get_by_id
/// GET  /people           -> list_people (?org_unit_id=)
/// POST /people           -> create_person
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/org-units", get(org_unit::list).post(org_unit::create))
        .route("/org-units/{id}", get(org_unit::get_by_id))
        .route(
            "/people",
            get(org_unit::list_people).post(org_unit::create_person),
        )
}
