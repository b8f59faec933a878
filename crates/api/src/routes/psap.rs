use axum::routing::get;
use axum::Router;

use crate::handlers::psap;
use crate::state::AppState;

/// Routes mounted at `/psap`.
///
/// ```text
/// GET  /standards                  -> list_standards
/// POST /standards                  -> create_standard
/// GET  /assessments                -> list_assessments (?org_unit_id=)
/// POST /assessments                -> create_assessment
/// GET  /assessments/{id}/scores    -> list_scores
/// PUT  /assessments/{id}/scores    -> upsert_score
/// GET  /ratings                    -> list_ratings
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/standards",
            get(psap::list_standards).post(psap::create_standard),
        )
        .route(
            "/assessments",
            get(psap::list_assessments).post(psap::create_assessment),
        )
        .route(
            "/assessments/{id}/scores",
            get(psap::list_scores).put(psap::upsert_score),
        )
        .route("/ratings", get(psap::list_ratings))
}
