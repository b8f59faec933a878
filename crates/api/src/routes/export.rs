use axum::routing::get;
use axum::Router;

use crate::handlers::export;
use crate::state::AppState;

/// Routes mounted at `/exports`.
pub fn router() -> Router<AppState> {
    Router::new().route("/{dataset}", get(export::export_dataset))
}
