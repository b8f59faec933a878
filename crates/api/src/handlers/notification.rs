//! Handlers for `/notifications`.

use auditdesk_core::types::DbId;
use auditdesk_db::models::notification::Notification;
use auditdesk_db::repositories::NotificationRepo;
use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct NotificationListParams {
    pub person_id: Option<DbId>,
    #[serde(default)]
    pub unread_only: bool,
}

/// GET /api/v1/notifications?person_id=&unread_only=
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<NotificationListParams>,
) -> AppResult<Json<DataResponse<Vec<Notification>>>> {
    let items = NotificationRepo::list(&state.pool, params.person_id, params.unread_only).await?;
    Ok(Json(DataResponse { data: items }))
}

/// POST /api/v1/notifications/{id}/read
pub async fn mark_read(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Notification>> {
    let notification = NotificationRepo::mark_read(&state.pool, id)
        .await?
        .ok_or(AppError::not_found("Notification", id))?;
    Ok(Json(notification))
}
