//! Handlers for the `/findings` resource.

use auditdesk_core::audit;
use auditdesk_core::types::DbId;
use auditdesk_db::models::finding::{CreateFinding, Finding, UpdateFinding};
use auditdesk_db::repositories::FindingRepo;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct FindingListParams {
    pub engagement_id: Option<DbId>,
}

/// POST /api/v1/findings
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateFinding>,
) -> AppResult<(StatusCode, Json<Finding>)> {
    audit::validate_title("title", &input.title).map_err(AppError::BadRequest)?;
    if let Some(rating) = &input.rating {
        audit::validate_finding_rating(rating).map_err(AppError::BadRequest)?;
    }
    if let Some(status) = &input.status {
        audit::validate_finding_status(status).map_err(AppError::BadRequest)?;
    }
    let finding = FindingRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(finding)))
}

/// GET /api/v1/findings?engagement_id=
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<FindingListParams>,
) -> AppResult<Json<DataResponse<Vec<Finding>>>> {
    let findings = FindingRepo::list(&state.pool, params.engagement_id).await?;
    Ok(Json(DataResponse { data: findings }))
}

/// GET /api/v1/findings/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Finding>> {
    let finding = FindingRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::not_found("Finding", id))?;
    Ok(Json(finding))
}

/// PUT /api/v1/findings/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateFinding>,
) -> AppResult<Json<Finding>> {
    if let Some(title) = &input.title {
        audit::validate_title("title", title).map_err(AppError::BadRequest)?;
    }
    if let Some(rating) = &input.rating {
        audit::validate_finding_rating(rating).map_err(AppError::BadRequest)?;
    }
    if let Some(status) = &input.status {
        audit::validate_finding_status(status).map_err(AppError::BadRequest)?;
    }
    let finding = FindingRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::not_found("Finding", id))?;
    Ok(Json(finding))
}

/// DELETE /api/v1/findings/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    if FindingRepo::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("Finding", id))
    }
}
