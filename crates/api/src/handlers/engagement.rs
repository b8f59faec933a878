//! Handlers for the `/engagements` resource.

use auditdesk_core::audit;
use auditdesk_core::types::DbId;
use auditdesk_db::models::engagement::{CreateEngagement, Engagement, UpdateEngagement};
use auditdesk_db::repositories::EngagementRepo;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

fn validate_create(input: &CreateEngagement) -> Result<(), String> {
    audit::validate_title("title", &input.title)?;
    if let Some(kind) = &input.engagement_type {
        audit::validate_engagement_type(kind)?;
    }
    if let Some(status) = &input.status {
        audit::validate_engagement_status(status)?;
    }
    audit::validate_date_range(input.planned_start, input.planned_end)
}

fn validate_update(input: &UpdateEngagement) -> Result<(), String> {
    if let Some(title) = &input.title {
        audit::validate_title("title", title)?;
    }
    if let Some(kind) = &input.engagement_type {
        audit::validate_engagement_type(kind)?;
    }
    if let Some(status) = &input.status {
        audit::validate_engagement_status(status)?;
    }
    audit::validate_date_range(input.planned_start, input.planned_end)
}

/// POST /api/v1/engagements
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateEngagement>,
) -> AppResult<(StatusCode, Json<Engagement>)> {
    validate_create(&input).map_err(AppError::BadRequest)?;
    let engagement = EngagementRepo::create(&state.pool, &input).await?;
    tracing::info!(engagement_id = engagement.id, "Engagement created");
    Ok((StatusCode::CREATED, Json(engagement)))
}

/// GET /api/v1/engagements
pub async fn list(State(state): State<AppState>) -> AppResult<Json<DataResponse<Vec<Engagement>>>> {
    let engagements = EngagementRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: engagements }))
}

/// GET /api/v1/engagements/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Engagement>> {
    let engagement = EngagementRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::not_found("Engagement", id))?;
    Ok(Json(engagement))
}

/// PUT /api/v1/engagements/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateEngagement>,
) -> AppResult<Json<Engagement>> {
    validate_update(&input).map_err(AppError::BadRequest)?;
    let engagement = EngagementRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::not_found("Engagement", id))?;
    Ok(Json(engagement))
}

/// DELETE /api/v1/engagements/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    if EngagementRepo::delete(&state.pool, id).await? {
        tracing::info!(engagement_id = id, "Engagement deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("Engagement", id))
    }
}
