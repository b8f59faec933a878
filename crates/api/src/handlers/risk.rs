//! Handlers for risk profiles, risk events, and the risk register.

use auditdesk_core::error::CoreError;
use auditdesk_core::types::DbId;
use auditdesk_core::{audit, kra, risk};
use auditdesk_db::models::risk::{
    CreateRiskEvent, CreateRiskProfile, CreateRiskProfileItem, RiskEvent, RiskProfile,
    RiskProfileItem, RiskRegisterEntry, UpdateRiskEventStatus,
};
use auditdesk_db::repositories::{RiskEventRepo, RiskProfileRepo};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// A risk profile together with its items.
#[derive(Debug, Serialize)]
pub struct RiskProfileDetail {
    #[serde(flatten)]
    pub profile: RiskProfile,
    pub items: Vec<RiskProfileItem>,
}

#[derive(Debug, Deserialize)]
pub struct RiskEventListParams {
    pub status: Option<String>,
}

// ---------------------------------------------------------------------------
// Profiles
// ---------------------------------------------------------------------------

/// GET /api/v1/risk-profiles
pub async fn list_profiles(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<RiskProfile>>>> {
    let profiles = RiskProfileRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: profiles }))
}

/// POST /api/v1/risk-profiles
pub async fn create_profile(
    State(state): State<AppState>,
    Json(input): Json<CreateRiskProfile>,
) -> AppResult<(StatusCode, Json<RiskProfile>)> {
    audit::validate_title("title", &input.title).map_err(AppError::BadRequest)?;
    kra::validate_quarter(input.quarter).map_err(AppError::BadRequest)?;
    let profile = RiskProfileRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(profile)))
}

/// GET /api/v1/risk-profiles/{id}
pub async fn get_profile(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<RiskProfileDetail>> {
    let profile = RiskProfileRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::not_found("RiskProfile", id))?;
    let items = RiskProfileRepo::list_items(&state.pool, id).await?;
    Ok(Json(RiskProfileDetail { profile, items }))
}

/// POST /api/v1/risk-profiles/{id}/items
///
/// The stored `risk_level` is classified from likelihood and impact.
pub async fn add_item(
    State(state): State<AppState>,
    Path(profile_id): Path<DbId>,
    Json(input): Json<CreateRiskProfileItem>,
) -> AppResult<(StatusCode, Json<RiskProfileItem>)> {
    audit::validate_title("title", &input.title).map_err(AppError::BadRequest)?;
    risk::validate_rating("likelihood", input.likelihood).map_err(AppError::BadRequest)?;
    risk::validate_rating("impact", input.impact).map_err(AppError::BadRequest)?;
    if let Some(status) = &input.status {
        risk::validate_item_status(status).map_err(AppError::BadRequest)?;
    }
    RiskProfileRepo::find_by_id(&state.pool, profile_id)
        .await?
        .ok_or(AppError::not_found("RiskProfile", profile_id))?;

    let level = risk::classify_risk(input.likelihood, input.impact);
    let item = RiskProfileRepo::create_item(&state.pool, profile_id, &input, level).await?;
    tracing::debug!(item_id = item.id, risk_level = level, "Risk item added");
    Ok((StatusCode::CREATED, Json(item)))
}

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

/// GET /api/v1/risk-events?status=
pub async fn list_events(
    State(state): State<AppState>,
    Query(params): Query<RiskEventListParams>,
) -> AppResult<Json<DataResponse<Vec<RiskEvent>>>> {
    if let Some(status) = &params.status {
        risk::validate_event_status(status).map_err(AppError::BadRequest)?;
    }
    let events = RiskEventRepo::list(&state.pool, params.status.as_deref()).await?;
    Ok(Json(DataResponse { data: events }))
}

/// POST /api/v1/risk-events
pub async fn create_event(
    State(state): State<AppState>,
    Json(input): Json<CreateRiskEvent>,
) -> AppResult<(StatusCode, Json<RiskEvent>)> {
    audit::validate_title("title", &input.title).map_err(AppError::BadRequest)?;
    if let Some(priority) = input.priority {
        risk::validate_priority(priority).map_err(AppError::BadRequest)?;
    }
    let event = RiskEventRepo::create(&state.pool, &input).await?;
    tracing::info!(
        risk_event_id = event.id,
        priority = risk::priority_label(event.priority),
        "Risk event reported"
    );
    Ok((StatusCode::CREATED, Json(event)))
}

/// PUT /api/v1/risk-events/{id}/status
pub async fn update_event_status(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateRiskEventStatus>,
) -> AppResult<Json<RiskEvent>> {
    let current = RiskEventRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::not_found("RiskEvent", id))?;
    risk::validate_event_transition(&current.status, &input.status)
        .map_err(AppError::BadRequest)?;

    let Some(event) =
        RiskEventRepo::update_status(&state.pool, id, &current.status, &input.status).await?
    else {
        // Another writer moved the event after it was read.
        let latest = RiskEventRepo::find_by_id(&state.pool, id)
            .await?
            .ok_or(AppError::not_found("RiskEvent", id))?;
        return Err(AppError::Core(CoreError::Conflict(format!(
            "Risk event {id} is now '{}', expected '{}'",
            latest.status, current.status
        ))));
    };
    tracing::info!(
        risk_event_id = id,
        from = %current.status,
        to = %event.status,
        "Risk event status changed"
    );
    Ok(Json(event))
}

/// GET /api/v1/risk-register
pub async fn list_register(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<RiskRegisterEntry>>>> {
    let entries = RiskEventRepo::list_register(&state.pool).await?;
    Ok(Json(DataResponse { data: entries }))
}
