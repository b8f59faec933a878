//! Handlers for `/recommendations`, their action plans, and the published
//! recommendations view.

use auditdesk_core::audit;
use auditdesk_core::types::DbId;
use auditdesk_db::models::action_plan::{ActionPlan, CreateActionPlan, UpdateActionPlan};
use auditdesk_db::models::recommendation::{
    CreateRecommendation, PublishedRecommendation, Recommendation, UpdateRecommendation,
};
use auditdesk_db::repositories::{ActionPlanRepo, RecommendationRepo};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RecommendationListParams {
    pub finding_id: Option<DbId>,
}

fn validate_fields(priority: Option<&str>, status: Option<&str>) -> Result<(), String> {
    if let Some(p) = priority {
        audit::validate_priority(p)?;
    }
    if let Some(s) = status {
        audit::validate_recommendation_status(s)?;
    }
    Ok(())
}

/// POST /api/v1/recommendations
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateRecommendation>,
) -> AppResult<(StatusCode, Json<Recommendation>)> {
    if input.description.trim().is_empty() {
        return Err(AppError::BadRequest("description must not be empty".into()));
    }
    validate_fields(input.priority.as_deref(), input.status.as_deref())
        .map_err(AppError::BadRequest)?;
    let rec = RecommendationRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(rec)))
}

/// GET /api/v1/recommendations?finding_id=
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<RecommendationListParams>,
) -> AppResult<Json<DataResponse<Vec<Recommendation>>>> {
    let recs = RecommendationRepo::list(&state.pool, params.finding_id).await?;
    Ok(Json(DataResponse { data: recs }))
}

/// GET /api/v1/recommendations/published
pub async fn list_published(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<PublishedRecommendation>>>> {
    let rows = RecommendationRepo::list_published(&state.pool).await?;
    Ok(Json(DataResponse { data: rows }))
}

/// GET /api/v1/recommendations/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Recommendation>> {
    let rec = RecommendationRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::not_found("Recommendation", id))?;
    Ok(Json(rec))
}

/// PUT /api/v1/recommendations/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateRecommendation>,
) -> AppResult<Json<Recommendation>> {
    validate_fields(input.priority.as_deref(), input.status.as_deref())
        .map_err(AppError::BadRequest)?;
    let rec = RecommendationRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::not_found("Recommendation", id))?;
    Ok(Json(rec))
}

/// DELETE /api/v1/recommendations/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    if RecommendationRepo::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("Recommendation", id))
    }
}

// ---------------------------------------------------------------------------
// Action plans
// ---------------------------------------------------------------------------

/// GET /api/v1/recommendations/{id}/action-plans
pub async fn list_action_plans(
    State(state): State<AppState>,
    Path(recommendation_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<ActionPlan>>>> {
    RecommendationRepo::find_by_id(&state.pool, recommendation_id)
        .await?
        .ok_or(AppError::not_found("Recommendation", recommendation_id))?;
    let plans = ActionPlanRepo::list_by_recommendation(&state.pool, recommendation_id).await?;
    Ok(Json(DataResponse { data: plans }))
}

/// POST /api/v1/recommendations/{id}/action-plans
pub async fn create_action_plan(
    State(state): State<AppState>,
    Path(recommendation_id): Path<DbId>,
    Json(input): Json<CreateActionPlan>,
) -> AppResult<(StatusCode, Json<ActionPlan>)> {
    if input.description.trim().is_empty() {
        return Err(AppError::BadRequest("description must not be empty".into()));
    }
    if let Some(status) = &input.status {
        audit::validate_action_plan_status(status).map_err(AppError::BadRequest)?;
    }
    RecommendationRepo::find_by_id(&state.pool, recommendation_id)
        .await?
        .ok_or(AppError::not_found("Recommendation", recommendation_id))?;
    let plan = ActionPlanRepo::create(&state.pool, recommendation_id, &input).await?;
    Ok((StatusCode::CREATED, Json(plan)))
}

/// PUT /api/v1/action-plans/{id}
pub async fn update_action_plan(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateActionPlan>,
) -> AppResult<Json<ActionPlan>> {
    if let Some(status) = &input.status {
        audit::validate_action_plan_status(status).map_err(AppError::BadRequest)?;
    }
    if let Some(pct) = input.progress_pct {
        audit::validate_progress_pct(pct).map_err(AppError::BadRequest)?;
    }
    let plan = ActionPlanRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::not_found("ActionPlan", id))?;
    Ok(Json(plan))
}
