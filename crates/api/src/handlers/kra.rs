//! Handlers for strategic KRAs, activities, and quarterly statuses.

use auditdesk_core::types::DbId;
use auditdesk_core::{audit, kra};
use auditdesk_db::models::kra::{
    CreateKra, CreateKraActivity, KraActivity, QuarterlyStatus, StrategicKra,
    UpsertQuarterlyStatus,
};
use auditdesk_db::repositories::KraRepo;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/kras
pub async fn list(State(state): State<AppState>) -> AppResult<Json<DataResponse<Vec<StrategicKra>>>> {
    let kras = KraRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: kras }))
}

/// POST /api/v1/kras
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateKra>,
) -> AppResult<(StatusCode, Json<StrategicKra>)> {
    audit::validate_title("code", &input.code).map_err(AppError::BadRequest)?;
    audit::validate_title("title", &input.title).map_err(AppError::BadRequest)?;
    let kra = KraRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(kra)))
}

/// GET /api/v1/kras/{id}/activities
pub async fn list_activities(
    State(state): State<AppState>,
    Path(kra_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<KraActivity>>>> {
    KraRepo::find_by_id(&state.pool, kra_id)
        .await?
        .ok_or(AppError::not_found("Kra", kra_id))?;
    let activities = KraRepo::list_activities(&state.pool, kra_id).await?;
    Ok(Json(DataResponse { data: activities }))
}

/// POST /api/v1/kras/{id}/activities
pub async fn create_activity(
    State(state): State<AppState>,
    Path(kra_id): Path<DbId>,
    Json(input): Json<CreateKraActivity>,
) -> AppResult<(StatusCode, Json<KraActivity>)> {
    audit::validate_title("title", &input.title).map_err(AppError::BadRequest)?;
    KraRepo::find_by_id(&state.pool, kra_id)
        .await?
        .ok_or(AppError::not_found("Kra", kra_id))?;
    let activity = KraRepo::create_activity(&state.pool, kra_id, &input).await?;
    Ok((StatusCode::CREATED, Json(activity)))
}

/// PUT /api/v1/kra-activities/{id}/quarters
pub async fn upsert_quarter(
    State(state): State<AppState>,
    Path(activity_id): Path<DbId>,
    Json(input): Json<UpsertQuarterlyStatus>,
) -> AppResult<Json<QuarterlyStatus>> {
    kra::validate_quarter(input.quarter).map_err(AppError::BadRequest)?;
    kra::validate_activity_status(&input.status).map_err(AppError::BadRequest)?;
    KraRepo::find_activity(&state.pool, activity_id)
        .await?
        .ok_or(AppError::not_found("KraActivity", activity_id))?;
    let status = KraRepo::upsert_quarterly_status(&state.pool, activity_id, &input).await?;
    Ok(Json(status))
}
