//! Handlers for PSAP standards, assessments, scores, and ratings.

use auditdesk_core::psap::{self, RatingBand};
use auditdesk_core::types::DbId;
use auditdesk_core::{audit, kra};
use auditdesk_db::models::psap::{
    CreatePsapAssessment, CreatePsapStandard, LatestPsapRating, PsapAssessment, PsapScore,
    PsapStandard, UpsertPsapScore,
};
use auditdesk_db::repositories::PsapRepo;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::query::OrgUnitFilter;
use crate::response::DataResponse;
use crate::state::AppState;

/// Latest assessment per org unit with its percentage and band.
#[derive(Debug, Serialize)]
pub struct PsapRatingView {
    pub assessment_id: DbId,
    pub org_unit_id: DbId,
    pub org_unit_name: String,
    pub year: i32,
    pub quarter: i16,
    pub status: String,
    pub weighted_total: f64,
    pub overall_pct: f64,
    pub rating: RatingBand,
}

impl From<LatestPsapRating> for PsapRatingView {
    fn from(row: LatestPsapRating) -> Self {
        let rating = psap::rate(row.weighted_total);
        Self {
            assessment_id: row.assessment_id,
            org_unit_id: row.org_unit_id,
            org_unit_name: row.org_unit_name,
            year: row.year,
            quarter: row.quarter,
            status: row.status,
            weighted_total: row.weighted_total,
            overall_pct: rating.overall_pct,
            rating: rating.rating,
        }
    }
}

/// Read `v_latest_psap_ratings` and attach percentages and bands.
pub async fn load_ratings(pool: &auditdesk_db::DbPool) -> AppResult<Vec<PsapRatingView>> {
    let rows = PsapRepo::latest_ratings(pool).await?;
    Ok(rows.into_iter().map(PsapRatingView::from).collect())
}

/// GET /api/v1/psap/standards
pub async fn list_standards(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<PsapStandard>>>> {
    let standards = PsapRepo::list_standards(&state.pool).await?;
    Ok(Json(DataResponse { data: standards }))
}

/// POST /api/v1/psap/standards
pub async fn create_standard(
    State(state): State<AppState>,
    Json(input): Json<CreatePsapStandard>,
) -> AppResult<(StatusCode, Json<PsapStandard>)> {
    audit::validate_title("code", &input.code).map_err(AppError::BadRequest)?;
    audit::validate_title("title", &input.title).map_err(AppError::BadRequest)?;
    if !(input.weight.is_finite() && input.weight > 0.0) {
        return Err(AppError::BadRequest(format!(
            "Weight must be positive, got {}",
            input.weight
        )));
    }
    let standard = PsapRepo::create_standard(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(standard)))
}

/// GET /api/v1/psap/assessments?org_unit_id=
pub async fn list_assessments(
    State(state): State<AppState>,
    Query(filter): Query<OrgUnitFilter>,
) -> AppResult<Json<DataResponse<Vec<PsapAssessment>>>> {
    let assessments = PsapRepo::list_assessments(&state.pool, filter.org_unit_id).await?;
    Ok(Json(DataResponse { data: assessments }))
}

/// POST /api/v1/psap/assessments
pub async fn create_assessment(
    State(state): State<AppState>,
    Json(input): Json<CreatePsapAssessment>,
) -> AppResult<(StatusCode, Json<PsapAssessment>)> {
    kra::validate_quarter(input.quarter).map_err(AppError::BadRequest)?;
    if let Some(status) = &input.status {
        psap::validate_assessment_status(status).map_err(AppError::BadRequest)?;
    }
    let assessment = PsapRepo::create_assessment(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(assessment)))
}

/// GET /api/v1/psap/assessments/{id}/scores
pub async fn list_scores(
    State(state): State<AppState>,
    Path(assessment_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<PsapScore>>>> {
    PsapRepo::find_assessment(&state.pool, assessment_id)
        .await?
        .ok_or(AppError::not_found("PsapAssessment", assessment_id))?;
    let scores = PsapRepo::list_scores(&state.pool, assessment_id).await?;
    Ok(Json(DataResponse { data: scores }))
}

/// PUT /api/v1/psap/assessments/{id}/scores
///
/// Sets one standard's score. A score that would push the assessment's
/// weighted total above the cap is rejected by the store with 400.
pub async fn upsert_score(
    State(state): State<AppState>,
    Path(assessment_id): Path<DbId>,
    Json(input): Json<UpsertPsapScore>,
) -> AppResult<Json<PsapScore>> {
    psap::validate_score(input.score).map_err(AppError::BadRequest)?;
    PsapRepo::find_assessment(&state.pool, assessment_id)
        .await?
        .ok_or(AppError::not_found("PsapAssessment", assessment_id))?;
    let score = PsapRepo::upsert_score(&state.pool, assessment_id, &input).await?;
    Ok(Json(score))
}

/// GET /api/v1/psap/ratings
pub async fn list_ratings(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<PsapRatingView>>>> {
    let ratings = load_ratings(&state.pool).await?;
    Ok(Json(DataResponse { data: ratings }))
}
