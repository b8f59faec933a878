//! Handlers for the dashboard widgets and trend charts.
//!
//! Views supply raw counts and sums; every percentage, band, and total is
//! derived here through `auditdesk_core`.

use auditdesk_core::kra::{self, CompletionTotals, StatusCounts};
use auditdesk_core::risk::{self, RiskCounts};
use auditdesk_core::trend::{self, KraSample, KraTrendPoint, PsapSample, PsapTrendPoint};
use auditdesk_core::types::DbId;
use auditdesk_db::models::risk::{RiskEvent, RiskSummaryRow};
use auditdesk_db::repositories::{KraRepo, PsapRepo, RiskEventRepo, RiskProfileRepo};
use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::query::{clamp_limit, LimitParams, OrgUnitFilter, PeriodParams};
use crate::response::DataResponse;
use crate::state::AppState;

/// Org units shown in the risk profile widget.
pub const RISK_WIDGET_ROWS: i64 = 5;

pub const PENDING_EVENTS_DEFAULT_LIMIT: i64 = 10;
pub const PENDING_EVENTS_MAX_LIMIT: i64 = 50;

// ---------------------------------------------------------------------------
// Widget response types
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct RiskProfileWidget {
    pub rows: Vec<RiskSummaryRow>,
    /// Sum of the counts across `rows`.
    pub totals: RiskCounts,
}

/// One KRA's counts in the completion widget.
#[derive(Debug, Serialize)]
pub struct KraCompletionRow {
    pub kra_id: DbId,
    pub kra_code: String,
    pub kra_title: String,
    #[serde(flatten)]
    pub counts: StatusCounts,
    pub completion_pct: i64,
}

#[derive(Debug, Serialize)]
pub struct KraCompletionWidget {
    pub year: i32,
    pub quarter: i16,
    pub rows: Vec<KraCompletionRow>,
    pub totals: CompletionTotals,
}

/// A risk event with its priority spelled out for display.
#[derive(Debug, Serialize)]
pub struct PendingRiskEvent {
    #[serde(flatten)]
    pub event: RiskEvent,
    pub priority_label: &'static str,
}

#[derive(Debug, Deserialize)]
pub struct KraTrendParams {
    pub kra_id: Option<DbId>,
}

// ---------------------------------------------------------------------------
// Widgets
// ---------------------------------------------------------------------------

/// GET /api/v1/dashboard/widgets/risk-profile
pub async fn risk_profile_widget(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<RiskProfileWidget>>> {
    let rows = RiskProfileRepo::current_summary(&state.pool, RISK_WIDGET_ROWS)
        .await
        .inspect_err(|e| tracing::error!(error = %e, "Failed to load risk summary"))?;
    let counts: Vec<RiskCounts> = rows.iter().map(RiskSummaryRow::counts).collect();
    let totals = risk::sum_counts(&counts);
    Ok(Json(DataResponse {
        data: RiskProfileWidget { rows, totals },
    }))
}

/// GET /api/v1/dashboard/widgets/kra-completion?year=&quarter=
///
/// Defaults to the current calendar quarter.
pub async fn kra_completion_widget(
    State(state): State<AppState>,
    Query(params): Query<PeriodParams>,
) -> AppResult<Json<DataResponse<KraCompletionWidget>>> {
    let (current_year, current_quarter) = kra::current_period(chrono::Utc::now().date_naive());
    let year = params.year.unwrap_or(current_year);
    let quarter = params.quarter.unwrap_or(current_quarter);
    kra::validate_quarter(quarter).map_err(AppError::BadRequest)?;

    let summary = KraRepo::status_summary_for_period(&state.pool, year, quarter)
        .await
        .inspect_err(|e| tracing::error!(error = %e, year, quarter, "Failed to load KRA summary"))?;

    let counts: Vec<StatusCounts> = summary.iter().map(|r| r.counts()).collect();
    let totals = kra::summarize(&counts);
    let rows = summary
        .into_iter()
        .zip(counts)
        .map(|(r, c)| KraCompletionRow {
            kra_id: r.kra_id,
            kra_code: r.kra_code,
            kra_title: r.kra_title,
            completion_pct: c.completion_pct(),
            counts: c,
        })
        .collect();

    Ok(Json(DataResponse {
        data: KraCompletionWidget {
            year,
            quarter,
            rows,
            totals,
        },
    }))
}

/// GET /api/v1/dashboard/widgets/pending-risk-events?limit=
///
/// Most urgent first (priority 1), then newest.
pub async fn pending_risk_events_widget(
    State(state): State<AppState>,
    Query(params): Query<LimitParams>,
) -> AppResult<Json<DataResponse<Vec<PendingRiskEvent>>>> {
    let limit = clamp_limit(
        params.limit,
        PENDING_EVENTS_DEFAULT_LIMIT,
        PENDING_EVENTS_MAX_LIMIT,
    );
    let events = RiskEventRepo::list_by_statuses(&state.pool, risk::ACTIVE_EVENT_STATUSES, limit)
        .await
        .inspect_err(|e| tracing::error!(error = %e, "Failed to load pending risk events"))?;
    let data = events
        .into_iter()
        .map(|event| PendingRiskEvent {
            priority_label: risk::priority_label(event.priority),
            event,
        })
        .collect();
    Ok(Json(DataResponse { data }))
}

// ---------------------------------------------------------------------------
// Trends
// ---------------------------------------------------------------------------

/// GET /api/v1/dashboard/trends/psap?org_unit_id=
pub async fn psap_trend(
    State(state): State<AppState>,
    Query(filter): Query<OrgUnitFilter>,
) -> AppResult<Json<DataResponse<Vec<PsapTrendPoint>>>> {
    let rows = PsapRepo::assessment_totals(&state.pool, filter.org_unit_id).await?;
    let samples: Vec<PsapSample> = rows
        .iter()
        .map(|r| PsapSample {
            year: r.year,
            quarter: r.quarter,
            weighted_total: r.weighted_total,
        })
        .collect();
    Ok(Json(DataResponse {
        data: trend::psap_series(&samples),
    }))
}

/// GET /api/v1/dashboard/trends/kra?kra_id=
pub async fn kra_trend(
    State(state): State<AppState>,
    Query(params): Query<KraTrendParams>,
) -> AppResult<Json<DataResponse<Vec<KraTrendPoint>>>> {
    let rows = KraRepo::status_summary_history(&state.pool, params.kra_id).await?;
    let samples: Vec<KraSample> = rows
        .iter()
        .map(|r| KraSample {
            year: r.year,
            quarter: r.quarter,
            total_activities: r.total_activities,
            completed: r.completed,
        })
        .collect();
    Ok(Json(DataResponse {
        data: trend::kra_series(&samples),
    }))
}
