//! CSV export of dashboard datasets.

use auditdesk_core::error::CoreError;
use auditdesk_core::export::{self, ExportFormat};
use auditdesk_db::repositories::{EngagementRepo, FindingRepo, RecommendationRepo, RiskEventRepo};
use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::handlers::psap;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ExportParams {
    pub format: Option<String>,
}

/// Exportable datasets and the label used in their file names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dataset {
    Engagements,
    Findings,
    Recommendations,
    RiskEvents,
    PsapRatings,
}

impl Dataset {
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "engagements" => Some(Self::Engagements),
            "findings" => Some(Self::Findings),
            "recommendations" => Some(Self::Recommendations),
            "risk-events" => Some(Self::RiskEvents),
            "psap-ratings" => Some(Self::PsapRatings),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Engagements => "Engagements",
            Self::Findings => "Findings",
            Self::Recommendations => "Recommendations",
            Self::RiskEvents => "Risk_Events",
            Self::PsapRatings => "PSAP_Ratings",
        }
    }
}

fn attachment<T: Serialize>(
    format: ExportFormat,
    dataset: Dataset,
    records: &[T],
) -> AppResult<Response> {
    let body = export::render(format, records)?;
    let filename = export::export_filename(dataset.label(), chrono::Utc::now().date_naive());
    tracing::info!(dataset = dataset.label(), rows = records.len(), %filename, "Export generated");

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, export::CSV_CONTENT_TYPE.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        body,
    )
        .into_response())
}

/// GET /api/v1/exports/{dataset}?format=csv|pdf
///
/// Empty datasets return 400 and PDF returns 501; neither produces a file.
pub async fn export_dataset(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Query(params): Query<ExportParams>,
) -> AppResult<Response> {
    let dataset = Dataset::parse(&name).ok_or_else(|| {
        AppError::Core(CoreError::Validation(format!("Unknown export dataset '{name}'")))
    })?;
    let format = ExportFormat::parse(params.format.as_deref())?;

    match dataset {
        Dataset::Engagements => {
            let rows = EngagementRepo::list(&state.pool).await?;
            attachment(format, dataset, &rows)
        }
        Dataset::Findings => {
            let rows = FindingRepo::list(&state.pool, None).await?;
            attachment(format, dataset, &rows)
        }
        Dataset::Recommendations => {
            let rows = RecommendationRepo::list(&state.pool, None).await?;
            attachment(format, dataset, &rows)
        }
        Dataset::RiskEvents => {
            let rows = RiskEventRepo::list(&state.pool, None).await?;
            attachment(format, dataset, &rows)
        }
        Dataset::PsapRatings => {
            let rows = psap::load_ratings(&state.pool).await?;
            attachment(format, dataset, &rows)
        }
    }
}
