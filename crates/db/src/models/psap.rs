//! PSAP standard, assessment, and score models.

use auditdesk_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `psap_standards` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PsapStandard {
    pub id: DbId,
    pub code: String,
    pub title: String,
    pub weight: f64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a PSAP standard.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePsapStandard {
    pub code: String,
    pub title: String,
    pub weight: f64,
}

/// A row from the `psap_assessments` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PsapAssessment {
    pub id: DbId,
    pub org_unit_id: DbId,
    pub year: i32,
    pub quarter: i16,
    pub assessed_by: Option<DbId>,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for opening an assessment for an org unit and period.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePsapAssessment {
    pub org_unit_id: DbId,
    pub year: i32,
    pub quarter: i16,
    pub assessed_by: Option<DbId>,
    /// Defaults to `draft` if omitted.
    pub status: Option<String>,
}

/// A row from the `psap_assessment_scores` table.
///
/// `weighted_score` is maintained by a database trigger.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PsapScore {
    pub id: DbId,
    pub assessment_id: DbId,
    pub standard_id: DbId,
    pub score: f64,
    pub weighted_score: f64,
    pub comment: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for setting one standard's score within an assessment.
#[derive(Debug, Clone, Deserialize)]
pub struct UpsertPsapScore {
    pub standard_id: DbId,
    pub score: f64,
    pub comment: Option<String>,
}

/// A row from `v_latest_psap_ratings`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct LatestPsapRating {
    pub assessment_id: DbId,
    pub org_unit_id: DbId,
    pub org_unit_name: String,
    pub year: i32,
    pub quarter: i16,
    pub status: String,
    pub weighted_total: f64,
}

/// Weighted total of one assessment, used for trend charts.
#[derive(Debug, Clone, FromRow)]
pub struct PsapTotalRow {
    pub org_unit_id: DbId,
    pub year: i32,
    pub quarter: i16,
    pub weighted_total: f64,
}
