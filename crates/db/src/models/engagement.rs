//! Audit engagement model and DTOs.

use auditdesk_core::types::{DbId, Timestamp};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `engagements` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Engagement {
    pub id: DbId,
    pub title: String,
    pub engagement_type: String,
    pub status: String,
    pub org_unit_id: Option<DbId>,
    pub lead_auditor_id: Option<DbId>,
    pub planned_start: Option<NaiveDate>,
    pub planned_end: Option<NaiveDate>,
    pub description: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating an engagement.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateEngagement {
    pub title: String,
    /// Defaults to `assurance` if omitted.
    pub engagement_type: Option<String>,
    /// Defaults to `planned` if omitted.
    pub status: Option<String>,
    pub org_unit_id: Option<DbId>,
    pub lead_auditor_id: Option<DbId>,
    pub planned_start: Option<NaiveDate>,
    pub planned_end: Option<NaiveDate>,
    pub description: Option<String>,
}

/// DTO for updating an engagement. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateEngagement {
    pub title: Option<String>,
    pub engagement_type: Option<String>,
    pub status: Option<String>,
    pub org_unit_id: Option<DbId>,
    pub lead_auditor_id: Option<DbId>,
    pub planned_start: Option<NaiveDate>,
    pub planned_end: Option<NaiveDate>,
    pub description: Option<String>,
}
