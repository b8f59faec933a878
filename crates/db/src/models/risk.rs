//! Risk profile, risk event, and risk register models.

use auditdesk_core::risk::RiskCounts;
use auditdesk_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `risk_profiles` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RiskProfile {
    pub id: DbId,
    pub org_unit_id: DbId,
    pub year: i32,
    pub quarter: i16,
    pub title: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a risk profile.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateRiskProfile {
    pub org_unit_id: DbId,
    pub year: i32,
    pub quarter: i16,
    pub title: String,
}

/// A row from the `risk_profile_items` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RiskProfileItem {
    pub id: DbId,
    pub risk_profile_id: DbId,
    pub title: String,
    pub category: Option<String>,
    pub likelihood: i16,
    pub impact: i16,
    pub risk_level: String,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for adding an item to a risk profile.
///
/// The risk level is not accepted from callers; it is classified from
/// `likelihood` and `impact` before insert.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateRiskProfileItem {
    pub title: String,
    pub category: Option<String>,
    pub likelihood: i16,
    pub impact: i16,
    /// Defaults to `open` if omitted.
    pub status: Option<String>,
}

/// A row from `v_current_risk_summary`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RiskSummaryRow {
    pub org_unit_id: DbId,
    pub org_unit_name: String,
    pub year: i32,
    pub quarter: i16,
    pub total_risks: i64,
    pub extreme_count: i64,
    pub high_count: i64,
    pub open_count: i64,
}

impl RiskSummaryRow {
    pub fn counts(&self) -> RiskCounts {
        RiskCounts {
            total_risks: self.total_risks,
            extreme_count: self.extreme_count,
            high_count: self.high_count,
            open_count: self.open_count,
        }
    }
}

/// A row from the `audit_risk_events` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RiskEvent {
    pub id: DbId,
    pub org_unit_id: Option<DbId>,
    pub title: String,
    pub description: Option<String>,
    pub priority: i16,
    pub status: String,
    pub reported_by: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for reporting a risk event. New events always start `pending`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateRiskEvent {
    pub org_unit_id: Option<DbId>,
    pub title: String,
    pub description: Option<String>,
    /// Defaults to 3 (medium) if omitted.
    pub priority: Option<i16>,
    pub reported_by: Option<DbId>,
}

/// DTO for moving a risk event through its review workflow.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateRiskEventStatus {
    pub status: String,
}

/// A row from the `audit_risk_register` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RiskRegisterEntry {
    pub id: DbId,
    pub org_unit_id: Option<DbId>,
    pub risk_event_id: Option<DbId>,
    pub title: String,
    pub risk_level: String,
    pub owner_id: Option<DbId>,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
