//! Strategic KRA, activity, and quarterly status models.

use auditdesk_core::kra::StatusCounts;
use auditdesk_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `strategic_kras` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct StrategicKra {
    pub id: DbId,
    pub code: String,
    pub title: String,
    pub org_unit_id: Option<DbId>,
    pub year: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a KRA.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateKra {
    pub code: String,
    pub title: String,
    pub org_unit_id: Option<DbId>,
    pub year: i32,
}

/// A row from the `kra_activities` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct KraActivity {
    pub id: DbId,
    pub kra_id: DbId,
    pub title: String,
    pub owner_id: Option<DbId>,
    pub target: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for adding an activity. `kra_id` comes from the path.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateKraActivity {
    pub title: String,
    pub owner_id: Option<DbId>,
    pub target: Option<String>,
}

/// A row from the `kra_activity_quarterly_status` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct QuarterlyStatus {
    pub id: DbId,
    pub activity_id: DbId,
    pub year: i32,
    pub quarter: i16,
    pub status: String,
    pub remarks: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for recording an activity's status in a quarter.
#[derive(Debug, Clone, Deserialize)]
pub struct UpsertQuarterlyStatus {
    pub year: i32,
    pub quarter: i16,
    pub status: String,
    pub remarks: Option<String>,
}

/// A row from `v_kra_status_summary`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct KraStatusSummaryRow {
    pub kra_id: DbId,
    pub kra_code: String,
    pub kra_title: String,
    pub year: i32,
    pub quarter: i16,
    pub total_activities: i64,
    pub completed: i64,
    pub ongoing: i64,
    pub delayed: i64,
    pub not_started: i64,
}

impl KraStatusSummaryRow {
    pub fn counts(&self) -> StatusCounts {
        StatusCounts {
            total_activities: self.total_activities,
            completed: self.completed,
            ongoing: self.ongoing,
            delayed: self.delayed,
            not_started: self.not_started,
        }
    }
}
