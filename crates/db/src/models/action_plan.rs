//! Action plan model and DTOs.

use auditdesk_core::types::{DbId, Timestamp};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `action_plans` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ActionPlan {
    pub id: DbId,
    pub recommendation_id: DbId,
    pub description: String,
    pub owner_id: Option<DbId>,
    pub target_date: Option<NaiveDate>,
    pub status: String,
    pub progress_pct: i16,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating an action plan. `recommendation_id` comes from the path.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateActionPlan {
    pub description: String,
    pub owner_id: Option<DbId>,
    pub target_date: Option<NaiveDate>,
    /// Defaults to `not_started` if omitted.
    pub status: Option<String>,
}

/// DTO for updating an action plan. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateActionPlan {
    pub description: Option<String>,
    pub owner_id: Option<DbId>,
    pub target_date: Option<NaiveDate>,
    pub status: Option<String>,
    pub progress_pct: Option<i16>,
}
