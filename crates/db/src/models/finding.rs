//! Audit finding model and DTOs.

use auditdesk_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `audit_findings` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Finding {
    pub id: DbId,
    pub engagement_id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub rating: String,
    pub status: String,
    pub org_unit_id: Option<DbId>,
    pub owner_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a finding.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateFinding {
    pub engagement_id: DbId,
    pub title: String,
    pub description: Option<String>,
    /// Defaults to `medium` if omitted.
    pub rating: Option<String>,
    /// Defaults to `open` if omitted.
    pub status: Option<String>,
    pub org_unit_id: Option<DbId>,
    pub owner_id: Option<DbId>,
}

/// DTO for updating a finding. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateFinding {
    pub title: Option<String>,
    pub description: Option<String>,
    pub rating: Option<String>,
    pub status: Option<String>,
    pub org_unit_id: Option<DbId>,
    pub owner_id: Option<DbId>,
}
