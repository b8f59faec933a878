//! Organizational unit model and DTOs.

use auditdesk_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `org_units` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct OrgUnit {
    pub id: DbId,
    pub name: String,
    pub code: String,
    pub parent_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating an org unit.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateOrgUnit {
    pub name: String,
    pub code: String,
    pub parent_id: Option<DbId>,
}
