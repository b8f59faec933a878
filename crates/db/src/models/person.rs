//! Person model and DTOs.

use auditdesk_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `people` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Person {
    pub id: DbId,
    pub full_name: String,
    pub email: String,
    pub title: Option<String>,
    pub org_unit_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a person.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePerson {
    pub full_name: String,
    pub email: String,
    pub title: Option<String>,
    pub org_unit_id: Option<DbId>,
}
