//! Client-side shapes of the core audit entities.

use auditdesk_core::types::{DbId, Timestamp};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::resource::Keyed;

#[derive(Debug, Clone, PartialEq, Deserialize)]
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

#[derive(Debug, Clone, Default, Serialize)]
pub struct EngagementInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub engagement_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub org_unit_id: Option<DbId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lead_auditor_id: Option<DbId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub planned_start: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub planned_end: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
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

#[derive(Debug, Clone, Default, Serialize)]
pub struct FindingInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub engagement_id: Option<DbId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub org_unit_id: Option<DbId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<DbId>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Recommendation {
    pub id: DbId,
    pub finding_id: DbId,
    pub description: String,
    pub priority: String,
    pub status: String,
    pub owner_id: Option<DbId>,
    pub due_date: Option<NaiveDate>,
    pub is_published: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct RecommendationInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finding_id: Option<DbId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<DbId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_published: Option<bool>,
}

impl Keyed for Engagement {
    fn key(&self) -> DbId {
        self.id
    }
}

impl Keyed for Finding {
    fn key(&self) -> DbId {
        self.id
    }
}

impl Keyed for Recommendation {
    fn key(&self) -> DbId {
        self.id
    }
}
