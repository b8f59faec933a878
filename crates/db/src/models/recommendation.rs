//! Recommendation model, DTOs, and the published recommendations view.

use auditdesk_core::types::{DbId, Timestamp};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `recommendations` table.
#[derive(Debug, Clone, FromRow, Serialize)]
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

/// DTO for creating a recommendation.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateRecommendation {
    pub finding_id: DbId,
    pub description: String,
    /// Defaults to `medium` if omitted.
    pub priority: Option<String>,
    /// Defaults to `open` if omitted.
    pub status: Option<String>,
    pub owner_id: Option<DbId>,
    pub due_date: Option<NaiveDate>,
    pub is_published: Option<bool>,
}

/// DTO for updating a recommendation. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateRecommendation {
    pub description: Option<String>,
    pub priority: Option<String>,
    pub status: Option<String>,
    pub owner_id: Option<DbId>,
    pub due_date: Option<NaiveDate>,
    pub is_published: Option<bool>,
}

/// A row from `published_recommendations_view`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PublishedRecommendation {
    pub id: DbId,
    pub finding_id: DbId,
    pub finding_title: String,
    pub finding_rating: String,
    pub engagement_id: DbId,
    pub engagement_title: String,
    pub org_unit_name: Option<String>,
    pub description: String,
    pub priority: String,
    pub status: String,
    pub owner_name: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub created_at: Timestamp,
}
