//! Repository for the `engagements` table.

use auditdesk_core::types::DbId;
use sqlx::PgPool;

use crate::models::engagement::{CreateEngagement, Engagement, UpdateEngagement};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, engagement_type, status, org_unit_id, lead_auditor_id, \
                       planned_start, planned_end, description, created_at, updated_at";

/// Provides CRUD operations for audit engagements.
pub struct EngagementRepo;

impl EngagementRepo {
    /// Insert a new engagement, returning the created row.
    ///
    /// Missing `engagement_type` and `status` fall back to the column defaults.
    pub async fn create(
        pool: &PgPool,
        input: &CreateEngagement,
    ) -> Result<Engagement, sqlx::Error> {
        let query = format!(
            "INSERT INTO engagements
                (title, engagement_type, status, org_unit_id, lead_auditor_id,
                 planned_start, planned_end, description)
             VALUES ($1, COALESCE($2, 'assurance'), COALESCE($3, 'planned'), $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Engagement>(&query)
            .bind(&input.title)
            .bind(&input.engagement_type)
            .bind(&input.status)
            .bind(input.org_unit_id)
            .bind(input.lead_auditor_id)
            .bind(input.planned_start)
            .bind(input.planned_end)
            .bind(&input.description)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Engagement>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM engagements WHERE id = $1");
        sqlx::query_as::<_, Engagement>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all engagements ordered by most recently created first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Engagement>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM engagements ORDER BY created_at DESC, id DESC");
        sqlx::query_as::<_, Engagement>(&query).fetch_all(pool).await
    }

    /// Update an engagement. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateEngagement,
    ) -> Result<Option<Engagement>, sqlx::Error> {
        let query = format!(
            "UPDATE engagements SET
                title = COALESCE($2, title),
                engagement_type = COALESCE($3, engagement_type),
                status = COALESCE($4, status),
                org_unit_id = COALESCE($5, org_unit_id),
                lead_auditor_id = COALESCE($6, lead_auditor_id),
                planned_start = COALESCE($7, planned_start),
                planned_end = COALESCE($8, planned_end),
                description = COALESCE($9, description)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Engagement>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.engagement_type)
            .bind(&input.status)
            .bind(input.org_unit_id)
            .bind(input.lead_auditor_id)
            .bind(input.planned_start)
            .bind(input.planned_end)
            .bind(&input.description)
            .fetch_optional(pool)
            .await
    }

    /// Delete an engagement and, by cascade, its findings. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM engagements WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
