//! Repository for the `action_plans` table.

use auditdesk_core::types::DbId;
use sqlx::PgPool;

use crate::models::action_plan::{ActionPlan, CreateActionPlan, UpdateActionPlan};

const COLUMNS: &str = "id, recommendation_id, description, owner_id, target_date, status, \
                       progress_pct, created_at, updated_at";

/// Provides CRUD operations for action plans.
pub struct ActionPlanRepo;

impl ActionPlanRepo {
    pub async fn create(
        pool: &PgPool,
        recommendation_id: DbId,
        input: &CreateActionPlan,
    ) -> Result<ActionPlan, sqlx::Error> {
        let query = format!(
            "INSERT INTO action_plans (recommendation_id, description, owner_id, target_date, status)
             VALUES ($1, $2, $3, $4, COALESCE($5, 'not_started'))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ActionPlan>(&query)
            .bind(recommendation_id)
            .bind(&input.description)
            .bind(input.owner_id)
            .bind(input.target_date)
            .bind(&input.status)
            .fetch_one(pool)
            .await
    }

    /// List plans for a recommendation, earliest target date first.
    pub async fn list_by_recommendation(
        pool: &PgPool,
        recommendation_id: DbId,
    ) -> Result<Vec<ActionPlan>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM action_plans
             WHERE recommendation_id = $1
             ORDER BY target_date ASC NULLS LAST, id ASC"
        );
        sqlx::query_as::<_, ActionPlan>(&query)
            .bind(recommendation_id)
            .fetch_all(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateActionPlan,
    ) -> Result<Option<ActionPlan>, sqlx::Error> {
        let query = format!(
            "UPDATE action_plans SET
                description = COALESCE($2, description),
                owner_id = COALESCE($3, owner_id),
                target_date = COALESCE($4, target_date),
                status = COALESCE($5, status),
                progress_pct = COALESCE($6, progress_pct)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ActionPlan>(&query)
            .bind(id)
            .bind(&input.description)
            .bind(input.owner_id)
            .bind(input.target_date)
            .bind(&input.status)
            .bind(input.progress_pct)
            .fetch_optional(pool)
            .await
    }
}
