//! Repository for `risk_profiles`, `risk_profile_items`, and
//! `v_current_risk_summary`.

use auditdesk_core::types::DbId;
use sqlx::PgPool;

use crate::models::risk::{
    CreateRiskProfile, CreateRiskProfileItem, RiskProfile, RiskProfileItem, RiskSummaryRow,
};

const PROFILE_COLUMNS: &str = "id, org_unit_id, year, quarter, title, created_at, updated_at";

const ITEM_COLUMNS: &str = "id, risk_profile_id, title, category, likelihood, impact, \
                            risk_level, status, created_at, updated_at";

/// Provides access to risk profiles and their items.
pub struct RiskProfileRepo;

impl RiskProfileRepo {
    pub async fn create(
        pool: &PgPool,
        input: &CreateRiskProfile,
    ) -> Result<RiskProfile, sqlx::Error> {
        let query = format!(
            "INSERT INTO risk_profiles (org_unit_id, year, quarter, title)
             VALUES ($1, $2, $3, $4)
             RETURNING {PROFILE_COLUMNS}"
        );
        sqlx::query_as::<_, RiskProfile>(&query)
            .bind(input.org_unit_id)
            .bind(input.year)
            .bind(input.quarter)
            .bind(&input.title)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<RiskProfile>, sqlx::Error> {
        let query = format!("SELECT {PROFILE_COLUMNS} FROM risk_profiles WHERE id = $1");
        sqlx::query_as::<_, RiskProfile>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List profiles, most recent period first.
    pub async fn list(pool: &PgPool) -> Result<Vec<RiskProfile>, sqlx::Error> {
        let query = format!(
            "SELECT {PROFILE_COLUMNS} FROM risk_profiles
             ORDER BY year DESC, quarter DESC, org_unit_id ASC"
        );
        sqlx::query_as::<_, RiskProfile>(&query)
            .fetch_all(pool)
            .await
    }

    /// Insert an item whose `risk_level` has already been classified.
    pub async fn create_item(
        pool: &PgPool,
        risk_profile_id: DbId,
        input: &CreateRiskProfileItem,
        risk_level: &str,
    ) -> Result<RiskProfileItem, sqlx::Error> {
        let query = format!(
            "INSERT INTO risk_profile_items
                (risk_profile_id, title, category, likelihood, impact, risk_level, status)
             VALUES ($1, $2, $3, $4, $5, $6, COALESCE($7, 'open'))
             RETURNING {ITEM_COLUMNS}"
        );
        sqlx::query_as::<_, RiskProfileItem>(&query)
            .bind(risk_profile_id)
            .bind(&input.title)
            .bind(&input.category)
            .bind(input.likelihood)
            .bind(input.impact)
            .bind(risk_level)
            .bind(&input.status)
            .fetch_one(pool)
            .await
    }

    /// Items of one profile, highest inherent score first.
    pub async fn list_items(
        pool: &PgPool,
        risk_profile_id: DbId,
    ) -> Result<Vec<RiskProfileItem>, sqlx::Error> {
        let query = format!(
            "SELECT {ITEM_COLUMNS} FROM risk_profile_items
             WHERE risk_profile_id = $1
             ORDER BY likelihood * impact DESC, id ASC"
        );
        sqlx::query_as::<_, RiskProfileItem>(&query)
            .bind(risk_profile_id)
            .fetch_all(pool)
            .await
    }

    /// Top `limit` org units from `v_current_risk_summary`, worst first.
    pub async fn current_summary(
        pool: &PgPool,
        limit: i64,
    ) -> Result<Vec<RiskSummaryRow>, sqlx::Error> {
        sqlx::query_as::<_, RiskSummaryRow>(
            "SELECT org_unit_id, org_unit_name, year, quarter,
                    total_risks, extreme_count, high_count, open_count
             FROM v_current_risk_summary
             ORDER BY extreme_count DESC, high_count DESC, org_unit_name ASC
             LIMIT $1",
        )
        .bind(limit)
        .fetch_all(pool)
        .await
    }
}
