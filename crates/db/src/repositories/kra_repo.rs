//! Repository for strategic KRAs, their activities, quarterly statuses, and
//! `v_kra_status_summary`.

use auditdesk_core::types::DbId;
use sqlx::PgPool;

use crate::models::kra::{
    CreateKra, CreateKraActivity, KraActivity, KraStatusSummaryRow, QuarterlyStatus,
    StrategicKra, UpsertQuarterlyStatus,
};

const KRA_COLUMNS: &str = "id, code, title, org_unit_id, year, created_at, updated_at";

const ACTIVITY_COLUMNS: &str = "id, kra_id, title, owner_id, target, created_at, updated_at";

const STATUS_COLUMNS: &str =
    "id, activity_id, year, quarter, status, remarks, created_at, updated_at";

const SUMMARY_COLUMNS: &str = "kra_id, kra_code, kra_title, year, quarter, total_activities, \
                               completed, ongoing, delayed, not_started";

/// Provides access to the KRA workplan tables.
pub struct KraRepo;

impl KraRepo {
    pub async fn create(pool: &PgPool, input: &CreateKra) -> Result<StrategicKra, sqlx::Error> {
        let query = format!(
            "INSERT INTO strategic_kras (code, title, org_unit_id, year)
             VALUES ($1, $2, $3, $4)
             RETURNING {KRA_COLUMNS}"
        );
        sqlx::query_as::<_, StrategicKra>(&query)
            .bind(&input.code)
            .bind(&input.title)
            .bind(input.org_unit_id)
            .bind(input.year)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<StrategicKra>, sqlx::Error> {
        let query = format!("SELECT {KRA_COLUMNS} FROM strategic_kras WHERE id = $1");
        sqlx::query_as::<_, StrategicKra>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_code(
        pool: &PgPool,
        code: &str,
    ) -> Result<Option<StrategicKra>, sqlx::Error> {
        let query = format!("SELECT {KRA_COLUMNS} FROM strategic_kras WHERE code = $1");
        sqlx::query_as::<_, StrategicKra>(&query)
            .bind(code)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(pool: &PgPool) -> Result<Vec<StrategicKra>, sqlx::Error> {
        let query = format!("SELECT {KRA_COLUMNS} FROM strategic_kras ORDER BY year DESC, code ASC");
        sqlx::query_as::<_, StrategicKra>(&query)
            .fetch_all(pool)
            .await
    }

    // -- Activities -------------------------------------------------------

    pub async fn create_activity(
        pool: &PgPool,
        kra_id: DbId,
        input: &CreateKraActivity,
    ) -> Result<KraActivity, sqlx::Error> {
        let query = format!(
            "INSERT INTO kra_activities (kra_id, title, owner_id, target)
             VALUES ($1, $2, $3, $4)
             RETURNING {ACTIVITY_COLUMNS}"
        );
        sqlx::query_as::<_, KraActivity>(&query)
            .bind(kra_id)
            .bind(&input.title)
            .bind(input.owner_id)
            .bind(&input.target)
            .fetch_one(pool)
            .await
    }

    pub async fn find_activity(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<KraActivity>, sqlx::Error> {
        let query = format!("SELECT {ACTIVITY_COLUMNS} FROM kra_activities WHERE id = $1");
        sqlx::query_as::<_, KraActivity>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_activity_by_title(
        pool: &PgPool,
        kra_id: DbId,
        title: &str,
    ) -> Result<Option<KraActivity>, sqlx::Error> {
        let query = format!(
            "SELECT {ACTIVITY_COLUMNS} FROM kra_activities WHERE kra_id = $1 AND title = $2"
        );
        sqlx::query_as::<_, KraActivity>(&query)
            .bind(kra_id)
            .bind(title)
            .fetch_optional(pool)
            .await
    }

    pub async fn list_activities(
        pool: &PgPool,
        kra_id: DbId,
    ) -> Result<Vec<KraActivity>, sqlx::Error> {
        let query = format!(
            "SELECT {ACTIVITY_COLUMNS} FROM kra_activities WHERE kra_id = $1 ORDER BY id ASC"
        );
        sqlx::query_as::<_, KraActivity>(&query)
            .bind(kra_id)
            .fetch_all(pool)
            .await
    }

    // -- Quarterly statuses -----------------------------------------------

    /// Insert a quarterly status. Fails with a unique violation if the
    /// activity already has a status for that period.
    pub async fn insert_quarterly_status(
        pool: &PgPool,
        activity_id: DbId,
        input: &UpsertQuarterlyStatus,
    ) -> Result<QuarterlyStatus, sqlx::Error> {
        let query = format!(
            "INSERT INTO kra_activity_quarterly_status (activity_id, year, quarter, status, remarks)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {STATUS_COLUMNS}"
        );
        sqlx::query_as::<_, QuarterlyStatus>(&query)
            .bind(activity_id)
            .bind(input.year)
            .bind(input.quarter)
            .bind(&input.status)
            .bind(&input.remarks)
            .fetch_one(pool)
            .await
    }

    /// Insert or replace an activity's status for a period.
    pub async fn upsert_quarterly_status(
        pool: &PgPool,
        activity_id: DbId,
        input: &UpsertQuarterlyStatus,
    ) -> Result<QuarterlyStatus, sqlx::Error> {
        let query = format!(
            "INSERT INTO kra_activity_quarterly_status (activity_id, year, quarter, status, remarks)
             VALUES ($1, $2, $3, $4, $5)
             ON CONFLICT (activity_id, year, quarter)
             DO UPDATE SET status = EXCLUDED.status, remarks = EXCLUDED.remarks
             RETURNING {STATUS_COLUMNS}"
        );
        sqlx::query_as::<_, QuarterlyStatus>(&query)
            .bind(activity_id)
            .bind(input.year)
            .bind(input.quarter)
            .bind(&input.status)
            .bind(&input.remarks)
            .fetch_one(pool)
            .await
    }

    pub async fn list_quarterly_statuses(
        pool: &PgPool,
        activity_id: DbId,
    ) -> Result<Vec<QuarterlyStatus>, sqlx::Error> {
        let query = format!(
            "SELECT {STATUS_COLUMNS} FROM kra_activity_quarterly_status
             WHERE activity_id = $1
             ORDER BY year ASC, quarter ASC"
        );
        sqlx::query_as::<_, QuarterlyStatus>(&query)
            .bind(activity_id)
            .fetch_all(pool)
            .await
    }

    // -- Views ------------------------------------------------------------

    /// Status counts for every KRA in one period.
    pub async fn status_summary_for_period(
        pool: &PgPool,
        year: i32,
        quarter: i16,
    ) -> Result<Vec<KraStatusSummaryRow>, sqlx::Error> {
        let query = format!(
            "SELECT {SUMMARY_COLUMNS} FROM v_kra_status_summary
             WHERE year = $1 AND quarter = $2
             ORDER BY kra_code ASC"
        );
        sqlx::query_as::<_, KraStatusSummaryRow>(&query)
            .bind(year)
            .bind(quarter)
            .fetch_all(pool)
            .await
    }

    /// Status counts across all periods, chronologically, optionally for one KRA.
    pub async fn status_summary_history(
        pool: &PgPool,
        kra_id: Option<DbId>,
    ) -> Result<Vec<KraStatusSummaryRow>, sqlx::Error> {
        let query = format!(
            "SELECT {SUMMARY_COLUMNS} FROM v_kra_status_summary
             WHERE ($1::BIGINT IS NULL OR kra_id = $1)
             ORDER BY year ASC, quarter ASC, kra_code ASC"
        );
        sqlx::query_as::<_, KraStatusSummaryRow>(&query)
            .bind(kra_id)
            .fetch_all(pool)
            .await
    }
}
