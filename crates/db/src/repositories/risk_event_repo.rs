//! Repository for `audit_risk_events` and `audit_risk_register`.

use auditdesk_core::types::DbId;
use sqlx::PgPool;

use crate::models::risk::{CreateRiskEvent, RiskEvent, RiskRegisterEntry};

const COLUMNS: &str =
    "id, org_unit_id, title, description, priority, status, reported_by, created_at, updated_at";

/// Provides access to reported risk events and the risk register.
pub struct RiskEventRepo;

impl RiskEventRepo {
    /// Record a new event in `pending` status.
    pub async fn create(pool: &PgPool, input: &CreateRiskEvent) -> Result<RiskEvent, sqlx::Error> {
        let query = format!(
            "INSERT INTO audit_risk_events (org_unit_id, title, description, priority, reported_by)
             VALUES ($1, $2, $3, COALESCE($4, 3), $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, RiskEvent>(&query)
            .bind(input.org_unit_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.priority)
            .bind(input.reported_by)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<RiskEvent>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM audit_risk_events WHERE id = $1");
        sqlx::query_as::<_, RiskEvent>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List events newest first, optionally filtered by status.
    pub async fn list(pool: &PgPool, status: Option<&str>) -> Result<Vec<RiskEvent>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM audit_risk_events
             WHERE ($1::TEXT IS NULL OR status = $1)
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, RiskEvent>(&query)
            .bind(status)
            .fetch_all(pool)
            .await
    }

    /// Events in any of `statuses`, most urgent priority first, then newest.
    pub async fn list_by_statuses(
        pool: &PgPool,
        statuses: &[&str],
        limit: i64,
    ) -> Result<Vec<RiskEvent>, sqlx::Error> {
        let statuses: Vec<String> = statuses.iter().map(|s| s.to_string()).collect();
        let query = format!(
            "SELECT {COLUMNS} FROM audit_risk_events
             WHERE status = ANY($1)
             ORDER BY priority ASC, created_at DESC, id DESC
             LIMIT $2"
        );
        sqlx::query_as::<_, RiskEvent>(&query)
            .bind(&statuses)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Move an event from `from` to `to`.
    ///
    /// The write only applies while the stored status is still `from`.
    /// Returns `None` if the event is missing or has moved on since it was read.
    pub async fn update_status(
        pool: &PgPool,
        id: DbId,
        from: &str,
        to: &str,
    ) -> Result<Option<RiskEvent>, sqlx::Error> {
        let query = format!(
            "UPDATE audit_risk_events SET status = $3
             WHERE id = $1 AND status = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, RiskEvent>(&query)
            .bind(id)
            .bind(from)
            .bind(to)
            .fetch_optional(pool)
            .await
    }

    /// Risk register entries, most severe first.
    pub async fn list_register(pool: &PgPool) -> Result<Vec<RiskRegisterEntry>, sqlx::Error> {
        sqlx::query_as::<_, RiskRegisterEntry>(
            "SELECT id, org_unit_id, risk_event_id, title, risk_level, owner_id, status,
                    created_at, updated_at
             FROM audit_risk_register
             ORDER BY CASE risk_level
                          WHEN 'Extreme' THEN 1
                          WHEN 'High' THEN 2
                          WHEN 'Medium' THEN 3
                          ELSE 4
                      END,
                      created_at DESC",
        )
        .fetch_all(pool)
        .await
    }
}
