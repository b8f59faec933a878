//! Repository for the `audit_findings` table.

use auditdesk_core::types::DbId;
use sqlx::PgPool;

use crate::models::finding::{CreateFinding, Finding, UpdateFinding};

const COLUMNS: &str = "id, engagement_id, title, description, rating, status, org_unit_id, \
                       owner_id, created_at, updated_at";

/// Provides CRUD operations for audit findings.
pub struct FindingRepo;

impl FindingRepo {
    pub async fn create(pool: &PgPool, input: &CreateFinding) -> Result<Finding, sqlx::Error> {
        let query = format!(
            "INSERT INTO audit_findings
                (engagement_id, title, description, rating, status, org_unit_id, owner_id)
             VALUES ($1, $2, $3, COALESCE($4, 'medium'), COALESCE($5, 'open'), $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Finding>(&query)
            .bind(input.engagement_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.rating)
            .bind(&input.status)
            .bind(input.org_unit_id)
            .bind(input.owner_id)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Finding>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM audit_findings WHERE id = $1");
        sqlx::query_as::<_, Finding>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List findings newest first, optionally scoped to one engagement.
    pub async fn list(
        pool: &PgPool,
        engagement_id: Option<DbId>,
    ) -> Result<Vec<Finding>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM audit_findings
             WHERE ($1::BIGINT IS NULL OR engagement_id = $1)
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Finding>(&query)
            .bind(engagement_id)
            .fetch_all(pool)
            .await
    }

    /// Update a finding. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateFinding,
    ) -> Result<Option<Finding>, sqlx::Error> {
        let query = format!(
            "UPDATE audit_findings SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                rating = COALESCE($4, rating),
                status = COALESCE($5, status),
                org_unit_id = COALESCE($6, org_unit_id),
                owner_id = COALESCE($7, owner_id)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Finding>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.rating)
            .bind(&input.status)
            .bind(input.org_unit_id)
            .bind(input.owner_id)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM audit_findings WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
