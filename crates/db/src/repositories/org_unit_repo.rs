//! Repository for the `org_units` table.

use auditdesk_core::types::DbId;
use sqlx::PgPool;

use crate::models::org_unit::{CreateOrgUnit, OrgUnit};

const COLUMNS: &str = "id, name, code, parent_id, created_at, updated_at";

/// Provides CRUD operations for org units.
pub struct OrgUnitRepo;

impl OrgUnitRepo {
    /// Insert a new org unit, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateOrgUnit) -> Result<OrgUnit, sqlx::Error> {
        let query = format!(
            "INSERT INTO org_units (name, code, parent_id)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, OrgUnit>(&query)
            .bind(&input.name)
            .bind(&input.code)
            .bind(input.parent_id)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<OrgUnit>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM org_units WHERE id = $1");
        sqlx::query_as::<_, OrgUnit>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_code(pool: &PgPool, code: &str) -> Result<Option<OrgUnit>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM org_units WHERE code = $1");
        sqlx::query_as::<_, OrgUnit>(&query)
            .bind(code)
            .fetch_optional(pool)
            .await
    }

    /// List all org units alphabetically.
    pub async fn list(pool: &PgPool) -> Result<Vec<OrgUnit>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM org_units ORDER BY name ASC");
        sqlx::query_as::<_, OrgUnit>(&query).fetch_all(pool).await
    }
}
