//! Repository for the `recommendations` table and the published view.

use auditdesk_core::types::DbId;
use sqlx::PgPool;

use crate::models::recommendation::{
    CreateRecommendation, PublishedRecommendation, Recommendation, UpdateRecommendation,
};

const COLUMNS: &str = "id, finding_id, description, priority, status, owner_id, due_date, \
                       is_published, created_at, updated_at";

/// Provides CRUD operations for recommendations.
pub struct RecommendationRepo;

impl RecommendationRepo {
    pub async fn create(
        pool: &PgPool,
        input: &CreateRecommendation,
    ) -> Result<Recommendation, sqlx::Error> {
        let query = format!(
            "INSERT INTO recommendations
                (finding_id, description, priority, status, owner_id, due_date, is_published)
             VALUES ($1, $2, COALESCE($3, 'medium'), COALESCE($4, 'open'), $5, $6, COALESCE($7, FALSE))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Recommendation>(&query)
            .bind(input.finding_id)
            .bind(&input.description)
            .bind(&input.priority)
            .bind(&input.status)
            .bind(input.owner_id)
            .bind(input.due_date)
            .bind(input.is_published)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<Recommendation>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM recommendations WHERE id = $1");
        sqlx::query_as::<_, Recommendation>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List recommendations newest first, optionally scoped to one finding.
    pub async fn list(
        pool: &PgPool,
        finding_id: Option<DbId>,
    ) -> Result<Vec<Recommendation>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM recommendations
             WHERE ($1::BIGINT IS NULL OR finding_id = $1)
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Recommendation>(&query)
            .bind(finding_id)
            .fetch_all(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateRecommendation,
    ) -> Result<Option<Recommendation>, sqlx::Error> {
        let query = format!(
            "UPDATE recommendations SET
                description = COALESCE($2, description),
                priority = COALESCE($3, priority),
                status = COALESCE($4, status),
                owner_id = COALESCE($5, owner_id),
                due_date = COALESCE($6, due_date),
                is_published = COALESCE($7, is_published)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Recommendation>(&query)
            .bind(id)
            .bind(&input.description)
            .bind(&input.priority)
            .bind(&input.status)
            .bind(input.owner_id)
            .bind(input.due_date)
            .bind(input.is_published)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM recommendations WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Read `published_recommendations_view`, newest first.
    pub async fn list_published(
        pool: &PgPool,
    ) -> Result<Vec<PublishedRecommendation>, sqlx::Error> {
        sqlx::query_as::<_, PublishedRecommendation>(
            "SELECT id, finding_id, finding_title, finding_rating, engagement_id,
                    engagement_title, org_unit_name, description, priority, status,
                    owner_name, due_date, created_at
             FROM published_recommendations_view
             ORDER BY created_at DESC, id DESC",
        )
        .fetch_all(pool)
        .await
    }
}
