//! Repository for PSAP standards, assessments, scores, and
//! `v_latest_psap_ratings`.

use auditdesk_core::types::DbId;
use sqlx::PgPool;

use crate::models::psap::{
    CreatePsapAssessment, CreatePsapStandard, LatestPsapRating, PsapAssessment, PsapScore,
    PsapStandard, PsapTotalRow, UpsertPsapScore,
};

const STANDARD_COLUMNS: &str = "id, code, title, weight, created_at, updated_at";

const ASSESSMENT_COLUMNS: &str =
    "id, org_unit_id, year, quarter, assessed_by, status, created_at, updated_at";

const SCORE_COLUMNS: &str =
    "id, assessment_id, standard_id, score, weighted_score, comment, created_at, updated_at";

/// Provides access to the PSAP scorecard tables.
pub struct PsapRepo;

impl PsapRepo {
    // -- Standards --------------------------------------------------------

    pub async fn create_standard(
        pool: &PgPool,
        input: &CreatePsapStandard,
    ) -> Result<PsapStandard, sqlx::Error> {
        let query = format!(
            "INSERT INTO psap_standards (code, title, weight)
             VALUES ($1, $2, $3)
             RETURNING {STANDARD_COLUMNS}"
        );
        sqlx::query_as::<_, PsapStandard>(&query)
            .bind(&input.code)
            .bind(&input.title)
            .bind(input.weight)
            .fetch_one(pool)
            .await
    }

    pub async fn list_standards(pool: &PgPool) -> Result<Vec<PsapStandard>, sqlx::Error> {
        let query = format!("SELECT {STANDARD_COLUMNS} FROM psap_standards ORDER BY code ASC");
        sqlx::query_as::<_, PsapStandard>(&query)
            .fetch_all(pool)
            .await
    }

    // -- Assessments ------------------------------------------------------

    pub async fn create_assessment(
        pool: &PgPool,
        input: &CreatePsapAssessment,
    ) -> Result<PsapAssessment, sqlx::Error> {
        let query = format!(
            "INSERT INTO psap_assessments (org_unit_id, year, quarter, assessed_by, status)
             VALUES ($1, $2, $3, $4, COALESCE($5, 'draft'))
             RETURNING {ASSESSMENT_COLUMNS}"
        );
        sqlx::query_as::<_, PsapAssessment>(&query)
            .bind(input.org_unit_id)
            .bind(input.year)
            .bind(input.quarter)
            .bind(input.assessed_by)
            .bind(&input.status)
            .fetch_one(pool)
            .await
    }

    pub async fn find_assessment(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<PsapAssessment>, sqlx::Error> {
        let query = format!("SELECT {ASSESSMENT_COLUMNS} FROM psap_assessments WHERE id = $1");
        sqlx::query_as::<_, PsapAssessment>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_assessment_for_period(
        pool: &PgPool,
        org_unit_id: DbId,
        year: i32,
        quarter: i16,
    ) -> Result<Option<PsapAssessment>, sqlx::Error> {
        let query = format!(
            "SELECT {ASSESSMENT_COLUMNS} FROM psap_assessments
             WHERE org_unit_id = $1 AND year = $2 AND quarter = $3"
        );
        sqlx::query_as::<_, PsapAssessment>(&query)
            .bind(org_unit_id)
            .bind(year)
            .bind(quarter)
            .fetch_optional(pool)
            .await
    }

    /// List assessments, latest period first, optionally for one org unit.
    pub async fn list_assessments(
        pool: &PgPool,
        org_unit_id: Option<DbId>,
    ) -> Result<Vec<PsapAssessment>, sqlx::Error> {
        let query = format!(
            "SELECT {ASSESSMENT_COLUMNS} FROM psap_assessments
             WHERE ($1::BIGINT IS NULL OR org_unit_id = $1)
             ORDER BY year DESC, quarter DESC, org_unit_id ASC"
        );
        sqlx::query_as::<_, PsapAssessment>(&query)
            .bind(org_unit_id)
            .fetch_all(pool)
            .await
    }

    // -- Scores -----------------------------------------------------------

    pub async fn list_scores(
        pool: &PgPool,
        assessment_id: DbId,
    ) -> Result<Vec<PsapScore>, sqlx::Error> {
        let query = format!(
            "SELECT {SCORE_COLUMNS} FROM psap_assessment_scores
             WHERE assessment_id = $1
             ORDER BY standard_id ASC"
        );
        sqlx::query_as::<_, PsapScore>(&query)
            .bind(assessment_id)
            .fetch_all(pool)
            .await
    }

    /// Insert a score row. Fails with a unique violation if the standard is
    /// already scored for this assessment.
    pub async fn insert_score(
        pool: &PgPool,
        assessment_id: DbId,
        input: &UpsertPsapScore,
    ) -> Result<PsapScore, sqlx::Error> {
        let query = format!(
            "INSERT INTO psap_assessment_scores (assessment_id, standard_id, score, comment)
             VALUES ($1, $2, $3, $4)
             RETURNING {SCORE_COLUMNS}"
        );
        sqlx::query_as::<_, PsapScore>(&query)
            .bind(assessment_id)
            .bind(input.standard_id)
            .bind(input.score)
            .bind(&input.comment)
            .fetch_one(pool)
            .await
    }

    /// Insert or replace the score for one standard. The weighting trigger
    /// recomputes `weighted_score` and enforces the assessment cap.
    pub async fn upsert_score(
        pool: &PgPool,
        assessment_id: DbId,
        input: &UpsertPsapScore,
    ) -> Result<PsapScore, sqlx::Error> {
        let query = format!(
            "INSERT INTO psap_assessment_scores (assessment_id, standard_id, score, comment)
             VALUES ($1, $2, $3, $4)
             ON CONFLICT (assessment_id, standard_id)
             DO UPDATE SET score = EXCLUDED.score, comment = EXCLUDED.comment
             RETURNING {SCORE_COLUMNS}"
        );
        sqlx::query_as::<_, PsapScore>(&query)
            .bind(assessment_id)
            .bind(input.standard_id)
            .bind(input.score)
            .bind(&input.comment)
            .fetch_one(pool)
            .await
    }

    // -- Views ------------------------------------------------------------

    pub async fn latest_ratings(pool: &PgPool) -> Result<Vec<LatestPsapRating>, sqlx::Error> {
        sqlx::query_as::<_, LatestPsapRating>(
            "SELECT assessment_id, org_unit_id, org_unit_name, year, quarter, status, weighted_total
             FROM v_latest_psap_ratings
             ORDER BY org_unit_name ASC",
        )
        .fetch_all(pool)
        .await
    }

    /// Weighted total of every scored assessment in chronological order.
    /// Assessments with no scores yet are left out.
    pub async fn assessment_totals(
        pool: &PgPool,
        org_unit_id: Option<DbId>,
    ) -> Result<Vec<PsapTotalRow>, sqlx::Error> {
        sqlx::query_as::<_, PsapTotalRow>(
            "SELECT a.org_unit_id, a.year, a.quarter,
                    SUM(s.weighted_score)::DOUBLE PRECISION AS weighted_total
             FROM psap_assessments a
             JOIN psap_assessment_scores s ON s.assessment_id = a.id
             WHERE ($1::BIGINT IS NULL OR a.org_unit_id = $1)
             GROUP BY a.id, a.org_unit_id, a.year, a.quarter
             ORDER BY a.year ASC, a.quarter ASC, a.org_unit_id ASC",
        )
        .bind(org_unit_id)
        .fetch_all(pool)
        .await
    }
}
