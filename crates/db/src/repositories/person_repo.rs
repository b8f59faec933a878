//! Repository for the `people` table.

use auditdesk_core::types::DbId;
use sqlx::PgPool;

use crate::models::person::{CreatePerson, Person};

const COLUMNS: &str = "id, full_name, email, title, org_unit_id, created_at, updated_at";

/// Provides CRUD operations for people.
pub struct PersonRepo;

impl PersonRepo {
    pub async fn create(pool: &PgPool, input: &CreatePerson) -> Result<Person, sqlx::Error> {
        let query = format!(
            "INSERT INTO people (full_name, email, title, org_unit_id)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Person>(&query)
            .bind(&input.full_name)
            .bind(&input.email)
            .bind(&input.title)
            .bind(input.org_unit_id)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Person>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM people WHERE id = $1");
        sqlx::query_as::<_, Person>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<Person>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM people WHERE email = $1");
        sqlx::query_as::<_, Person>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// List people, optionally restricted to one org unit, ordered by name.
    pub async fn list(pool: &PgPool, org_unit_id: Option<DbId>) -> Result<Vec<Person>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM people
             WHERE ($1::BIGINT IS NULL OR org_unit_id = $1)
             ORDER BY full_name ASC"
        );
        sqlx::query_as::<_, Person>(&query)
            .bind(org_unit_id)
            .fetch_all(pool)
            .await
    }
}
