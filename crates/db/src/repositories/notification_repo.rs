//! Repository for the `notifications` table.

use auditdesk_core::types::DbId;
use sqlx::PgPool;

use crate::models::notification::{CreateNotification, Notification};

const COLUMNS: &str = "id, person_id, title, body, is_read, created_at, updated_at";

/// Maximum notifications returned by one list call.
pub const MAX_LIST_LIMIT: i64 = 200;

/// Provides access to per-person notifications.
pub struct NotificationRepo;

impl NotificationRepo {
    pub async fn create(
        pool: &PgPool,
        input: &CreateNotification,
    ) -> Result<Notification, sqlx::Error> {
        let query = format!(
            "INSERT INTO notifications (person_id, title, body)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Notification>(&query)
            .bind(input.person_id)
            .bind(&input.title)
            .bind(&input.body)
            .fetch_one(pool)
            .await
    }

    /// List notifications newest first.
    pub async fn list(
        pool: &PgPool,
        person_id: Option<DbId>,
        unread_only: bool,
    ) -> Result<Vec<Notification>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM notifications
             WHERE ($1::BIGINT IS NULL OR person_id = $1)
               AND (NOT $2 OR is_read = FALSE)
             ORDER BY created_at DESC, id DESC
             LIMIT $3"
        );
        sqlx::query_as::<_, Notification>(&query)
            .bind(person_id)
            .bind(unread_only)
            .bind(MAX_LIST_LIMIT)
            .fetch_all(pool)
            .await
    }

    /// Mark a notification read. Returns `None` if it does not exist.
    pub async fn mark_read(pool: &PgPool, id: DbId) -> Result<Option<Notification>, sqlx::Error> {
        let query = format!(
            "UPDATE notifications SET is_read = TRUE WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Notification>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
