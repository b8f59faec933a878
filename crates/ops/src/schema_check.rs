//! Existence check for every table and view the application expects.

use auditdesk_core::schema::{self, RelationCheck, RelationStatus};
use auditdesk_db::repositories::SchemaRepo;
use sqlx::PgPool;

/// Classify every expected relation from a single catalog query.
pub async fn check_catalog(pool: &PgPool) -> Result<Vec<RelationCheck>, sqlx::Error> {
    let present = SchemaRepo::public_relations(pool).await?;
    tracing::debug!(relations = present.len(), "Read public relations from catalog");
    Ok(schema::classify_catalog(&present))
}

/// Classify every expected relation by probing it with a zero-row select.
///
/// Probe failures are part of the result, never an `Err`.
pub async fn check_probe(pool: &PgPool) -> Vec<RelationCheck> {
    let mut checks = Vec::new();
    for (name, kind) in schema::expected_relations() {
        let status = match SchemaRepo::probe(pool, name).await {
            Ok(()) => RelationStatus::Exists,
            Err(err) => {
                let code = auditdesk_db::error_code(&err);
                schema::classify_probe_error(code.as_deref(), &err.to_string())
            }
        };
        checks.push(RelationCheck {
            name: name.to_string(),
            kind,
            status,
        });
    }
    checks
}

/// Run the check in the configured mode.
pub async fn run(pool: &PgPool, probe: bool) -> Result<Vec<RelationCheck>, sqlx::Error> {
    if probe {
        Ok(check_probe(pool).await)
    } else {
        check_catalog(pool).await
    }
}
