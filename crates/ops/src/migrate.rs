//! Embedded migration runner with a record of what each run applied.

use std::collections::HashSet;

use sqlx::PgPool;

/// One migration from the embedded set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationInfo {
    pub version: i64,
    pub description: String,
}

#[derive(Debug, Default)]
pub struct MigrationOutcome {
    /// Migrations applied by this run, oldest first.
    pub applied: Vec<MigrationInfo>,
    /// Migrations that were already present before this run.
    pub already_applied: usize,
}

/// Versions recorded in the sqlx bookkeeping table, empty if it does not exist yet.
pub async fn applied_versions(pool: &PgPool) -> Result<HashSet<i64>, sqlx::Error> {
    let (exists,): (bool,) =
        sqlx::query_as("SELECT to_regclass('public._sqlx_migrations') IS NOT NULL")
            .fetch_one(pool)
            .await?;
    if !exists {
        return Ok(HashSet::new());
    }

    let rows: Vec<(i64,)> = sqlx::query_as("SELECT version FROM _sqlx_migrations WHERE success")
        .fetch_all(pool)
        .await?;
    Ok(rows.into_iter().map(|(v,)| v).collect())
}

/// Apply every pending migration and report which ones ran.
pub async fn apply(pool: &PgPool) -> Result<MigrationOutcome, sqlx::migrate::MigrateError> {
    let before = applied_versions(pool).await?;

    auditdesk_db::run_migrations(pool).await?;

    let mut outcome = MigrationOutcome::default();
    for migration in auditdesk_db::MIGRATOR.iter() {
        if before.contains(&migration.version) {
            outcome.already_applied += 1;
        } else {
            outcome.applied.push(MigrationInfo {
                version: migration.version,
                description: migration.description.to_string(),
            });
        }
    }
    Ok(outcome)
}
