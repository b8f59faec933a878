//! `apply-migrations` -- apply the embedded SQL migrations to `DATABASE_URL`.

use anyhow::Context;

use auditdesk_ops::{migrate, OpsConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    auditdesk_ops::init_tracing();

    let config = OpsConfig::from_env()?;
    let pool = auditdesk_db::create_pool(&config.database_url)
        .await
        .context("Failed to connect to database")?;

    let outcome = migrate::apply(&pool)
        .await
        .context("Failed to apply migrations")?;

    for migration in &outcome.applied {
        tracing::info!(
            version = migration.version,
            description = %migration.description,
            "Applied migration"
        );
    }
    tracing::info!(
        applied = outcome.applied.len(),
        already_applied = outcome.already_applied,
        "Migrations complete"
    );

    pool.close().await;
    Ok(())
}
