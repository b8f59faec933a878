//! `check-schema` -- report whether every expected table and view exists.
//!
//! Reads the catalog once by default. Set `CHECK_SCHEMA_PROBE=1` to probe
//! each relation with a zero-row select instead. Exits non-zero when any
//! relation is missing or could not be checked.

use anyhow::Context;

use auditdesk_core::schema;
use auditdesk_ops::{schema_check, OpsConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    auditdesk_ops::init_tracing();

    let config = OpsConfig::from_env()?;
    let pool = auditdesk_db::create_pool(&config.database_url)
        .await
        .context("Failed to connect to database")?;

    let mode = if config.schema_probe { "probe" } else { "catalog" };
    tracing::info!(mode, "Checking schema");

    let checks = schema_check::run(&pool, config.schema_probe)
        .await
        .context("Failed to read schema catalog")?;
    pool.close().await;

    for check in &checks {
        println!("{:<32} {:?}: {}", check.name, check.kind, check.status);
    }

    let summary = schema::summarize(&checks);
    tracing::info!(
        exists = summary.exists,
        not_found = summary.not_found,
        errors = summary.errors,
        "Schema check complete"
    );

    if !summary.is_complete() {
        anyhow::bail!(
            "{} relation(s) missing, {} could not be checked",
            summary.not_found,
            summary.errors
        );
    }
    Ok(())
}
