//! `seed-demo` -- insert demonstration rows into `DATABASE_URL`.
//!
//! Safe to re-run: rows that already exist are skipped. `SEED_YEAR`
//! selects the year for assessments and KRA statuses.

use anyhow::Context;
use rand::rngs::StdRng;
use rand::SeedableRng;

use auditdesk_ops::{seed, OpsConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    auditdesk_ops::init_tracing();

    let config = OpsConfig::from_env()?;
    let pool = auditdesk_db::create_pool(&config.database_url)
        .await
        .context("Failed to connect to database")?;

    tracing::info!(year = config.seed_year, "Seeding demo data");

    let mut rng = StdRng::from_os_rng();
    let result = seed::run(&pool, config.seed_year, &mut rng).await;
    pool.close().await;

    let reports = result.context("Seeding aborted")?;
    for report in &reports {
        tracing::info!(
            step = %report.step,
            inserted = report.inserted,
            skipped = report.skipped,
            "Seed step complete"
        );
    }
    Ok(())
}
