//! Operational tooling: migration runner, schema check, and demo seeding.
//!
//! Each binary under `src/bin` is a thin wrapper that loads [`OpsConfig`],
//! initialises tracing, and calls into one of these modules.

pub mod config;
pub mod migrate;
pub mod schema_check;
pub mod seed;

pub use config::OpsConfig;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Install the tracing subscriber shared by the ops binaries.
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "auditdesk_ops=info,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
