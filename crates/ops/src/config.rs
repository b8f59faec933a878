use chrono::Datelike;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("DATABASE_URL must be set")]
    MissingDatabaseUrl,

    #[error("SEED_YEAR must be a year between 2000 and 2100, got '{0}'")]
    InvalidSeedYear(String),
}

/// Configuration shared by the ops binaries.
///
/// | Env Var              | Default        |
/// |----------------------|----------------|
/// | `DATABASE_URL`       | required       |
/// | `SEED_YEAR`          | current year   |
/// | `CHECK_SCHEMA_PROBE` | off (`1` = on) |
#[derive(Debug, Clone)]
pub struct OpsConfig {
    pub database_url: String,
    pub seed_year: i32,
    /// Probe each relation with a zero-row select instead of reading the catalog.
    pub schema_probe: bool,
}

impl OpsConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url = std::env::var("DATABASE_URL")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or(ConfigError::MissingDatabaseUrl)?;

        let current_year = chrono::Utc::now().year();
        let seed_year = parse_seed_year(std::env::var("SEED_YEAR").ok().as_deref(), current_year)?;

        let schema_probe = parse_flag(std::env::var("CHECK_SCHEMA_PROBE").ok().as_deref());

        Ok(Self {
            database_url,
            seed_year,
            schema_probe,
        })
    }
}

fn parse_seed_year(raw: Option<&str>, default: i32) -> Result<i32, ConfigError> {
    match raw.map(str::trim).filter(|v| !v.is_empty()) {
        None => Ok(default),
        Some(v) => v
            .parse::<i32>()
            .ok()
            .filter(|y| (2000..=2100).contains(y))
            .ok_or_else(|| ConfigError::InvalidSeedYear(v.to_string())),
    }
}

fn parse_flag(raw: Option<&str>) -> bool {
    matches!(
        raw.map(|v| v.trim().to_ascii_lowercase()).as_deref(),
        Some("1" | "true" | "yes")
    )
}
