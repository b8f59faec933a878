use std::time::Duration;

/// Client configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the API server, without the `/api/v1` prefix.
    pub api_url: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl ClientConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                  | Default                 |
    /// |--------------------------|-------------------------|
    /// | `AUDITDESK_API_URL`      | `http://localhost:3000` |
    /// | `AUDITDESK_TIMEOUT_SECS` | `30`                    |
    pub fn from_env() -> Self {
        let api_url = std::env::var("AUDITDESK_API_URL")
            .unwrap_or_else(|_| "http://localhost:3000".into());
        let timeout_secs = std::env::var("AUDITDESK_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(30);

        Self {
            api_url: api_url.trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(timeout_secs),
        }
    }
}
