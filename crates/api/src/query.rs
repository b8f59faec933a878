//! Shared query parameter types for API handlers.

use auditdesk_core::types::DbId;
use serde::Deserialize;

/// `?limit=` for widgets that return a bounded list.
#[derive(Debug, Deserialize)]
pub struct LimitParams {
    pub limit: Option<i64>,
}

/// Clamp a requested limit into `1..=max`, using `default` when absent.
pub fn clamp_limit(limit: Option<i64>, default: i64, max: i64) -> i64 {
    limit.unwrap_or(default).clamp(1, max)
}

/// `?year=&quarter=` period override.
#[derive(Debug, Deserialize)]
pub struct PeriodParams {
    pub year: Option<i32>,
    pub quarter: Option<i16>,
}

/// `?org_unit_id=` filter.
#[derive(Debug, Deserialize)]
pub struct OrgUnitFilter {
    pub org_unit_id: Option<DbId>,
}
