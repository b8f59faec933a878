//! Expected schema objects and existence classification for `check-schema`.

use std::collections::HashSet;
use std::fmt;

use serde::Serialize;

/// PostgreSQL SQLSTATE for `undefined_table`.
pub const UNDEFINED_TABLE: &str = "42P01";

/// Base tables the application reads or writes.
pub const EXPECTED_TABLES: &[&str] = &[
    "org_units",
    "people",
    "engagements",
    "audit_findings",
    "recommendations",
    "action_plans",
    "risk_profiles",
    "risk_profile_items",
    "psap_standards",
    "psap_assessments",
    "psap_assessment_scores",
    "strategic_kras",
    "kra_activities",
    "kra_activity_quarterly_status",
    "audit_risk_events",
    "audit_risk_register",
    "notifications",
];

/// Precomputed views consumed by widgets and exports.
pub const EXPECTED_VIEWS: &[&str] = &[
    "v_current_risk_summary",
    "v_kra_status_summary",
    "v_latest_psap_ratings",
    "published_recommendations_view",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationKind {
    Table,
    View,
}

/// Result of checking one relation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "detail", rename_all = "snake_case")]
pub enum RelationStatus {
    Exists,
    NotFound,
    Error(String),
}

impl fmt::Display for RelationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exists => f.write_str("EXISTS"),
            Self::NotFound => f.write_str("NOT FOUND"),
            Self::Error(msg) => write!(f, "ERROR: {msg}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RelationCheck {
    pub name: String,
    pub kind: RelationKind,
    pub status: RelationStatus,
}

/// Every expected relation paired with its kind, tables first.
pub fn expected_relations() -> impl Iterator<Item = (&'static str, RelationKind)> {
    EXPECTED_TABLES
        .iter()
        .map(|t| (*t, RelationKind::Table))
        .chain(EXPECTED_VIEWS.iter().map(|v| (*v, RelationKind::View)))
}

/// Classify a failed zero-row probe.
///
/// Only the `undefined_table` SQLSTATE counts as "not found"; anything else
/// (permissions, connectivity) is reported as an error.
pub fn classify_probe_error(code: Option<&str>, message: &str) -> RelationStatus {
    if code == Some(UNDEFINED_TABLE) {
        RelationStatus::NotFound
    } else {
        RelationStatus::Error(message.to_string())
    }
}

/// Classify every expected relation against the names found in the catalog.
pub fn classify_catalog(present: &HashSet<String>) -> Vec<RelationCheck> {
    expected_relations()
        .map(|(name, kind)| RelationCheck {
            name: name.to_string(),
            kind,
            status: if present.contains(name) {
                RelationStatus::Exists
            } else {
                RelationStatus::NotFound
            },
        })
        .collect()
}

/// Counts per status for the closing summary line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SchemaSummary {
    pub exists: usize,
    pub not_found: usize,
    pub errors: usize,
}

impl SchemaSummary {
    pub fn is_complete(&self) -> bool {
        self.not_found == 0 && self.errors == 0
    }
}

pub fn summarize(checks: &[RelationCheck]) -> SchemaSummary {
    let mut summary = SchemaSummary::default();
    for c in checks {
        match c.status {
            RelationStatus::Exists => summary.exists += 1,
            RelationStatus::NotFound => summary.not_found += 1,
            RelationStatus::Error(_) => summary.errors += 1,
        }
    }
    summary
}
