//! Audit engagement, finding, recommendation, and action plan vocabularies.
//!
//! Values are stored as text; the database carries matching CHECK
//! constraints so a value rejected here never reaches an INSERT.

use chrono::NaiveDate;

/// Maximum length of a title field in characters.
pub const MAX_TITLE_LENGTH: usize = 255;

fn validate_one_of(kind: &str, value: &str, allowed: &[&str]) -> Result<(), String> {
    if allowed.contains(&value) {
        Ok(())
    } else {
        Err(format!(
            "Invalid {kind} '{value}'. Must be one of: {}",
            allowed.join(", ")
        ))
    }
}

// ---------------------------------------------------------------------------
// Engagements
// ---------------------------------------------------------------------------

pub const ENGAGEMENT_PLANNED: &str = "planned";
pub const ENGAGEMENT_FIELDWORK: &str = "fieldwork";
pub const ENGAGEMENT_REPORTING: &str = "reporting";
pub const ENGAGEMENT_COMPLETED: &str = "completed";
pub const ENGAGEMENT_CANCELLED: &str = "cancelled";

pub const VALID_ENGAGEMENT_STATUSES: &[&str] = &[
    ENGAGEMENT_PLANNED,
    ENGAGEMENT_FIELDWORK,
    ENGAGEMENT_REPORTING,
    ENGAGEMENT_COMPLETED,
    ENGAGEMENT_CANCELLED,
];

pub const VALID_ENGAGEMENT_TYPES: &[&str] =
    &["assurance", "consulting", "investigation", "follow_up"];

pub fn validate_engagement_status(status: &str) -> Result<(), String> {
    validate_one_of("engagement status", status, VALID_ENGAGEMENT_STATUSES)
}

pub fn validate_engagement_type(kind: &str) -> Result<(), String> {
    validate_one_of("engagement type", kind, VALID_ENGAGEMENT_TYPES)
}

// ---------------------------------------------------------------------------
// Findings
// ---------------------------------------------------------------------------

pub const VALID_FINDING_RATINGS: &[&str] = &["high", "medium", "low"];
pub const VALID_FINDING_STATUSES: &[&str] = &["open", "resolved", "closed"];

pub fn validate_finding_rating(rating: &str) -> Result<(), String> {
    validate_one_of("finding rating", rating, VALID_FINDING_RATINGS)
}

pub fn validate_finding_status(status: &str) -> Result<(), String> {
    validate_one_of("finding status", status, VALID_FINDING_STATUSES)
}

// ---------------------------------------------------------------------------
// Recommendations
// ---------------------------------------------------------------------------

pub const VALID_RECOMMENDATION_STATUSES: &[&str] = &[
    "open",
    "in_progress",
    "implemented",
    "not_implemented",
    "closed",
];

pub const VALID_PRIORITIES: &[&str] = &["high", "medium", "low"];

pub fn validate_recommendation_status(status: &str) -> Result<(), String> {
    validate_one_of("recommendation status", status, VALID_RECOMMENDATION_STATUSES)
}

pub fn validate_priority(priority: &str) -> Result<(), String> {
    validate_one_of("priority", priority, VALID_PRIORITIES)
}

// ---------------------------------------------------------------------------
// Action plans
// ---------------------------------------------------------------------------

pub const VALID_ACTION_PLAN_STATUSES: &[&str] =
    &["not_started", "in_progress", "completed", "overdue"];

pub fn validate_action_plan_status(status: &str) -> Result<(), String> {
    validate_one_of("action plan status", status, VALID_ACTION_PLAN_STATUSES)
}

pub fn validate_progress_pct(pct: i16) -> Result<(), String> {
    if (0..=100).contains(&pct) {
        Ok(())
    } else {
        Err(format!("Progress must be between 0 and 100, got {pct}"))
    }
}

// ---------------------------------------------------------------------------
// Shared field checks
// ---------------------------------------------------------------------------

/// Validate a required title: non-blank and within [`MAX_TITLE_LENGTH`].
pub fn validate_title(field: &str, value: &str) -> Result<(), String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(format!("{field} must not be empty"));
    }
    if trimmed.chars().count() > MAX_TITLE_LENGTH {
        return Err(format!(
            "{field} must be at most {MAX_TITLE_LENGTH} characters"
        ));
    }
    Ok(())
}

/// Validate that an optional planned window does not end before it starts.
pub fn validate_date_range(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Result<(), String> {
    match (start, end) {
        (Some(s), Some(e)) if e < s => Err(format!("End date {e} is before start date {s}")),
        _ => Ok(()),
    }
}
