//! Risk profile classification, risk event workflow, and dashboard totals.

use serde::Serialize;

// ---------------------------------------------------------------------------
// Risk levels
// ---------------------------------------------------------------------------

pub const LEVEL_EXTREME: &str = "Extreme";
pub const LEVEL_HIGH: &str = "High";
pub const LEVEL_MEDIUM: &str = "Medium";
pub const LEVEL_LOW: &str = "Low";

pub const VALID_RISK_LEVELS: &[&str] = &[LEVEL_EXTREME, LEVEL_HIGH, LEVEL_MEDIUM, LEVEL_LOW];

pub const MIN_RATING: i16 = 1;
pub const MAX_RATING: i16 = 5;

/// Validate a likelihood or impact rating (1..=5).
pub fn validate_rating(field: &str, value: i16) -> Result<(), String> {
    if (MIN_RATING..=MAX_RATING).contains(&value) {
        Ok(())
    } else {
        Err(format!(
            "{field} must be between {MIN_RATING} and {MAX_RATING}, got {value}"
        ))
    }
}

/// Classify a risk from its likelihood and impact ratings.
///
/// The inherent score is `likelihood * impact` (1..=25):
/// >= 20 Extreme, >= 12 High, >= 6 Medium, otherwise Low.
pub fn classify_risk(likelihood: i16, impact: i16) -> &'static str {
    match likelihood * impact {
        s if s >= 20 => LEVEL_EXTREME,
        s if s >= 12 => LEVEL_HIGH,
        s if s >= 6 => LEVEL_MEDIUM,
        _ => LEVEL_LOW,
    }
}

// ---------------------------------------------------------------------------
// Risk item statuses
// ---------------------------------------------------------------------------

pub const ITEM_OPEN: &str = "open";
pub const ITEM_MITIGATED: &str = "mitigated";
pub const ITEM_CLOSED: &str = "closed";

pub const VALID_ITEM_STATUSES: &[&str] = &[ITEM_OPEN, ITEM_MITIGATED, ITEM_CLOSED];

pub fn validate_item_status(status: &str) -> Result<(), String> {
    if VALID_ITEM_STATUSES.contains(&status) {
        Ok(())
    } else {
        Err(format!(
            "Invalid risk item status '{status}'. Must be one of: {}",
            VALID_ITEM_STATUSES.join(", ")
        ))
    }
}

// ---------------------------------------------------------------------------
// Risk events
// ---------------------------------------------------------------------------

pub const EVENT_PENDING: &str = "pending";
pub const EVENT_UNDER_REVIEW: &str = "under_review";
pub const EVENT_APPROVED: &str = "approved";
pub const EVENT_REJECTED: &str = "rejected";
pub const EVENT_CLOSED: &str = "closed";

pub const VALID_EVENT_STATUSES: &[&str] = &[
    EVENT_PENDING,
    EVENT_UNDER_REVIEW,
    EVENT_APPROVED,
    EVENT_REJECTED,
    EVENT_CLOSED,
];

/// Statuses shown in the pending risk events widget.
pub const ACTIVE_EVENT_STATUSES: &[&str] = &[EVENT_PENDING, EVENT_UNDER_REVIEW, EVENT_APPROVED];

pub fn validate_event_status(status: &str) -> Result<(), String> {
    if VALID_EVENT_STATUSES.contains(&status) {
        Ok(())
    } else {
        Err(format!(
            "Invalid risk event status '{status}'. Must be one of: {}",
            VALID_EVENT_STATUSES.join(", ")
        ))
    }
}

/// Validate a risk event status change.
///
/// ```text
/// pending      -> under_review | rejected
/// under_review -> approved | rejected | pending
/// approved     -> closed
/// rejected, closed are terminal
/// ```
pub fn validate_event_transition(from: &str, to: &str) -> Result<(), String> {
    validate_event_status(to)?;
    let allowed: &[&str] = match from {
        EVENT_PENDING => &[EVENT_UNDER_REVIEW, EVENT_REJECTED],
        EVENT_UNDER_REVIEW => &[EVENT_APPROVED, EVENT_REJECTED, EVENT_PENDING],
        EVENT_APPROVED => &[EVENT_CLOSED],
        _ => &[],
    };
    if allowed.contains(&to) {
        Ok(())
    } else {
        Err(format!("Cannot move risk event from '{from}' to '{to}'"))
    }
}

pub const PRIORITY_CRITICAL: i16 = 1;
pub const PRIORITY_HIGH: i16 = 2;
pub const PRIORITY_MEDIUM: i16 = 3;
pub const PRIORITY_LOW: i16 = 4;

/// Validate an event priority. 1 is the most urgent.
pub fn validate_priority(priority: i16) -> Result<(), String> {
    if (PRIORITY_CRITICAL..=PRIORITY_LOW).contains(&priority) {
        Ok(())
    } else {
        Err(format!(
            "Priority must be between {PRIORITY_CRITICAL} and {PRIORITY_LOW}, got {priority}"
        ))
    }
}

pub fn priority_label(priority: i16) -> &'static str {
    match priority {
        PRIORITY_CRITICAL => "critical",
        PRIORITY_HIGH => "high",
        PRIORITY_MEDIUM => "medium",
        PRIORITY_LOW => "low",
        _ => "unknown",
    }
}

// ---------------------------------------------------------------------------
// Dashboard totals
// ---------------------------------------------------------------------------

/// Per-org-unit counts as read from the current risk summary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RiskCounts {
    pub total_risks: i64,
    pub extreme_count: i64,
    pub high_count: i64,
    pub open_count: i64,
}

/// Sum the per-org-unit counts shown in the risk widget.
pub fn sum_counts<'a, I>(rows: I) -> RiskCounts
where
    I: IntoIterator<Item = &'a RiskCounts>,
{
    rows.into_iter().fold(RiskCounts::default(), |acc, r| RiskCounts {
        total_risks: acc.total_risks + r.total_risks,
        extreme_count: acc.extreme_count + r.extreme_count,
        high_count: acc.high_count + r.high_count,
        open_count: acc.open_count + r.open_count,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification_thresholds() {
        assert_eq!(classify_risk(5, 5), LEVEL_EXTREME);
        assert_eq!(classify_risk(4, 5), LEVEL_EXTREME);
        assert_eq!(classify_risk(4, 4), LEVEL_HIGH);
        assert_eq!(classify_risk(3, 4), LEVEL_HIGH);
        assert_eq!(classify_risk(2, 3), LEVEL_MEDIUM);
        assert_eq!(classify_risk(1, 5), LEVEL_LOW);
        assert_eq!(classify_risk(1, 1), LEVEL_LOW);
    }

    #[test]
    fn rating_bounds() {
        assert!(validate_rating("likelihood", 1).is_ok());
        assert!(validate_rating("impact", 5).is_ok());
        let err = validate_rating("impact", 6).unwrap_err();
        assert!(err.starts_with("impact"));
        assert!(validate_rating("likelihood", 0).is_err());
    }

    #[test]
    fn event_transitions() {
        assert!(validate_event_transition(EVENT_PENDING, EVENT_UNDER_REVIEW).is_ok());
        assert!(validate_event_transition(EVENT_UNDER_REVIEW, EVENT_APPROVED).is_ok());
        assert!(validate_event_transition(EVENT_APPROVED, EVENT_CLOSED).is_ok());
        assert!(validate_event_transition(EVENT_PENDING, EVENT_APPROVED).is_err());
        assert!(validate_event_transition(EVENT_CLOSED, EVENT_PENDING).is_err());
        assert!(validate_event_transition(EVENT_PENDING, "bogus").is_err());
    }

    #[test]
    fn priorities() {
        assert!(validate_priority(1).is_ok());
        assert!(validate_priority(5).is_err());
        assert_eq!(priority_label(PRIORITY_CRITICAL), "critical");
        assert_eq!(priority_label(9), "unknown");
    }

    #[test]
    fn totals_equal_sum_of_rows() {
        let rows = [
            RiskCounts {
                total_risks: 10,
                extreme_count: 2,
                high_count: 3,
                open_count: 7,
            },
            RiskCounts {
                total_risks: 4,
                extreme_count: 0,
                high_count: 1,
                open_count: 4,
            },
            RiskCounts {
                total_risks: 6,
                extreme_count: 1,
                high_count: 0,
                open_count: 2,
            },
        ];
        let totals = sum_counts(&rows);
        assert_eq!(totals.total_risks, 20);
        assert_eq!(totals.extreme_count, 3);
        assert_eq!(totals.high_count, 4);
        assert_eq!(totals.open_count, 13);
    }
}
