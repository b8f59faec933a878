//! Key Result Area (KRA) workplan tracking.
//!
//! Activities under a strategic KRA are reported once per quarter with one
//! of four statuses. Completion is always expressed as a whole percentage.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

// ---------------------------------------------------------------------------
// Activity statuses
// ---------------------------------------------------------------------------

pub const STATUS_COMPLETED: &str = "Completed";
pub const STATUS_ONGOING: &str = "Ongoing";
pub const STATUS_DELAYED: &str = "Delayed";
pub const STATUS_NOT_STARTED: &str = "Not Started";

/// All valid quarterly activity statuses.
pub const VALID_ACTIVITY_STATUSES: &[&str] = &[
    STATUS_COMPLETED,
    STATUS_ONGOING,
    STATUS_DELAYED,
    STATUS_NOT_STARTED,
];

/// Validate a quarterly activity status.
pub fn validate_activity_status(status: &str) -> Result<(), String> {
    if VALID_ACTIVITY_STATUSES.contains(&status) {
        Ok(())
    } else {
        Err(format!(
            "Invalid activity status '{status}'. Must be one of: {}",
            VALID_ACTIVITY_STATUSES.join(", ")
        ))
    }
}

// ---------------------------------------------------------------------------
// Periods
// ---------------------------------------------------------------------------

/// Validate that a quarter is within 1..=4.
pub fn validate_quarter(quarter: i16) -> Result<(), String> {
    if (1..=4).contains(&quarter) {
        Ok(())
    } else {
        Err(format!("Quarter must be between 1 and 4, got {quarter}"))
    }
}

/// Calendar quarter (1..=4) containing `date`.
pub fn quarter_of(date: NaiveDate) -> i16 {
    ((date.month0() / 3) + 1) as i16
}

/// `(year, quarter)` containing `date`.
pub fn current_period(date: NaiveDate) -> (i32, i16) {
    (date.year(), quarter_of(date))
}

// ---------------------------------------------------------------------------
// Completion
// ---------------------------------------------------------------------------

/// Whole-number completion percentage, `round(completed / total * 100)`.
///
/// Returns 0 when `total` is 0.
pub fn completion_pct(completed: i64, total: i64) -> i64 {
    if total <= 0 {
        return 0;
    }
    ((completed as f64 / total as f64) * 100.0).round() as i64
}

/// Per-status activity counts for one KRA in one period.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    pub total_activities: i64,
    pub completed: i64,
    pub ongoing: i64,
    pub delayed: i64,
    pub not_started: i64,
}

impl StatusCounts {
    pub fn completion_pct(&self) -> i64 {
        completion_pct(self.completed, self.total_activities)
    }
}

/// Totals across every KRA shown in the completion widget.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CompletionTotals {
    pub total_activities: i64,
    pub completed: i64,
    pub ongoing: i64,
    pub delayed: i64,
    pub not_started: i64,
    pub completion_pct: i64,
}

/// Sum status counts and derive the overall completion percentage.
pub fn summarize<'a, I>(rows: I) -> CompletionTotals
where
    I: IntoIterator<Item = &'a StatusCounts>,
{
    let mut totals = CompletionTotals::default();
    for r in rows {
        totals.total_activities += r.total_activities;
        totals.completed += r.completed;
        totals.ongoing += r.ongoing;
        totals.delayed += r.delayed;
        totals.not_started += r.not_started;
    }
    totals.completion_pct = completion_pct(totals.completed, totals.total_activities);
    totals
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn three_of_four_is_75() {
        assert_eq!(completion_pct(3, 4), 75);
    }

    #[test]
    fn zero_total_is_zero() {
        assert_eq!(completion_pct(0, 0), 0);
        assert_eq!(completion_pct(5, 0), 0);
    }

    #[test]
    fn completion_rounds_half_up() {
        assert_eq!(completion_pct(1, 3), 33);
        assert_eq!(completion_pct(2, 3), 67);
        assert_eq!(completion_pct(1, 8), 13);
    }

    #[test]
    fn summarize_adds_counts() {
        let rows = [
            StatusCounts {
                total_activities: 4,
                completed: 3,
                ongoing: 1,
                delayed: 0,
                not_started: 0,
            },
            StatusCounts {
                total_activities: 6,
                completed: 1,
                ongoing: 2,
                delayed: 2,
                not_started: 1,
            },
        ];
        let totals = summarize(&rows);
        assert_eq!(totals.total_activities, 10);
        assert_eq!(totals.completed, 4);
        assert_eq!(totals.delayed, 2);
        assert_eq!(totals.completion_pct, 40);
    }

    #[test]
    fn summarize_empty_is_zero() {
        let totals = summarize(&[] as &[StatusCounts]);
        assert_eq!(totals, CompletionTotals::default());
    }

    #[test]
    fn quarters_from_dates() {
        let d = |m| NaiveDate::from_ymd_opt(2025, m, 15).unwrap();
        assert_eq!(quarter_of(d(1)), 1);
        assert_eq!(quarter_of(d(3)), 1);
        assert_eq!(quarter_of(d(4)), 2);
        assert_eq!(quarter_of(d(9)), 3);
        assert_eq!(quarter_of(d(12)), 4);
        assert_eq!(current_period(d(7)), (2025, 3));
    }

    #[test]
    fn quarter_bounds() {
        assert!(validate_quarter(1).is_ok());
        assert!(validate_quarter(4).is_ok());
        assert!(validate_quarter(0).is_err());
        assert!(validate_quarter(5).is_err());
    }

    #[test]
    fn activity_status_vocabulary() {
        assert!(validate_activity_status("Not Started").is_ok());
        assert!(validate_activity_status("done").is_err());
    }
}
