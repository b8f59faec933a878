//! PSAP compliance scorecard scoring.
//!
//! Each standard carries a weight. An assessment scores every standard on a
//! 0..=10 scale; the standard contributes `score * weight / 10` points and an
//! assessment's weighted total may not exceed [`MAX_WEIGHTED_TOTAL`]. The
//! overall result is the weighted total as a percentage of that maximum,
//! banded into a compliance rating.

use serde::Serialize;

pub const MIN_SCORE: f64 = 0.0;
pub const MAX_SCORE: f64 = 10.0;

/// Upper bound on the sum of weighted scores for one assessment.
pub const MAX_WEIGHTED_TOTAL: f64 = 20.0;

// ---------------------------------------------------------------------------
// Assessment statuses
// ---------------------------------------------------------------------------

pub const ASSESSMENT_DRAFT: &str = "draft";
pub const ASSESSMENT_SUBMITTED: &str = "submitted";
pub const ASSESSMENT_VALIDATED: &str = "validated";

pub const VALID_ASSESSMENT_STATUSES: &[&str] =
    &[ASSESSMENT_DRAFT, ASSESSMENT_SUBMITTED, ASSESSMENT_VALIDATED];

pub fn validate_assessment_status(status: &str) -> Result<(), String> {
    if VALID_ASSESSMENT_STATUSES.contains(&status) {
        Ok(())
    } else {
        Err(format!(
            "Invalid assessment status '{status}'. Must be one of: {}",
            VALID_ASSESSMENT_STATUSES.join(", ")
        ))
    }
}

// ---------------------------------------------------------------------------
// Scores
// ---------------------------------------------------------------------------

/// Validate a single standard score.
pub fn validate_score(score: f64) -> Result<(), String> {
    if score.is_finite() && (MIN_SCORE..=MAX_SCORE).contains(&score) {
        Ok(())
    } else {
        Err(format!(
            "Score must be between {MIN_SCORE} and {MAX_SCORE}, got {score}"
        ))
    }
}

/// Points a standard contributes to the weighted total.
pub fn weighted_score(score: f64, weight: f64) -> f64 {
    score * weight / MAX_SCORE
}

/// Validate an assessment's weighted total against the scorecard maximum.
pub fn validate_weighted_total(total: f64) -> Result<(), String> {
    if total <= MAX_WEIGHTED_TOTAL {
        Ok(())
    } else {
        Err(format!(
            "Weighted total {total:.2} exceeds the maximum of {MAX_WEIGHTED_TOTAL}"
        ))
    }
}

/// Weighted total as a percentage of the maximum, rounded to one decimal.
pub fn overall_pct(weighted_total: f64) -> f64 {
    let pct = (weighted_total / MAX_WEIGHTED_TOTAL * 100.0).clamp(0.0, 100.0);
    (pct * 10.0).round() / 10.0
}

// ---------------------------------------------------------------------------
// Rating bands
// ---------------------------------------------------------------------------

/// Overall compliance rating derived from the percentage score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RatingBand {
    Full,
    Substantial,
    Partial,
    Low,
    #[serde(rename = "Non-compliance")]
    NonCompliance,
}

impl RatingBand {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Full => "Full",
            Self::Substantial => "Substantial",
            Self::Partial => "Partial",
            Self::Low => "Low",
            Self::NonCompliance => "Non-compliance",
        }
    }
}

/// Classify an overall percentage into a rating band.
///
/// | Band           | Percentage |
/// |----------------|------------|
/// | Full           | >= 90      |
/// | Substantial    | >= 75      |
/// | Partial        | >= 50      |
/// | Low            | >= 25      |
/// | Non-compliance | < 25       |
pub fn rating_band(pct: f64) -> RatingBand {
    if pct >= 90.0 {
        RatingBand::Full
    } else if pct >= 75.0 {
        RatingBand::Substantial
    } else if pct >= 50.0 {
        RatingBand::Partial
    } else if pct >= 25.0 {
        RatingBand::Low
    } else {
        RatingBand::NonCompliance
    }
}

/// Percentage and band for one assessment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rating {
    pub weighted_total: f64,
    pub overall_pct: f64,
    pub rating: RatingBand,
}

pub fn rate(weighted_total: f64) -> Rating {
    let pct = overall_pct(weighted_total);
    Rating {
        weighted_total,
        overall_pct: pct,
        rating: rating_band(pct),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_range() {
        assert!(validate_score(0.0).is_ok());
        assert!(validate_score(10.0).is_ok());
        assert!(validate_score(-0.5).is_err());
        assert!(validate_score(10.5).is_err());
        assert!(validate_score(f64::NAN).is_err());
    }

    #[test]
    fn weighted_score_scales_by_weight() {
        assert_eq!(weighted_score(10.0, 4.0), 4.0);
        assert_eq!(weighted_score(5.0, 2.0), 1.0);
    }

    #[test]
    fn weighted_total_cap() {
        assert!(validate_weighted_total(20.0).is_ok());
        assert!(validate_weighted_total(20.01).is_err());
    }

    #[test]
    fn overall_pct_of_maximum() {
        assert_eq!(overall_pct(20.0), 100.0);
        assert_eq!(overall_pct(15.0), 75.0);
        assert_eq!(overall_pct(0.0), 0.0);
        assert_eq!(overall_pct(12.5), 62.5);
        assert_eq!(overall_pct(25.0), 100.0);
    }

    #[test]
    fn band_boundaries() {
        assert_eq!(rating_band(90.0), RatingBand::Full);
        assert_eq!(rating_band(89.9), RatingBand::Substantial);
        assert_eq!(rating_band(75.0), RatingBand::Substantial);
        assert_eq!(rating_band(50.0), RatingBand::Partial);
        assert_eq!(rating_band(25.0), RatingBand::Low);
        assert_eq!(rating_band(24.9), RatingBand::NonCompliance);
    }

    #[test]
    fn rate_combines_pct_and_band() {
        let r = rate(16.0);
        assert_eq!(r.overall_pct, 80.0);
        assert_eq!(r.rating, RatingBand::Substantial);
        assert_eq!(serde_json::to_value(r.rating).unwrap(), "Substantial");
        assert_eq!(
            serde_json::to_value(RatingBand::NonCompliance).unwrap(),
            "Non-compliance"
        );
    }
}
