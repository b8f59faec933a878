//! Demo-data helpers: duplicate-key detection, outcome tallies, and random
//! jitter for generated scores and statuses.

use rand::Rng;
use serde::Serialize;

use crate::kra;
use crate::psap::{MAX_SCORE, MIN_SCORE};

/// PostgreSQL SQLSTATE for `unique_violation`.
pub const UNIQUE_VIOLATION: &str = "23505";

/// True when a database error code marks a duplicate-key conflict.
pub fn is_duplicate_key(code: Option<&str>) -> bool {
    code == Some(UNIQUE_VIOLATION)
}

/// What happened to one seed row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SeedOutcome {
    Inserted,
    Skipped,
}

/// Running tally for one seeding step.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SeedReport {
    pub step: String,
    pub inserted: usize,
    pub skipped: usize,
}

impl SeedReport {
    pub fn new(step: impl Into<String>) -> Self {
        Self {
            step: step.into(),
            ..Self::default()
        }
    }

    pub fn record(&mut self, outcome: SeedOutcome) {
        match outcome {
            SeedOutcome::Inserted => self.inserted += 1,
            SeedOutcome::Skipped => self.skipped += 1,
        }
    }
}

/// Perturb a base score by up to `spread` in either direction.
///
/// The result is clamped to the PSAP score range and snapped to half points.
pub fn jitter_score<R: Rng>(rng: &mut R, base: f64, spread: f64) -> f64 {
    let offset = if spread > 0.0 {
        rng.random_range(-spread..=spread)
    } else {
        0.0
    };
    let raw = (base + offset).clamp(MIN_SCORE, MAX_SCORE);
    (raw * 2.0).round() / 2.0
}

/// Pick a quarterly activity status, biased toward progress in later quarters.
pub fn random_activity_status<R: Rng>(rng: &mut R, quarter: i16) -> &'static str {
    let completed_cutoff = 20 * i32::from(quarter.clamp(1, 4));
    let roll: i32 = rng.random_range(0..100);
    if roll < completed_cutoff {
        kra::STATUS_COMPLETED
    } else if roll < completed_cutoff + 30 {
        kra::STATUS_ONGOING
    } else if roll < completed_cutoff + 40 {
        kra::STATUS_DELAYED
    } else {
        kra::STATUS_NOT_STARTED
    }
}
