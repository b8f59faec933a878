//! Quarterly trend series for the dashboard charts.
//!
//! Rows are grouped into one point per `(year, quarter)` and returned in
//! chronological order. Periods with no rows produce no point; nothing is
//! interpolated.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::kra::completion_pct;
use crate::psap::{self, RatingBand};

/// Chart label for a period, e.g. `2025 Q3`.
pub fn period_label(year: i32, quarter: i16) -> String {
    format!("{year} Q{quarter}")
}

/// One assessment's weighted total in a period.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PsapSample {
    pub year: i32,
    pub quarter: i16,
    pub weighted_total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PsapTrendPoint {
    pub year: i32,
    pub quarter: i16,
    pub label: String,
    /// Mean weighted total across the assessments in the period.
    pub weighted_total: f64,
    pub overall_pct: f64,
    pub rating: RatingBand,
    pub assessments: usize,
}

/// Build the PSAP trend. Several org units in one period are averaged.
pub fn psap_series(samples: &[PsapSample]) -> Vec<PsapTrendPoint> {
    let mut buckets: BTreeMap<(i32, i16), (f64, usize)> = BTreeMap::new();
    for s in samples {
        let entry = buckets.entry((s.year, s.quarter)).or_insert((0.0, 0));
        entry.0 += s.weighted_total;
        entry.1 += 1;
    }

    buckets
        .into_iter()
        .map(|((year, quarter), (sum, n))| {
            let mean = sum / n as f64;
            let rating = psap::rate(mean);
            PsapTrendPoint {
                year,
                quarter,
                label: period_label(year, quarter),
                weighted_total: mean,
                overall_pct: rating.overall_pct,
                rating: rating.rating,
                assessments: n,
            }
        })
        .collect()
}

/// Activity counts for one KRA in a period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KraSample {
    pub year: i32,
    pub quarter: i16,
    pub total_activities: i64,
    pub completed: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KraTrendPoint {
    pub year: i32,
    pub quarter: i16,
    pub label: String,
    pub total_activities: i64,
    pub completed: i64,
    pub completion_pct: i64,
}

/// Build the KRA completion trend, summing counts across KRAs per period.
pub fn kra_series(samples: &[KraSample]) -> Vec<KraTrendPoint> {
    let mut buckets: BTreeMap<(i32, i16), (i64, i64)> = BTreeMap::new();
    for s in samples {
        let entry = buckets.entry((s.year, s.quarter)).or_insert((0, 0));
        entry.0 += s.total_activities;
        entry.1 += s.completed;
    }

    buckets
        .into_iter()
        .map(|((year, quarter), (total, completed))| KraTrendPoint {
            year,
            quarter,
            label: period_label(year, quarter),
            total_activities: total,
            completed,
            completion_pct: completion_pct(completed, total),
        })
        .collect()
}
