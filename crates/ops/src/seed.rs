//! Demo data seeding.
//!
//! Every step inserts row by row. A duplicate-key failure means the row is
//! already there: it is counted as a skip and the existing row is looked up
//! so dependent steps can continue. Any other failure stops the run; rows
//! written by earlier steps stay in place.

use std::collections::HashMap;
use std::future::Future;

use auditdesk_core::seed::{self, SeedOutcome, SeedReport};
use auditdesk_core::types::DbId;
use auditdesk_core::{kra, psap};
use auditdesk_db::models::kra::{CreateKra, CreateKraActivity, UpsertQuarterlyStatus};
use auditdesk_db::models::org_unit::CreateOrgUnit;
use auditdesk_db::models::person::CreatePerson;
use auditdesk_db::models::psap::{CreatePsapAssessment, CreatePsapStandard, PsapStandard, UpsertPsapScore};
use auditdesk_db::repositories::{KraRepo, OrgUnitRepo, PersonRepo, PsapRepo};
use rand::Rng;
use sqlx::PgPool;

#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("Seed step '{step}' failed on '{label}': {source}")]
    Insert {
        step: String,
        label: String,
        #[source]
        source: sqlx::Error,
    },

    #[error("Seed step '{step}' skipped '{label}' as a duplicate but could not find the existing row")]
    MissingExisting { step: String, label: String },

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

// ---------------------------------------------------------------------------
// Fixed demo data
// ---------------------------------------------------------------------------

/// `(name, code)`
const ORG_UNITS: &[(&str, &str)] = &[
    ("Internal Audit", "IA"),
    ("Finance", "FIN"),
    ("Operations", "OPS"),
    ("Human Resources", "HR"),
];

/// `(full_name, email, title, org unit code)`
const PEOPLE: &[(&str, &str, &str, &str)] = &[
    ("Amara Okafor", "amara.okafor@example.org", "Chief Audit Executive", "IA"),
    ("Daniel Mensah", "daniel.mensah@example.org", "Senior Auditor", "IA"),
    ("Lerato Dlamini", "lerato.dlamini@example.org", "Finance Manager", "FIN"),
    ("Kofi Asante", "kofi.asante@example.org", "Operations Lead", "OPS"),
    ("Nadia Haddad", "nadia.haddad@example.org", "HR Business Partner", "HR"),
];

/// `(code, title, weight)`. Weights sum to the weighted-total cap.
const PSAP_STANDARDS: &[(&str, &str, f64)] = &[
    ("PSAP-01", "Governance and Leadership", 4.0),
    ("PSAP-02", "Risk Management", 4.0),
    ("PSAP-03", "Internal Control", 4.0),
    ("PSAP-04", "Financial Management", 4.0),
    ("PSAP-05", "Reporting and Accountability", 4.0),
];

/// Baseline PSAP score per org unit before jitter.
const PSAP_BASELINES: &[(&str, f64)] = &[("IA", 9.0), ("FIN", 8.0), ("OPS", 6.5), ("HR", 5.0)];

const PSAP_SPREAD: f64 = 1.5;

struct KraSeed {
    code: &'static str,
    title: &'static str,
    org_unit: &'static str,
    activities: &'static [&'static str],
}

const KRAS: &[KraSeed] = &[
    KraSeed {
        code: "KRA-1",
        title: "Strengthen governance and oversight",
        org_unit: "IA",
        activities: &[
            "Deliver risk-based annual audit plan",
            "Report quarterly to the audit committee",
            "Track implementation of audit recommendations",
        ],
    },
    KraSeed {
        code: "KRA-2",
        title: "Improve financial sustainability",
        org_unit: "FIN",
        activities: &[
            "Close monthly accounts within ten days",
            "Reduce overdue receivables",
        ],
    },
    KraSeed {
        code: "KRA-3",
        title: "Build organisational capability",
        org_unit: "HR",
        activities: &[
            "Roll out competency framework",
            "Complete staff performance reviews",
        ],
    },
];

const QUARTERS: [i16; 4] = [1, 2, 3, 4];

// ---------------------------------------------------------------------------
// Runner
// ---------------------------------------------------------------------------

/// Run every seeding step in order and return one report per step.
pub async fn run<R: Rng>(
    pool: &PgPool,
    year: i32,
    rng: &mut R,
) -> Result<Vec<SeedReport>, SeedError> {
    let mut reports = Vec::new();

    let (report, org_units) = seed_org_units(pool).await?;
    reports.push(report);

    reports.push(seed_people(pool, &org_units).await?);

    let (report, standards) = seed_psap_standards(pool).await?;
    reports.push(report);

    let (report, activities) = seed_kras(pool, year, &org_units).await?;
    reports.push(report);

    reports.push(seed_psap_scores(pool, year, &org_units, &standards, rng).await?);
    reports.push(seed_kra_statuses(pool, year, &activities, rng).await?);

    Ok(reports)
}

/// Await an insert, turning a duplicate-key failure into a recorded skip.
async fn insert_or_skip<T, F>(
    report: &mut SeedReport,
    label: &str,
    insert: F,
) -> Result<Option<T>, SeedError>
where
    F: Future<Output = Result<T, sqlx::Error>>,
{
    match insert.await {
        Ok(row) => {
            report.record(SeedOutcome::Inserted);
            tracing::debug!(step = %report.step, label, "Inserted");
            Ok(Some(row))
        }
        Err(err) if seed::is_duplicate_key(auditdesk_db::error_code(&err).as_deref()) => {
            report.record(SeedOutcome::Skipped);
            tracing::info!(step = %report.step, label, "Already exists, skipping");
            Ok(None)
        }
        Err(source) => Err(SeedError::Insert {
            step: report.step.clone(),
            label: label.to_string(),
            source,
        }),
    }
}

fn missing(report: &SeedReport, label: &str) -> SeedError {
    SeedError::MissingExisting {
        step: report.step.clone(),
        label: label.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Steps
// ---------------------------------------------------------------------------

async fn seed_org_units(pool: &PgPool) -> Result<(SeedReport, HashMap<&'static str, DbId>), SeedError> {
    let mut report = SeedReport::new("org_units");
    let mut ids = HashMap::new();

    for &(name, code) in ORG_UNITS {
        let input = CreateOrgUnit {
            name: name.to_string(),
            code: code.to_string(),
            parent_id: None,
        };
        let id = match insert_or_skip(&mut report, code, OrgUnitRepo::create(pool, &input)).await? {
            Some(unit) => unit.id,
            None => {
                OrgUnitRepo::find_by_code(pool, code)
                    .await?
                    .ok_or_else(|| missing(&report, code))?
                    .id
            }
        };
        ids.insert(code, id);
    }

    Ok((report, ids))
}

async fn seed_people(
    pool: &PgPool,
    org_units: &HashMap<&'static str, DbId>,
) -> Result<SeedReport, SeedError> {
    let mut report = SeedReport::new("people");

    for &(full_name, email, title, unit) in PEOPLE {
        let input = CreatePerson {
            full_name: full_name.to_string(),
            email: email.to_string(),
            title: Some(title.to_string()),
            org_unit_id: org_units.get(unit).copied(),
        };
        insert_or_skip(&mut report, email, PersonRepo::create(pool, &input)).await?;
    }

    Ok(report)
}

async fn seed_psap_standards(pool: &PgPool) -> Result<(SeedReport, Vec<PsapStandard>), SeedError> {
    let mut report = SeedReport::new("psap_standards");

    for &(code, title, weight) in PSAP_STANDARDS {
        let input = CreatePsapStandard {
            code: code.to_string(),
            title: title.to_string(),
            weight,
        };
        insert_or_skip(&mut report, code, PsapRepo::create_standard(pool, &input)).await?;
    }

    let standards = PsapRepo::list_standards(pool)
        .await?
        .into_iter()
        .filter(|s| PSAP_STANDARDS.iter().any(|(code, _, _)| *code == s.code))
        .collect();

    Ok((report, standards))
}

/// Seed KRAs and their activities, returning every activity id.
async fn seed_kras(
    pool: &PgPool,
    year: i32,
    org_units: &HashMap<&'static str, DbId>,
) -> Result<(SeedReport, Vec<DbId>), SeedError> {
    let mut report = SeedReport::new("kras");
    let mut activity_ids = Vec::new();

    for kra_seed in KRAS {
        let input = CreateKra {
            code: kra_seed.code.to_string(),
            title: kra_seed.title.to_string(),
            org_unit_id: org_units.get(kra_seed.org_unit).copied(),
            year,
        };
        let kra_id = match insert_or_skip(&mut report, kra_seed.code, KraRepo::create(pool, &input)).await? {
            Some(kra) => kra.id,
            None => {
                KraRepo::find_by_code(pool, kra_seed.code)
                    .await?
                    .ok_or_else(|| missing(&report, kra_seed.code))?
                    .id
            }
        };

        for &title in kra_seed.activities {
            let input = CreateKraActivity {
                title: title.to_string(),
                owner_id: None,
                target: None,
            };
            let activity_id =
                match insert_or_skip(&mut report, title, KraRepo::create_activity(pool, kra_id, &input))
                    .await?
                {
                    Some(activity) => activity.id,
                    None => {
                        KraRepo::find_activity_by_title(pool, kra_id, title)
                            .await?
                            .ok_or_else(|| missing(&report, title))?
                            .id
                    }
                };
            activity_ids.push(activity_id);
        }
    }

    Ok((report, activity_ids))
}

/// One submitted assessment per org unit and quarter, scored with jitter.
async fn seed_psap_scores<R: Rng>(
    pool: &PgPool,
    year: i32,
    org_units: &HashMap<&'static str, DbId>,
    standards: &[PsapStandard],
    rng: &mut R,
) -> Result<SeedReport, SeedError> {
    let mut report = SeedReport::new("psap_scores");

    for &(unit, baseline) in PSAP_BASELINES {
        let Some(&org_unit_id) = org_units.get(unit) else {
            continue;
        };

        for quarter in QUARTERS {
            let label = format!("{unit} {year} Q{quarter}");
            let input = CreatePsapAssessment {
                org_unit_id,
                year,
                quarter,
                assessed_by: None,
                status: Some(psap::ASSESSMENT_SUBMITTED.to_string()),
            };
            let assessment_id =
                match insert_or_skip(&mut report, &label, PsapRepo::create_assessment(pool, &input))
                    .await?
                {
                    Some(assessment) => assessment.id,
                    None => {
                        PsapRepo::find_assessment_for_period(pool, org_unit_id, year, quarter)
                            .await?
                            .ok_or_else(|| missing(&report, &label))?
                            .id
                    }
                };

            // Later quarters drift upward so the trend chart has a slope.
            let base = baseline + 0.25 * f64::from(quarter - 1);
            for standard in standards {
                let score = UpsertPsapScore {
                    standard_id: standard.id,
                    score: seed::jitter_score(rng, base, PSAP_SPREAD),
                    comment: None,
                };
                let score_label = format!("{label} {}", standard.code);
                insert_or_skip(
                    &mut report,
                    &score_label,
                    PsapRepo::insert_score(pool, assessment_id, &score),
                )
                .await?;
            }
        }
    }

    Ok(report)
}

async fn seed_kra_statuses<R: Rng>(
    pool: &PgPool,
    year: i32,
    activity_ids: &[DbId],
    rng: &mut R,
) -> Result<SeedReport, SeedError> {
    let mut report = SeedReport::new("kra_quarterly_statuses");

    for &activity_id in activity_ids {
        for quarter in QUARTERS {
            let status = seed::random_activity_status(rng, quarter);
            let input = UpsertQuarterlyStatus {
                year,
                quarter,
                status: status.to_string(),
                remarks: (status == kra::STATUS_DELAYED)
                    .then(|| "Awaiting resources".to_string()),
            };
            let label = format!("activity {activity_id} {year} Q{quarter}");
            insert_or_skip(
                &mut report,
                &label,
                KraRepo::insert_quarterly_status(pool, activity_id, &input),
            )
            .await?;
        }
    }

    Ok(report)
}

/// Number of rows each fixed step writes on an empty database.
pub fn expected_fixed_rows() -> usize {
    ORG_UNITS.len()
        + PEOPLE.len()
        + PSAP_STANDARDS.len()
        + KRAS.iter().map(|k| 1 + k.activities.len()).sum::<usize>()
}
