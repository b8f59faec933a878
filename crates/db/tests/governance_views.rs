//! Integration tests for the risk, PSAP, and KRA tables and their
//! summary views.

use auditdesk_core::{kra, psap, risk, seed};
use auditdesk_db::models::kra::{CreateKra, CreateKraActivity, UpsertQuarterlyStatus};
use auditdesk_db::models::org_unit::CreateOrgUnit;
use auditdesk_db::models::psap::{CreatePsapAssessment, CreatePsapStandard, UpsertPsapScore};
use auditdesk_db::models::risk::{CreateRiskEvent, CreateRiskProfile, CreateRiskProfileItem};
use auditdesk_db::repositories::{
    KraRepo, OrgUnitRepo, PsapRepo, RiskEventRepo, RiskProfileRepo,
};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn org_unit(pool: &PgPool, code: &str) -> i64 {
    OrgUnitRepo::create(
        pool,
        &CreateOrgUnit {
            name: format!("Unit {code}"),
            code: code.to_string(),
            parent_id: None,
        },
    )
    .await
    .unwrap()
    .id
}

async fn add_item(pool: &PgPool, profile_id: i64, likelihood: i16, impact: i16, status: &str) {
    let input = CreateRiskProfileItem {
        title: format!("Risk {likelihood}x{impact}"),
        category: None,
        likelihood,
        impact,
        status: Some(status.to_string()),
    };
    let level = risk::classify_risk(likelihood, impact);
    RiskProfileRepo::create_item(pool, profile_id, &input, level)
        .await
        .unwrap();
}

fn new_event(title: &str, priority: i16) -> CreateRiskEvent {
    CreateRiskEvent {
        org_unit_id: None,
        title: title.to_string(),
        description: None,
        priority: Some(priority),
        reported_by: None,
    }
}

// ---------------------------------------------------------------------------
// Risk
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_risk_summary_uses_latest_profile(pool: PgPool) {
    let ou = org_unit(&pool, "FIN").await;

    let old = RiskProfileRepo::create(
        &pool,
        &CreateRiskProfile {
            org_unit_id: ou,
            year: 2024,
            quarter: 4,
            title: "Old".to_string(),
        },
    )
    .await
    .unwrap();
    add_item(&pool, old.id, 5, 5, "open").await;

    let current = RiskProfileRepo::create(
        &pool,
        &CreateRiskProfile {
            org_unit_id: ou,
            year: 2025,
            quarter: 1,
            title: "Current".to_string(),
        },
    )
    .await
    .unwrap();
    add_item(&pool, current.id, 4, 5, "open").await;
    add_item(&pool, current.id, 3, 4, "mitigated").await;
    add_item(&pool, current.id, 1, 2, "open").await;

    let rows = RiskProfileRepo::current_summary(&pool, 10).await.unwrap();
    assert_eq!(rows.len(), 1);
    let counts = rows[0].counts();
    assert_eq!((rows[0].year, rows[0].quarter), (2025, 1));
    assert_eq!(counts.total_risks, 3);
    assert_eq!(counts.extreme_count, 1);
    assert_eq!(counts.high_count, 1);
    assert_eq!(counts.open_count, 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duplicate_profile_period_is_unique_violation(pool: PgPool) {
    let ou = org_unit(&pool, "OPS").await;
    let input = CreateRiskProfile {
        org_unit_id: ou,
        year: 2025,
        quarter: 2,
        title: "Q2".to_string(),
    };
    RiskProfileRepo::create(&pool, &input).await.unwrap();
    let err = RiskProfileRepo::create(&pool, &input).await.unwrap_err();
    let code = auditdesk_db::error_code(&err);
    assert!(seed::is_duplicate_key(code.as_deref()));
    assert_eq!(RiskProfileRepo::list(&pool).await.unwrap().len(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_active_events_ordered_by_priority_then_recency(pool: PgPool) {
    let low = RiskEventRepo::create(&pool, &new_event("Low", 4)).await.unwrap();
    let critical_old = RiskEventRepo::create(&pool, &new_event("Critical old", 1))
        .await
        .unwrap();
    let critical_new = RiskEventRepo::create(&pool, &new_event("Critical new", 1))
        .await
        .unwrap();
    let closed = RiskEventRepo::create(&pool, &new_event("Closed", 1)).await.unwrap();
    RiskEventRepo::update_status(&pool, closed.id, risk::EVENT_PENDING, risk::EVENT_REJECTED)
        .await
        .unwrap();

    let rows = RiskEventRepo::list_by_statuses(&pool, risk::ACTIVE_EVENT_STATUSES, 10)
        .await
        .unwrap();
    let ids: Vec<i64> = rows.iter().map(|e| e.id).collect();
    assert_eq!(ids, vec![critical_new.id, critical_old.id, low.id]);

    let limited = RiskEventRepo::list_by_statuses(&pool, risk::ACTIVE_EVENT_STATUSES, 1)
        .await
        .unwrap();
    assert_eq!(limited.len(), 1);

    let rejected = RiskEventRepo::list(&pool, Some(risk::EVENT_REJECTED))
        .await
        .unwrap();
    assert_eq!(rejected.len(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_new_event_defaults_to_pending(pool: PgPool) {
    let mut input = new_event("Defaulted", 2);
    input.priority = None;
    let event = RiskEventRepo::create(&pool, &input).await.unwrap();
    assert_eq!(event.status, risk::EVENT_PENDING);
    assert_eq!(event.priority, risk::PRIORITY_MEDIUM);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_stale_status_transition_is_not_applied(pool: PgPool) {
    let event = RiskEventRepo::create(&pool, &new_event("Raced", 2)).await.unwrap();
    let rejected = RiskEventRepo::update_status(
        &pool,
        event.id,
        risk::EVENT_PENDING,
        risk::EVENT_REJECTED,
    )
    .await
    .unwrap();
    assert!(rejected.is_some());

    // Validated against the old `pending` status, so it must not apply.
    let stale = RiskEventRepo::update_status(
        &pool,
        event.id,
        risk::EVENT_PENDING,
        risk::EVENT_UNDER_REVIEW,
    )
    .await
    .unwrap();
    assert!(stale.is_none());

    let stored = RiskEventRepo::find_by_id(&pool, event.id).await.unwrap().unwrap();
    assert_eq!(stored.status, risk::EVENT_REJECTED);
}

// ---------------------------------------------------------------------------
// PSAP
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_psap_trigger_weights_scores(pool: PgPool) {
    let ou = org_unit(&pool, "HR").await;
    let s1 = PsapRepo::create_standard(
        &pool,
        &CreatePsapStandard {
            code: "S1".to_string(),
            title: "Independence".to_string(),
            weight: 10.0,
        },
    )
    .await
    .unwrap();
    let s2 = PsapRepo::create_standard(
        &pool,
        &CreatePsapStandard {
            code: "S2".to_string(),
            title: "Proficiency".to_string(),
            weight: 10.0,
        },
    )
    .await
    .unwrap();
    let a = PsapRepo::create_assessment(
        &pool,
        &CreatePsapAssessment {
            org_unit_id: ou,
            year: 2025,
            quarter: 1,
            assessed_by: None,
            status: None,
        },
    )
    .await
    .unwrap();
    assert_eq!(a.status, psap::ASSESSMENT_DRAFT);

    let score = |standard_id, score| UpsertPsapScore {
        standard_id,
        score,
        comment: None,
    };
    let row = PsapRepo::upsert_score(&pool, a.id, &score(s1.id, 8.0)).await.unwrap();
    assert_eq!(row.weighted_score, psap::weighted_score(8.0, 10.0));
    PsapRepo::upsert_score(&pool, a.id, &score(s2.id, 7.0)).await.unwrap();

    // Re-scoring replaces the previous row.
    PsapRepo::upsert_score(&pool, a.id, &score(s1.id, 9.0)).await.unwrap();
    assert_eq!(PsapRepo::list_scores(&pool, a.id).await.unwrap().len(), 2);

    let ratings = PsapRepo::latest_ratings(&pool).await.unwrap();
    assert_eq!(ratings.len(), 1);
    assert_eq!(ratings[0].weighted_total, 16.0);
    assert_eq!(psap::rate(ratings[0].weighted_total).overall_pct, 80.0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_psap_total_above_cap_rejected(pool: PgPool) {
    let ou = org_unit(&pool, "IT").await;
    let mut standards = Vec::new();
    for code in ["A", "B", "C"] {
        let s = PsapRepo::create_standard(
            &pool,
            &CreatePsapStandard {
                code: code.to_string(),
                title: code.to_string(),
                weight: 10.0,
            },
        )
        .await
        .unwrap();
        standards.push(s.id);
    }
    let a = PsapRepo::create_assessment(
        &pool,
        &CreatePsapAssessment {
            org_unit_id: ou,
            year: 2025,
            quarter: 2,
            assessed_by: None,
            status: None,
        },
    )
    .await
    .unwrap();

    for id in &standards[..2] {
        PsapRepo::upsert_score(
            &pool,
            a.id,
            &UpsertPsapScore {
                standard_id: *id,
                score: 10.0,
                comment: None,
            },
        )
        .await
        .unwrap();
    }
    let err = PsapRepo::upsert_score(
        &pool,
        a.id,
        &UpsertPsapScore {
            standard_id: standards[2],
            score: 1.0,
            comment: None,
        },
    )
    .await
    .unwrap_err();
    assert_eq!(auditdesk_db::error_code(&err).as_deref(), Some("P0001"));
}

/// A score written while another transaction holds an uncommitted sibling
/// score waits for it, then sees it when checking the cap.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_psap_cap_holds_across_concurrent_writers(pool: PgPool) {
    let ou = org_unit(&pool, "AUD").await;
    let mut standards = Vec::new();
    for code in ["X", "Y"] {
        let s = PsapRepo::create_standard(
            &pool,
            &CreatePsapStandard {
                code: code.to_string(),
                title: code.to_string(),
                weight: 12.0,
            },
        )
        .await
        .unwrap();
        standards.push(s.id);
    }
    let a = PsapRepo::create_assessment(
        &pool,
        &CreatePsapAssessment {
            org_unit_id: ou,
            year: 2025,
            quarter: 4,
            assessed_by: None,
            status: None,
        },
    )
    .await
    .unwrap();

    let mut tx = pool.begin().await.unwrap();
    sqlx::query(
        "INSERT INTO psap_assessment_scores (assessment_id, standard_id, score)
         VALUES ($1, $2, 10)",
    )
    .bind(a.id)
    .bind(standards[0])
    .execute(&mut *tx)
    .await
    .unwrap();

    let assessment_id = a.id;
    let second = tokio::spawn({
        let pool = pool.clone();
        let input = UpsertPsapScore {
            standard_id: standards[1],
            score: 10.0,
            comment: None,
        };
        async move { PsapRepo::upsert_score(&pool, assessment_id, &input).await }
    });
    tokio::time::sleep(std::time::Duration::from_millis(200)).await;
    assert!(!second.is_finished(), "second writer should wait on the assessment lock");

    tx.commit().await.unwrap();
    let err = second.await.unwrap().unwrap_err();
    assert_eq!(auditdesk_db::error_code(&err).as_deref(), Some("P0001"));

    let ratings = PsapRepo::latest_ratings(&pool).await.unwrap();
    assert_eq!(ratings[0].weighted_total, 12.0);
}

// ---------------------------------------------------------------------------
// KRA
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_kra_summary_counts_statuses(pool: PgPool) {
    let k = KraRepo::create(
        &pool,
        &CreateKra {
            code: "KRA-1".to_string(),
            title: "Strengthen assurance".to_string(),
            org_unit_id: None,
            year: 2025,
        },
    )
    .await
    .unwrap();

    let statuses = [
        kra::STATUS_COMPLETED,
        kra::STATUS_COMPLETED,
        kra::STATUS_ONGOING,
        kra::STATUS_NOT_STARTED,
    ];
    for (i, status) in statuses.iter().enumerate() {
        let activity = KraRepo::create_activity(
            &pool,
            k.id,
            &CreateKraActivity {
                title: format!("Activity {i}"),
                owner_id: None,
                target: None,
            },
        )
        .await
        .unwrap();
        KraRepo::upsert_quarterly_status(
            &pool,
            activity.id,
            &UpsertQuarterlyStatus {
                year: 2025,
                quarter: 1,
                status: status.to_string(),
                remarks: None,
            },
        )
        .await
        .unwrap();
    }

    let rows = KraRepo::status_summary_for_period(&pool, 2025, 1).await.unwrap();
    assert_eq!(rows.len(), 1);
    let counts = rows[0].counts();
    assert_eq!(counts.total_activities, 4);
    assert_eq!(counts.completed, 2);
    assert_eq!(counts.ongoing, 1);
    assert_eq!(counts.not_started, 1);
    assert_eq!(counts.completion_pct(), 50);

    assert!(KraRepo::status_summary_for_period(&pool, 2025, 2)
        .await
        .unwrap()
        .is_empty());
    assert_eq!(
        KraRepo::status_summary_history(&pool, Some(k.id)).await.unwrap().len(),
        1
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duplicate_quarterly_status_insert_conflicts(pool: PgPool) {
    let k = KraRepo::create(
        &pool,
        &CreateKra {
            code: "KRA-2".to_string(),
            title: "Digitize".to_string(),
            org_unit_id: None,
            year: 2025,
        },
    )
    .await
    .unwrap();
    let activity = KraRepo::create_activity(
        &pool,
        k.id,
        &CreateKraActivity {
            title: "Roll out e-filing".to_string(),
            owner_id: None,
            target: None,
        },
    )
    .await
    .unwrap();
    let input = UpsertQuarterlyStatus {
        year: 2025,
        quarter: 3,
        status: kra::STATUS_DELAYED.to_string(),
        remarks: None,
    };
    KraRepo::insert_quarterly_status(&pool, activity.id, &input)
        .await
        .unwrap();
    let err = KraRepo::insert_quarterly_status(&pool, activity.id, &input)
        .await
        .unwrap_err();
    assert!(seed::is_duplicate_key(auditdesk_db::error_code(&err).as_deref()));
    assert_eq!(
        KraRepo::list_quarterly_statuses(&pool, activity.id)
            .await
            .unwrap()
            .len(),
        1
    );
}
