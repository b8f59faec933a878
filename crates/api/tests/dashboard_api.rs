//! HTTP-level tests for risk, PSAP, and KRA resources and the dashboard
//! widgets and trends built on them.

mod common;

use axum::http::StatusCode;
use common::{body_json, create, get, post_json, put_json};
use serde_json::{json, Value};
use sqlx::PgPool;

async fn org_unit(pool: &PgPool, code: &str) -> i64 {
    let ou = create(
        pool,
        "/api/v1/org-units",
        json!({"name": format!("Unit {code}"), "code": code}),
    )
    .await;
    ou["id"].as_i64().unwrap()
}

async fn fetch(pool: &PgPool, uri: &str) -> Value {
    let response = get(common::build_test_app(pool.clone()), uri).await;
    assert_eq!(response.status(), StatusCode::OK, "GET {uri} failed");
    body_json(response).await
}

// ---------------------------------------------------------------------------
// Risk
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_risk_item_level_is_classified(pool: PgPool) {
    let ou = org_unit(&pool, "FIN").await;
    let profile = create(
        &pool,
        "/api/v1/risk-profiles",
        json!({"org_unit_id": ou, "year": 2025, "quarter": 1, "title": "Q1 risks"}),
    )
    .await;
    let pid = profile["id"].as_i64().unwrap();

    let item = create(
        &pool,
        &format!("/api/v1/risk-profiles/{pid}/items"),
        json!({"title": "Fraud", "likelihood": 4, "impact": 5}),
    )
    .await;
    assert_eq!(item["risk_level"], "Extreme");
    assert_eq!(item["status"], "open");

    let response = post_json(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/risk-profiles/{pid}/items"),
        json!({"title": "Bad", "likelihood": 6, "impact": 1}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let detail = fetch(&pool, &format!("/api/v1/risk-profiles/{pid}")).await;
    assert_eq!(detail["title"], "Q1 risks");
    assert_eq!(detail["items"].as_array().unwrap().len(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_risk_profile_widget_totals(pool: PgPool) {
    for (code, items) in [("A", vec![(5, 5), (3, 4)]), ("B", vec![(4, 5), (1, 1)])] {
        let ou = org_unit(&pool, code).await;
        let profile = create(
            &pool,
            "/api/v1/risk-profiles",
            json!({"org_unit_id": ou, "year": 2025, "quarter": 2, "title": code}),
        )
        .await;
        for (l, i) in items {
            create(
                &pool,
                &format!("/api/v1/risk-profiles/{}/items", profile["id"]),
                json!({"title": format!("{l}x{i}"), "likelihood": l, "impact": i}),
            )
            .await;
        }
    }

    let json = fetch(&pool, "/api/v1/dashboard/widgets/risk-profile").await;
    let data = &json["data"];
    assert_eq!(data["rows"].as_array().unwrap().len(), 2);
    assert_eq!(data["totals"]["total_risks"], 4);
    assert_eq!(data["totals"]["extreme_count"], 2);
    assert_eq!(data["totals"]["high_count"], 1);
    assert_eq!(data["totals"]["open_count"], 4);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_risk_event_workflow_and_pending_widget(pool: PgPool) {
    let low = create(
        &pool,
        "/api/v1/risk-events",
        json!({"title": "Late report", "priority": 4}),
    )
    .await;
    let critical = create(
        &pool,
        "/api/v1/risk-events",
        json!({"title": "System breach", "priority": 1}),
    )
    .await;
    assert_eq!(critical["status"], "pending");
    let critical_id = critical["id"].as_i64().unwrap();

    // pending -> approved skips review.
    let response = put_json(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/risk-events/{critical_id}/status"),
        json!({"status": "approved"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = put_json(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/risk-events/{critical_id}/status"),
        json!({"status": "under_review"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = fetch(&pool, "/api/v1/dashboard/widgets/pending-risk-events").await;
    let data = json["data"].as_array().unwrap();
    assert_eq!(data.len(), 2);
    assert_eq!(data[0]["id"], critical["id"]);
    assert_eq!(data[0]["priority_label"], "critical");
    assert_eq!(data[1]["id"], low["id"]);

    let json = fetch(&pool, "/api/v1/dashboard/widgets/pending-risk-events?limit=1").await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);

    let json = fetch(&pool, "/api/v1/risk-events?status=under_review").await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_racing_status_changes_apply_once(pool: PgPool) {
    let event = create(
        &pool,
        "/api/v1/risk-events",
        json!({"title": "Duplicate payment", "priority": 2}),
    )
    .await;
    let uri = format!("/api/v1/risk-events/{}/status", event["id"]);

    let (first, second) = tokio::join!(
        put_json(
            common::build_test_app(pool.clone()),
            &uri,
            json!({"status": "rejected"}),
        ),
        put_json(
            common::build_test_app(pool.clone()),
            &uri,
            json!({"status": "rejected"}),
        ),
    );
    let statuses = [first.status(), second.status()];
    assert_eq!(statuses.iter().filter(|s| **s == StatusCode::OK).count(), 1);
    // The loser either saw the new status (400) or lost the conditional write (409).
    assert!(statuses
        .iter()
        .any(|s| *s == StatusCode::BAD_REQUEST || *s == StatusCode::CONFLICT));

    let json = fetch(&pool, "/api/v1/risk-events?status=rejected").await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_risk_event_priority_out_of_range_returns_400(pool: PgPool) {
    let response = post_json(
        common::build_test_app(pool),
        "/api/v1/risk-events",
        json!({"title": "Bad", "priority": 9}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// PSAP
// ---------------------------------------------------------------------------

async fn psap_assessment(pool: &PgPool, ou: i64, year: i32, quarter: i16) -> i64 {
    let a = create(
        pool,
        "/api/v1/psap/assessments",
        json!({"org_unit_id": ou, "year": year, "quarter": quarter}),
    )
    .await;
    a["id"].as_i64().unwrap()
}

async fn score(pool: &PgPool, assessment: i64, standard: i64, value: f64) -> StatusCode {
    put_json(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/psap/assessments/{assessment}/scores"),
        json!({"standard_id": standard, "score": value}),
    )
    .await
    .status()
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_psap_scoring_ratings_and_trend(pool: PgPool) {
    let ou = org_unit(&pool, "HR").await;
    let s1 = create(
        &pool,
        "/api/v1/psap/standards",
        json!({"code": "S1", "title": "Independence", "weight": 10.0}),
    )
    .await["id"]
        .as_i64()
        .unwrap();
    let s2 = create(
        &pool,
        "/api/v1/psap/standards",
        json!({"code": "S2", "title": "Proficiency", "weight": 10.0}),
    )
    .await["id"]
        .as_i64()
        .unwrap();

    let q1 = psap_assessment(&pool, ou, 2025, 1).await;
    assert_eq!(score(&pool, q1, s1, 5.0).await, StatusCode::OK);
    assert_eq!(score(&pool, q1, s2, 5.0).await, StatusCode::OK);

    let q2 = psap_assessment(&pool, ou, 2025, 2).await;
    assert_eq!(score(&pool, q2, s1, 9.0).await, StatusCode::OK);
    assert_eq!(score(&pool, q2, s2, 9.5).await, StatusCode::OK);

    // Score outside 0..=10 is rejected before reaching the store.
    assert_eq!(score(&pool, q2, s1, 11.0).await, StatusCode::BAD_REQUEST);

    // An unscored draft stays off the trend.
    psap_assessment(&pool, ou, 2024, 4).await;

    let json = fetch(&pool, "/api/v1/psap/ratings").await;
    let latest = &json["data"][0];
    assert_eq!(latest["quarter"], 2);
    assert_eq!(latest["weighted_total"], 18.5);
    assert_eq!(latest["overall_pct"], 92.5);
    assert_eq!(latest["rating"], "Full");

    let json = fetch(&pool, &format!("/api/v1/dashboard/trends/psap?org_unit_id={ou}")).await;
    let points = json["data"].as_array().unwrap();
    assert_eq!(points.len(), 2);
    assert_eq!(points[0]["label"], "2025 Q1");
    assert_eq!(points[0]["overall_pct"], 50.0);
    assert_eq!(points[0]["rating"], "Partial");
    assert_eq!(points[1]["label"], "2025 Q2");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_psap_weighted_total_cap_returns_400(pool: PgPool) {
    let ou = org_unit(&pool, "IT").await;
    let mut standards = Vec::new();
    for code in ["A", "B", "C"] {
        let s = create(
            &pool,
            "/api/v1/psap/standards",
            json!({"code": code, "title": code, "weight": 10.0}),
        )
        .await;
        standards.push(s["id"].as_i64().unwrap());
    }
    let a = psap_assessment(&pool, ou, 2025, 3).await;
    assert_eq!(score(&pool, a, standards[0], 10.0).await, StatusCode::OK);
    assert_eq!(score(&pool, a, standards[1], 10.0).await, StatusCode::OK);
    assert_eq!(score(&pool, a, standards[2], 2.0).await, StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_concurrent_scores_cannot_breach_cap(pool: PgPool) {
    let ou = org_unit(&pool, "FIN").await;
    let mut standards = Vec::new();
    for code in ["P", "Q"] {
        let s = create(
            &pool,
            "/api/v1/psap/standards",
            json!({"code": code, "title": code, "weight": 12.0}),
        )
        .await;
        standards.push(s["id"].as_i64().unwrap());
    }
    let a = psap_assessment(&pool, ou, 2025, 4).await;

    let (first, second) = tokio::join!(
        score(&pool, a, standards[0], 10.0),
        score(&pool, a, standards[1], 10.0),
    );
    let mut statuses = vec![first, second];
    statuses.sort();
    assert_eq!(statuses, vec![StatusCode::OK, StatusCode::BAD_REQUEST]);

    let json = fetch(&pool, "/api/v1/psap/ratings").await;
    assert_eq!(json["data"][0]["weighted_total"], 12.0);
}

// ---------------------------------------------------------------------------
// KRA
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_kra_completion_widget_and_trend(pool: PgPool) {
    let kra = create(
        &pool,
        "/api/v1/kras",
        json!({"code": "KRA-1", "title": "Assurance coverage", "year": 2025}),
    )
    .await;
    let kra_id = kra["id"].as_i64().unwrap();

    let q1 = ["Completed", "Completed", "Completed", "Ongoing"];
    let q2 = ["Completed", "Delayed", "Not Started", "Not Started"];
    for (i, (s1, s2)) in q1.iter().zip(q2.iter()).enumerate() {
        let activity = create(
            &pool,
            &format!("/api/v1/kras/{kra_id}/activities"),
            json!({"title": format!("Activity {i}")}),
        )
        .await;
        let aid = activity["id"].as_i64().unwrap();
        for (quarter, status) in [(1, s1), (2, s2)] {
            let response = put_json(
                common::build_test_app(pool.clone()),
                &format!("/api/v1/kra-activities/{aid}/quarters"),
                json!({"year": 2025, "quarter": quarter, "status": status}),
            )
            .await;
            assert_eq!(response.status(), StatusCode::OK);
        }
    }

    let json = fetch(&pool, "/api/v1/dashboard/widgets/kra-completion?year=2025&quarter=1").await;
    let data = &json["data"];
    assert_eq!(data["totals"]["total_activities"], 4);
    assert_eq!(data["totals"]["completed"], 3);
    assert_eq!(data["totals"]["completion_pct"], 75);
    assert_eq!(data["rows"][0]["kra_code"], "KRA-1");

    let json = fetch(&pool, "/api/v1/dashboard/widgets/kra-completion?year=2030&quarter=1").await;
    assert_eq!(json["data"]["totals"]["completion_pct"], 0);
    assert!(json["data"]["rows"].as_array().unwrap().is_empty());

    let json = fetch(&pool, &format!("/api/v1/dashboard/trends/kra?kra_id={kra_id}")).await;
    let points = json["data"].as_array().unwrap();
    assert_eq!(points.len(), 2);
    assert_eq!(points[0]["completion_pct"], 75);
    assert_eq!(points[1]["completion_pct"], 25);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_invalid_quarterly_status_returns_400(pool: PgPool) {
    let kra = create(
        &pool,
        "/api/v1/kras",
        json!({"code": "KRA-9", "title": "Misc", "year": 2025}),
    )
    .await;
    let activity = create(
        &pool,
        &format!("/api/v1/kras/{}/activities", kra["id"]),
        json!({"title": "Something"}),
    )
    .await;
    let response = put_json(
        common::build_test_app(pool),
        &format!("/api/v1/kra-activities/{}/quarters", activity["id"]),
        json!({"year": 2025, "quarter": 5, "status": "Completed"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Notifications
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_notifications_mark_read(pool: PgPool) {
    let person = create(
        &pool,
        "/api/v1/people",
        json!({"full_name": "Alex Auditor", "email": "alex@example.test"}),
    )
    .await;
    let person_id = person["id"].as_i64().unwrap();
    let (id,): (i64,) = sqlx::query_as(
        "INSERT INTO notifications (person_id, title) VALUES ($1, 'Action plan overdue') RETURNING id",
    )
    .bind(person_id)
    .fetch_one(&pool)
    .await
    .unwrap();

    let json = fetch(
        &pool,
        &format!("/api/v1/notifications?person_id={person_id}&unread_only=true"),
    )
    .await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);

    let response = post_json(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/notifications/{id}/read"),
        json!({}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["is_read"], true);

    let json = fetch(
        &pool,
        &format!("/api/v1/notifications?person_id={person_id}&unread_only=true"),
    )
    .await;
    assert!(json["data"].as_array().unwrap().is_empty());
}
