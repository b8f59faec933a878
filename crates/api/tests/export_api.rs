//! HTTP-level tests for CSV export.

mod common;

use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::http::StatusCode;
use common::{body_json, body_text, create, get};
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_engagement_export_is_csv_attachment(pool: PgPool) {
    create(
        &pool,
        "/api/v1/engagements",
        json!({"title": "Cash, cheques and \"petty\" funds"}),
    )
    .await;

    let response = get(
        common::build_test_app(pool),
        "/api/v1/exports/engagements?format=csv",
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[CONTENT_TYPE],
        "text/csv; charset=utf-8"
    );
    let disposition = response.headers()[CONTENT_DISPOSITION].to_str().unwrap().to_string();
    assert!(disposition.starts_with("attachment; filename=\"Engagements_"));
    assert!(disposition.ends_with(".csv\""));

    let body = body_text(response).await;
    let mut lines = body.split('\n');
    let header = lines.next().unwrap();
    assert!(header.starts_with("id,title,engagement_type,status"));
    let row = lines.next().unwrap();
    assert!(row.contains("\"Cash, cheques and \"\"petty\"\" funds\""));
    assert!(lines.next().is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_empty_export_returns_400_without_attachment(pool: PgPool) {
    let response = get(common::build_test_app(pool), "/api/v1/exports/findings").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(response.headers().get(CONTENT_DISPOSITION).is_none());
    let json = body_json(response).await;
    assert_eq!(json["error"], "No data to export");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_pdf_export_returns_501(pool: PgPool) {
    create(&pool, "/api/v1/engagements", json!({"title": "Any"})).await;
    let response = get(
        common::build_test_app(pool),
        "/api/v1/exports/engagements?format=pdf",
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_IMPLEMENTED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_unknown_dataset_returns_400(pool: PgPool) {
    let response = get(common::build_test_app(pool), "/api/v1/exports/salaries").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
