use std::collections::HashSet;

use auditdesk_core::schema::{self, RelationStatus};
use auditdesk_db::repositories::SchemaRepo;
use sqlx::PgPool;

/// Full bootstrap: migrate, health check, and every expected relation exists.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_full_bootstrap(pool: PgPool) {
    auditdesk_db::health_check(&pool).await.unwrap();

    let present = SchemaRepo::public_relations(&pool).await.unwrap();
    let checks = schema::classify_catalog(&present);
    for check in &checks {
        assert_eq!(
            check.status,
            RelationStatus::Exists,
            "{} should exist after migrations",
            check.name
        );
    }
    assert!(schema::summarize(&checks).is_complete());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_probe_existing_relation(pool: PgPool) {
    SchemaRepo::probe(&pool, "v_kra_status_summary").await.unwrap();
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_probe_missing_relation_is_undefined_table(pool: PgPool) {
    let err = SchemaRepo::probe(&pool, "no_such_table").await.unwrap_err();
    let code = auditdesk_db::error_code(&err);
    assert_eq!(code.as_deref(), Some(schema::UNDEFINED_TABLE));
    assert_eq!(
        schema::classify_probe_error(code.as_deref(), &err.to_string()),
        RelationStatus::NotFound
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_catalog_excludes_missing(pool: PgPool) {
    sqlx::query("DROP VIEW v_latest_psap_ratings")
        .execute(&pool)
        .await
        .unwrap();

    let present: HashSet<String> = SchemaRepo::public_relations(&pool).await.unwrap();
    assert!(!present.contains("v_latest_psap_ratings"));
    assert!(present.contains("psap_assessments"));

    let summary = schema::summarize(&schema::classify_catalog(&present));
    assert_eq!(summary.not_found, 1);
}
