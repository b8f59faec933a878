//! Runs the client against the real router served on an ephemeral port, so
//! the client-side entity shapes stay in step with what the API returns.

use std::sync::Arc;
use std::time::Duration;

use assert_matches::assert_matches;
use auditdesk_api::config::ServerConfig;
use auditdesk_api::router::build_app_router;
use auditdesk_api::state::AppState;
use auditdesk_client::models::{EngagementInput, FindingInput, RecommendationInput};
use auditdesk_client::{resource, ApiClient, ClientConfig, ClientError, Collection};
use sqlx::PgPool;
use tokio::net::TcpListener;

/// Serve the application on `127.0.0.1:0` and return a client pointed at it.
async fn serve(pool: PgPool) -> ApiClient {
    let config = ServerConfig {
        database_url: String::new(),
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: Vec::new(),
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
    };
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    let app = build_app_router(state, &config);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    ApiClient::new(&ClientConfig {
        api_url: format!("http://{addr}"),
        timeout: Duration::from_secs(10),
    })
    .unwrap()
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_engagement_collection_round_trips_through_router(pool: PgPool) {
    let api = serve(pool).await;
    let engagements = Collection::new(resource::engagements(api));

    let created = engagements
        .create(&EngagementInput {
            title: Some("Payroll review".to_string()),
            description: Some("Annual payroll controls".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(created.status, "planned");
    assert_eq!(created.engagement_type, "assurance");

    let loaded = engagements.load().await.unwrap();
    assert_eq!(loaded, vec![created.clone()]);
    assert!(engagements.is_loaded().await);

    let updated = engagements
        .update(
            created.id,
            &EngagementInput {
                status: Some("fieldwork".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.status, "fieldwork");
    assert_eq!(engagements.get(created.id).await, Some(updated));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_findings_and_recommendations_deserialize(pool: PgPool) {
    let api = serve(pool).await;
    let engagements = Collection::new(resource::engagements(api.clone()));
    let engagement = engagements
        .create(&EngagementInput {
            title: Some("Procurement audit".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();

    let findings = Collection::new(resource::engagement_findings(api.clone(), engagement.id));
    let finding = findings
        .create(&FindingInput {
            engagement_id: Some(engagement.id),
            title: Some("Split purchase orders".to_string()),
            rating: Some("high".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(findings.load().await.unwrap(), vec![finding.clone()]);

    let recommendations = Collection::new(resource::recommendations(api));
    let recommendation = recommendations
        .create(&RecommendationInput {
            finding_id: Some(finding.id),
            description: Some("Enforce a single approval threshold".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert!(!recommendation.is_published);
    assert_eq!(recommendations.load().await.unwrap(), vec![recommendation]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_api_error_envelope_is_decoded(pool: PgPool) {
    let api = serve(pool).await;
    let engagements = Collection::new(resource::engagements(api));

    let err = engagements.delete(999_999).await.unwrap_err();
    assert_matches!(err, ClientError::Api { status: 404, ref code, .. } if code == "NOT_FOUND");
    assert_eq!(
        engagements.last_error().await.and_then(|e| e.status()),
        Some(404)
    );
}
