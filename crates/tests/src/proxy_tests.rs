use serde_json::{Value, json};

use atelier_provider::{InsightClient, InsightKind, ProviderError};

use crate::fixtures::test_app::{TestApp, test_settings};

#[tokio::test]
async fn missing_credential_means_unavailable() {
    let app = TestApp::spawn().await.unwrap();

    let resp = app
        .client
        .post(app.url("/api/insight"))
        .json(&json!({
            "type": "strategicInsight",
            "data": { "streams": [{ "label": "Spotify", "value": 50000 }] },
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status().as_u16(), 503);
    let body: Value = resp.json().await.unwrap();
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn empty_data_is_a_bad_request() {
    let mut settings = test_settings();
    settings.insight.api_key = Some("test-key".to_string());
    let app = TestApp::spawn_with(settings).await.unwrap();

    for data in [json!(null), json!({})] {
        let resp = app
            .client
            .post(app.url("/api/insight"))
            .json(&json!({ "type": "nextSteps", "data": data }))
            .send()
            .await
            .unwrap();

        assert_eq!(resp.status().as_u16(), 400);
    }
}

#[tokio::test]
async fn unknown_insight_type_is_rejected() {
    let app = TestApp::spawn().await.unwrap();

    let resp = app
        .client
        .post(app.url("/api/insight"))
        .json(&json!({ "type": "horoscope", "data": { "sign": "leo" } }))
        .send()
        .await
        .unwrap();

    assert!(resp.status().is_client_error());
}

#[tokio::test]
async fn insight_client_surfaces_proxy_errors() {
    let app = TestApp::spawn().await.unwrap();

    let client = InsightClient::new(app.address.clone());
    let err = client
        .generate(InsightKind::StrategicInsight, json!({ "revenue": [] }))
        .await
        .unwrap_err();

    assert!(matches!(err, ProviderError::Api { status: 503, .. }));
}
