//! Poller-backed wait helpers against a wiremock status endpoint.

use std::sync::Arc;
use std::time::Duration;

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use watson_sdk::auth::NoAuth;
use watson_sdk::config::ServiceConfig;
use watson_sdk::poll::PollPolicy;
use watson_sdk::services::discovery::DiscoveryClient;
use watson_sdk::services::speech_to_text::SpeechToTextClient;

fn fast_policy() -> PollPolicy {
    PollPolicy::new().with_interval(Duration::from_millis(10))
}

#[tokio::test]
async fn environment_wait_reaches_success_after_three_checks() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/environments/env-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "environment_id": "env-1",
            "status": "pending"
        })))
        .up_to_n_times(2)
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/environments/env-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "environment_id": "env-1",
            "status": "active"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = DiscoveryClient::new(
        ServiceConfig::new(server.uri(), "2019-04-30"),
        Arc::new(NoAuth),
    );
    let outcome = client
        .wait_for_environment("env-1", &fast_policy())
        .await
        .unwrap();
    assert!(outcome.is_success());
    assert_eq!(outcome.into_snapshot().status, "active");
}

#[tokio::test]
async fn language_model_wait_reports_failure_on_first_check() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/customizations/cust-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "customization_id": "cust-1",
            "status": "failed"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = SpeechToTextClient::new(
        ServiceConfig::without_version(server.uri()),
        Arc::new(NoAuth),
    );
    let outcome = client
        .wait_for_language_model("cust-1", &fast_policy())
        .await
        .unwrap();
    assert!(!outcome.is_success());
    assert_eq!(outcome.into_snapshot().status, "failed");
}

#[tokio::test]
async fn language_model_wait_survives_training_sequence() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/customizations/cust-2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "customization_id": "cust-2",
            "status": "training",
            "progress": 40
        })))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/customizations/cust-2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "customization_id": "cust-2",
            "status": "available",
            "progress": 100
        })))
        .mount(&server)
        .await;

    let client = SpeechToTextClient::new(
        ServiceConfig::without_version(server.uri()),
        Arc::new(NoAuth),
    );
    let outcome = client
        .wait_for_language_model("cust-2", &fast_policy())
        .await
        .unwrap();
    let snapshot = outcome.into_snapshot();
    assert_eq!(snapshot.status, "available");
    assert_eq!(snapshot.progress, 100);
}

#[tokio::test]
async fn poller_propagates_service_errors() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/environments/env-gone"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(serde_json::json!({"message": "not found"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = DiscoveryClient::new(
        ServiceConfig::new(server.uri(), "2019-04-30"),
        Arc::new(NoAuth),
    );
    let err = client
        .wait_for_environment("env-gone", &fast_policy())
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), Some(404));
}
