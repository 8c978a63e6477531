//! IAM token exchange: one token fetch serves consecutive API calls, and a
//! rejected key surfaces as `AuthenticationFailed`.

use std::sync::Arc;

use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use watson_sdk::auth::IamAuthenticator;
use watson_sdk::config::ServiceConfig;
use watson_sdk::error::WatsonError;
use watson_sdk::services::text_to_speech::TextToSpeechClient;

#[tokio::test]
async fn token_is_fetched_once_and_reused_while_fresh() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/identity/token"))
        .and(body_string_contains("grant_type=urn%3Aibm%3Aparams%3Aoauth%3Agrant-type%3Aapikey"))
        .and(body_string_contains("apikey=my-api-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "access_token": "iam-token-1",
            "token_type": "Bearer",
            "expires_in": 3600
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/voices"))
        .and(header("Authorization", "Bearer iam-token-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"voices": []})))
        .expect(2)
        .mount(&server)
        .await;

    let auth = IamAuthenticator::new("my-api-key")
        .with_token_url(format!("{}/identity/token", server.uri()));
    let client = TextToSpeechClient::new(
        ServiceConfig::without_version(server.uri()),
        Arc::new(auth),
    );
    client.list_voices().await.unwrap();
    client.list_voices().await.unwrap();
}

#[tokio::test]
async fn rejected_api_key_is_authentication_failed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/identity/token"))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "errorCode": "BXNIM0415E",
            "errorMessage": "Provided API key could not be found"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let auth = IamAuthenticator::new("bad-key")
        .with_token_url(format!("{}/identity/token", server.uri()));
    let client = TextToSpeechClient::new(
        ServiceConfig::without_version(server.uri()),
        Arc::new(auth),
    );
    let err = client.list_voices().await.unwrap_err();
    assert!(matches!(err, WatsonError::AuthenticationFailed(_)));
}
