//! IAM token authentication.
//!
//! Exchanges an IBM Cloud API key for a bearer token at the IAM token
//! endpoint and caches it, refreshing shortly before expiry. The cache is
//! the only shared mutable state in the crate and is synchronized here; the
//! executor never caches credentials itself.

use async_trait::async_trait;
use chrono::{DateTime, Duration as ChronoDuration, Utc};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use tokio::sync::Mutex;

use crate::auth::Authenticator;
use crate::core::request::WatsonRequest;
use crate::error::{WatsonError, WatsonResult};

const DEFAULT_IAM_URL: &str = "https://iam.cloud.ibm.com/identity/token";
const GRANT_TYPE: &str = "urn:ibm:params:oauth:grant-type:apikey";

/// Fraction of the token lifetime after which a fresh token is fetched.
const REFRESH_FRACTION: f64 = 0.8;

#[derive(Debug, Deserialize)]
struct IamTokenResponse {
    access_token: String,
    expires_in: i64,
}

#[derive(Debug, Clone)]
struct CachedToken {
    access_token: String,
    refresh_at: DateTime<Utc>,
}

impl CachedToken {
    fn needs_refresh(&self) -> bool {
        Utc::now() >= self.refresh_at
    }
}

/// Authenticator that exchanges an API key for a cached IAM bearer token.
pub struct IamAuthenticator {
    api_key: SecretString,
    token_url: String,
    client: reqwest::Client,
    cache: Mutex<Option<CachedToken>>,
}

impl IamAuthenticator {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: SecretString::from(api_key.into()),
            token_url: DEFAULT_IAM_URL.to_string(),
            client: reqwest::Client::new(),
            cache: Mutex::new(None),
        }
    }

    /// Point at a non-default token endpoint (private IAM, tests).
    pub fn with_token_url(mut self, url: impl Into<String>) -> Self {
        self.token_url = url.into();
        self
    }

    async fn fetch_token(&self) -> WatsonResult<CachedToken> {
        tracing::debug!(url = %self.token_url, "requesting IAM token");
        let resp = self
            .client
            .post(&self.token_url)
            .header("Accept", "application/json")
            .form(&[
                ("grant_type", GRANT_TYPE),
                ("apikey", self.api_key.expose_secret()),
            ])
            .send()
            .await
            .map_err(|e| WatsonError::AuthenticationFailed(e.to_string()))?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(WatsonError::AuthenticationFailed(format!(
                "IAM token endpoint returned {status}: {body}"
            )));
        }
        let token: IamTokenResponse = resp
            .json()
            .await
            .map_err(|e| WatsonError::AuthenticationFailed(e.to_string()))?;
        let refresh_after = (token.expires_in as f64 * REFRESH_FRACTION) as i64;
        Ok(CachedToken {
            access_token: token.access_token,
            refresh_at: Utc::now() + ChronoDuration::seconds(refresh_after),
        })
    }

    async fn current_token(&self) -> WatsonResult<String> {
        let mut cache = self.cache.lock().await;
        match cache.as_ref() {
            Some(token) if !token.needs_refresh() => Ok(token.access_token.clone()),
            _ => {
                let token = self.fetch_token().await?;
                let access = token.access_token.clone();
                *cache = Some(token);
                Ok(access)
            }
        }
    }
}

#[async_trait]
impl Authenticator for IamAuthenticator {
    async fn authenticate(&self, mut request: WatsonRequest) -> WatsonResult<WatsonRequest> {
        let token = self.current_token().await?;
        request.set_header("Authorization", format!("Bearer {token}"));
        Ok(request)
    }
}
