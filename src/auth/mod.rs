//! Authentication.
//!
//! An [`Authenticator`] decorates a built request with credentials
//! immediately before dispatch. The call is async because some schemes
//! (IAM) may block briefly to fetch or refresh a token; the executor
//! tolerates that and never retries an authentication failure itself.
//!
//! Supported schemes mirror the Watson platform: no-auth for local or test
//! endpoints, a pass-through bearer token, HTTP Basic, an API key sent as a
//! query argument, and an API key exchanged for a cached IAM bearer token
//! ([`iam::IamAuthenticator`]).

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use secrecy::{ExposeSecret, SecretString};

use crate::core::request::WatsonRequest;
use crate::error::WatsonResult;

pub mod iam;

pub use iam::IamAuthenticator;

#[async_trait]
pub trait Authenticator: Send + Sync {
    /// Attach credentials to the request, refreshing cached material first
    /// when necessary. Failures surface as `AuthenticationFailed`.
    async fn authenticate(&self, request: WatsonRequest) -> WatsonResult<WatsonRequest>;
}

/// No credentials; for local or test endpoints.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoAuth;

#[async_trait]
impl Authenticator for NoAuth {
    async fn authenticate(&self, request: WatsonRequest) -> WatsonResult<WatsonRequest> {
        Ok(request)
    }
}

/// Pass-through bearer token managed by the caller.
pub struct BearerAuth {
    token: SecretString,
}

impl BearerAuth {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: SecretString::from(token.into()),
        }
    }
}

#[async_trait]
impl Authenticator for BearerAuth {
    async fn authenticate(&self, mut request: WatsonRequest) -> WatsonResult<WatsonRequest> {
        request.set_header(
            "Authorization",
            format!("Bearer {}", self.token.expose_secret()),
        );
        Ok(request)
    }
}

/// HTTP Basic credentials (username/password service instances).
pub struct BasicAuth {
    username: String,
    password: SecretString,
}

impl BasicAuth {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: SecretString::from(password.into()),
        }
    }
}

#[async_trait]
impl Authenticator for BasicAuth {
    async fn authenticate(&self, mut request: WatsonRequest) -> WatsonResult<WatsonRequest> {
        let raw = format!("{}:{}", self.username, self.password.expose_secret());
        request.set_header("Authorization", format!("Basic {}", BASE64.encode(raw)));
        Ok(request)
    }
}

/// API key sent as a query argument (legacy Visual Recognition style).
pub struct ApiKeyQueryAuth {
    param: String,
    key: SecretString,
}

impl ApiKeyQueryAuth {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            param: "api_key".to_string(),
            key: SecretString::from(key.into()),
        }
    }

    /// Override the query argument name.
    pub fn with_param(mut self, param: impl Into<String>) -> Self {
        self.param = param.into();
        self
    }
}

#[async_trait]
impl Authenticator for ApiKeyQueryAuth {
    async fn authenticate(&self, mut request: WatsonRequest) -> WatsonResult<WatsonRequest> {
        request
            .query
            .push((self.param.clone(), self.key.expose_secret().to_string()));
        Ok(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::operation::{Method, Operation};
    use crate::core::request::RequestBuilder;

    fn request() -> WatsonRequest {
        RequestBuilder::new(
            Operation::new("op", Method::Get, "/v1/things"),
            "https://api.example.com",
        )
        .build()
        .unwrap()
    }

    #[tokio::test]
    async fn basic_auth_header_shape() {
        let auth = BasicAuth::new("apikey", "secret");
        let req = auth.authenticate(request()).await.unwrap();
        let header = req
            .headers
            .iter()
            .find(|(n, _)| n == "Authorization")
            .map(|(_, v)| v.clone())
            .unwrap();
        // base64("apikey:secret")
        assert_eq!(header, "Basic YXBpa2V5OnNlY3JldA==");
    }

    #[tokio::test]
    async fn bearer_auth_sets_header() {
        let auth = BearerAuth::new("tok-123");
        let req = auth.authenticate(request()).await.unwrap();
        assert_eq!(req.headers[0].1, "Bearer tok-123");
    }

    #[tokio::test]
    async fn api_key_query_auth_appends_argument() {
        let auth = ApiKeyQueryAuth::new("k-1");
        let req = auth.authenticate(request()).await.unwrap();
        assert_eq!(req.query, vec![("api_key".to_string(), "k-1".to_string())]);
    }
}
