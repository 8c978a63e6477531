//! HTTP transport abstraction.
//!
//! The dispatcher talks to the network through [`HttpTransport`], an
//! injectable trait so tests can observe the final request and return a
//! synthetic response without going through `reqwest`. The production
//! implementation is [`ReqwestTransport`].
//!
//! A transport always yields a [`WatsonResponse`] for any HTTP reply,
//! including 4xx/5xx; it errors only on true connection-level failure, which
//! surfaces as `TransportError`.

use async_trait::async_trait;

use crate::core::request::{PartKind, RequestBody, WatsonRequest};
use crate::core::response::WatsonResponse;
use crate::error::{WatsonError, WatsonResult};

#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn send(&self, request: WatsonRequest) -> WatsonResult<WatsonResponse>;
}

/// Production transport backed by a pooled `reqwest::Client`.
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a preconfigured client (custom timeouts, proxies).
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    fn build(&self, request: WatsonRequest) -> WatsonResult<reqwest::RequestBuilder> {
        let method = match request.method {
            crate::core::operation::Method::Get => reqwest::Method::GET,
            crate::core::operation::Method::Post => reqwest::Method::POST,
            crate::core::operation::Method::Put => reqwest::Method::PUT,
            crate::core::operation::Method::Delete => reqwest::Method::DELETE,
        };
        let mut rb = self.client.request(method, &request.url);
        if !request.query.is_empty() {
            rb = rb.query(&request.query);
        }
        for (name, value) in &request.headers {
            rb = rb.header(name, value);
        }
        match request.body {
            RequestBody::None => {}
            RequestBody::Json(value) => {
                let bytes = serde_json::to_vec(&value)
                    .map_err(|e| WatsonError::DecodingError(e.to_string()))?;
                rb = rb.body(bytes);
            }
            RequestBody::Bytes { data, .. } => {
                rb = rb.body(data);
            }
            RequestBody::Multipart(parts) => {
                let mut form = reqwest::multipart::Form::new();
                for part in parts {
                    match part.kind {
                        PartKind::Text(text) => {
                            form = form.text(part.name, text);
                        }
                        PartKind::File {
                            data,
                            filename,
                            content_type,
                        } => {
                            let file_part = reqwest::multipart::Part::bytes(data.to_vec())
                                .file_name(filename)
                                .mime_str(&content_type)
                                .map_err(|e| {
                                    WatsonError::InvalidArgument(format!(
                                        "invalid MIME type for part `{}`: {e}",
                                        part.name
                                    ))
                                })?;
                            form = form.part(part.name, file_part);
                        }
                    }
                }
                rb = rb.multipart(form);
            }
        }
        Ok(rb)
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: WatsonRequest) -> WatsonResult<WatsonResponse> {
        let rb = self.build(request)?;
        let resp = rb
            .send()
            .await
            .map_err(|e| WatsonError::TransportError(e.to_string()))?;
        let status = resp.status().as_u16();
        let headers = resp
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    value.to_str().unwrap_or_default().to_string(),
                )
            })
            .collect();
        let body = resp
            .bytes()
            .await
            .map_err(|e| WatsonError::TransportError(e.to_string()))?;
        Ok(WatsonResponse {
            status,
            headers,
            body,
        })
    }
}
