//! Shared test transports.
//!
//! `StubTransport` records every dispatched request and replays scripted
//! responses; `EchoTransport` reflects the request body back as the
//! response body. Both bypass the network entirely.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use bytes::Bytes;
use watson_sdk::core::request::{PartKind, RequestBody, WatsonRequest};
use watson_sdk::core::response::WatsonResponse;
use watson_sdk::core::transport::HttpTransport;
use watson_sdk::error::WatsonResult;

#[derive(Default)]
pub struct StubTransport {
    responses: Mutex<VecDeque<WatsonResponse>>,
    requests: Mutex<Vec<WatsonRequest>>,
}

impl StubTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_json(&self, status: u16, body: serde_json::Value) {
        self.responses.lock().unwrap().push_back(WatsonResponse {
            status,
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: Bytes::from(body.to_string()),
        });
    }

    pub fn push_empty(&self, status: u16) {
        self.responses.lock().unwrap().push_back(WatsonResponse {
            status,
            headers: Vec::new(),
            body: Bytes::new(),
        });
    }

    /// Number of requests that reached the transport.
    pub fn sent(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn last_request(&self) -> Option<WatsonRequest> {
        self.requests.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl HttpTransport for StubTransport {
    async fn send(&self, request: WatsonRequest) -> WatsonResult<WatsonResponse> {
        self.requests.lock().unwrap().push(request);
        let scripted = self.responses.lock().unwrap().pop_front();
        Ok(scripted.unwrap_or(WatsonResponse {
            status: 200,
            headers: Vec::new(),
            body: Bytes::new(),
        }))
    }
}

/// Reflects the request body back, so body encoding can be checked through
/// the full dispatch-and-map path.
#[derive(Default)]
pub struct EchoTransport;

#[async_trait]
impl HttpTransport for EchoTransport {
    async fn send(&self, request: WatsonRequest) -> WatsonResult<WatsonResponse> {
        let body = match request.body {
            RequestBody::None => Bytes::new(),
            RequestBody::Json(value) => Bytes::from(value.to_string()),
            RequestBody::Bytes { data, .. } => data,
            // Summarize the form so the caller can compare structurally.
            RequestBody::Multipart(parts) => {
                let mut summary = serde_json::Map::new();
                for part in parts {
                    let value = match part.kind {
                        PartKind::Text(text) => serde_json::Value::from(text),
                        PartKind::File { filename, content_type, data } => serde_json::json!({
                            "filename": filename,
                            "content_type": content_type,
                            "bytes": data.len(),
                        }),
                    };
                    summary.insert(part.name, value);
                }
                Bytes::from(serde_json::Value::Object(summary).to_string())
            }
        };
        Ok(WatsonResponse {
            status: 200,
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body,
        })
    }
}
