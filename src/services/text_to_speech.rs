//! Watson Text to Speech v1 client.
//!
//! `synthesize` is the one binary endpoint in the SDK: it takes a JSON body
//! and returns raw audio bytes, with the output format negotiated through
//! the `Accept` header.
//!
//! Text to Speech does not take a `version` query argument.

use std::sync::Arc;

use bytes::Bytes;
use serde::Deserialize;

use crate::auth::Authenticator;
use crate::config::ServiceConfig;
use crate::core::request::require;
use crate::core::transport::HttpTransport;
use crate::core::{DetailedResponse, Method, Operation, OperationExecutor};
use crate::error::WatsonResult;

const LIST_VOICES: Operation = Operation::new("list_voices", Method::Get, "/v1/voices");
const GET_VOICE: Operation = Operation::new("get_voice", Method::Get, "/v1/voices/{voice}");
const SYNTHESIZE: Operation = Operation::new("synthesize", Method::Post, "/v1/synthesize");

const DEFAULT_ACCEPT: &str = "audio/ogg;codecs=opus";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Voice {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub language: String,
    #[serde(default)]
    pub gender: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Voices {
    #[serde(default)]
    pub voices: Vec<Voice>,
}

pub struct TextToSpeechClient {
    executor: OperationExecutor,
}

impl TextToSpeechClient {
    pub fn new(config: ServiceConfig, authenticator: Arc<dyn Authenticator>) -> Self {
        Self {
            executor: OperationExecutor::new(config, authenticator),
        }
    }

    pub fn with_transport(mut self, transport: Arc<dyn HttpTransport>) -> Self {
        self.executor = self.executor.with_transport(transport);
        self
    }

    pub async fn list_voices(&self) -> WatsonResult<DetailedResponse<Voices>> {
        let request = self.executor.request(LIST_VOICES).build()?;
        self.executor.execute_json(request).await
    }

    pub async fn get_voice(&self, voice: &str) -> WatsonResult<DetailedResponse<Voice>> {
        require("voice", voice)?;
        let request = self
            .executor
            .request(GET_VOICE)
            .path_param("voice", voice)
            .build()?;
        self.executor.execute_json(request).await
    }

    /// Synthesize `text` to audio. `accept` selects the audio format and
    /// defaults to Ogg/Opus; `voice` falls back to the service default when
    /// omitted.
    pub async fn synthesize(
        &self,
        text: &str,
        voice: Option<&str>,
        accept: Option<&str>,
    ) -> WatsonResult<DetailedResponse<Bytes>> {
        require("text", text)?;
        let request = self
            .executor
            .request(SYNTHESIZE)
            .header("Accept", accept.unwrap_or(DEFAULT_ACCEPT))
            .query_param_opt("voice", voice)
            .json_body(serde_json::json!({ "text": text }))
            .build()?;
        self.executor.execute_bytes(request).await
    }
}
