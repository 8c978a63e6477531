//! Watson Speech to Text v1 client.
//!
//! `recognize` posts raw audio bytes with their MIME type and returns
//! transcription results synchronously. Custom language models are
//! long-running resources: create, train, then poll until `available`.
//!
//! Speech to Text does not take a `version` query argument; construct its
//! [`ServiceConfig`] with [`ServiceConfig::without_version`].

use std::sync::Arc;

use bytes::Bytes;
use serde::Deserialize;

use crate::auth::Authenticator;
use crate::config::ServiceConfig;
use crate::core::request::{require, require_bytes};
use crate::core::transport::HttpTransport;
use crate::core::{DetailedResponse, Method, Operation, OperationExecutor};
use crate::error::WatsonResult;
use crate::poll::{PollOutcome, PollPolicy, PollStatus, ResourceStatus, StatusPoller};

const LIST_MODELS: Operation = Operation::new("list_models", Method::Get, "/v1/models");
const GET_MODEL: Operation = Operation::new("get_model", Method::Get, "/v1/models/{model_id}");
const RECOGNIZE: Operation = Operation::new("recognize", Method::Post, "/v1/recognize");
const CREATE_LANGUAGE_MODEL: Operation = Operation::new(
    "create_language_model",
    Method::Post,
    "/v1/customizations",
);
const TRAIN_LANGUAGE_MODEL: Operation = Operation::new(
    "train_language_model",
    Method::Post,
    "/v1/customizations/{customization_id}/train",
);
const GET_LANGUAGE_MODEL: Operation = Operation::new(
    "get_language_model",
    Method::Get,
    "/v1/customizations/{customization_id}",
);

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SpeechModel {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub language: String,
    #[serde(default)]
    pub rate: u32,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SpeechModels {
    #[serde(default)]
    pub models: Vec<SpeechModel>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SpeechRecognitionAlternative {
    #[serde(default)]
    pub transcript: String,
    #[serde(default)]
    pub confidence: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SpeechRecognitionResult {
    #[serde(rename = "final", default)]
    pub is_final: bool,
    #[serde(default)]
    pub alternatives: Vec<SpeechRecognitionAlternative>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SpeechRecognitionResults {
    #[serde(default)]
    pub results: Vec<SpeechRecognitionResult>,
    #[serde(default)]
    pub result_index: u32,
}

/// Custom language model snapshot. Status runs `pending` -> `ready`
/// (trainable) -> `training` -> `available`, or `failed`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LanguageModel {
    #[serde(default)]
    pub customization_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub base_model_name: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub progress: u32,
}

impl PollStatus for LanguageModel {
    fn poll_status(&self) -> ResourceStatus {
        ResourceStatus::from_token(&self.status)
    }
}

/// Optional knobs for `recognize`; absent fields are omitted from the
/// query string.
#[derive(Debug, Clone, Default)]
pub struct RecognizeOptions {
    pub model: Option<String>,
    pub timestamps: Option<bool>,
    pub max_alternatives: Option<u32>,
    pub word_confidence: Option<bool>,
}

pub struct SpeechToTextClient {
    executor: OperationExecutor,
    poller: StatusPoller,
}

impl SpeechToTextClient {
    pub fn new(config: ServiceConfig, authenticator: Arc<dyn Authenticator>) -> Self {
        Self {
            executor: OperationExecutor::new(config, authenticator),
            poller: StatusPoller::new(),
        }
    }

    pub fn with_transport(mut self, transport: Arc<dyn HttpTransport>) -> Self {
        self.executor = self.executor.with_transport(transport);
        self
    }

    pub async fn list_models(&self) -> WatsonResult<DetailedResponse<SpeechModels>> {
        let request = self.executor.request(LIST_MODELS).build()?;
        self.executor.execute_json(request).await
    }

    pub async fn get_model(&self, model_id: &str) -> WatsonResult<DetailedResponse<SpeechModel>> {
        require("model_id", model_id)?;
        let request = self
            .executor
            .request(GET_MODEL)
            .path_param("model_id", model_id)
            .build()?;
        self.executor.execute_json(request).await
    }

    /// Transcribe an audio payload. The body is the raw audio bytes; the
    /// MIME type (`audio/wav`, `audio/flac`, ...) travels as `Content-Type`.
    pub async fn recognize(
        &self,
        audio: impl Into<Bytes>,
        content_type: &str,
        options: &RecognizeOptions,
    ) -> WatsonResult<DetailedResponse<SpeechRecognitionResults>> {
        require("content_type", content_type)?;
        let audio = audio.into();
        require_bytes("audio", &audio)?;
        let timestamps = options.timestamps.map(|b| b.to_string());
        let max_alternatives = options.max_alternatives.map(|n| n.to_string());
        let word_confidence = options.word_confidence.map(|b| b.to_string());
        let request = self
            .executor
            .request(RECOGNIZE)
            .query_param_opt("model", options.model.as_deref())
            .query_param_opt("timestamps", timestamps.as_deref())
            .query_param_opt("max_alternatives", max_alternatives.as_deref())
            .query_param_opt("word_confidence", word_confidence.as_deref())
            .bytes_body(audio, content_type)
            .build()?;
        self.executor.execute_json(request).await
    }

    pub async fn create_language_model(
        &self,
        name: &str,
        base_model_name: &str,
        description: Option<&str>,
    ) -> WatsonResult<DetailedResponse<LanguageModel>> {
        require("name", name)?;
        require("base_model_name", base_model_name)?;
        let mut body = serde_json::Map::new();
        body.insert("name".to_string(), serde_json::Value::from(name));
        body.insert(
            "base_model_name".to_string(),
            serde_json::Value::from(base_model_name),
        );
        if let Some(description) = description {
            body.insert(
                "description".to_string(),
                serde_json::Value::from(description),
            );
        }
        let request = self
            .executor
            .request(CREATE_LANGUAGE_MODEL)
            .json_body(serde_json::Value::Object(body))
            .build()?;
        self.executor.execute_json(request).await
    }

    /// Kick off training. The response body is empty; completion is
    /// observed through [`Self::wait_for_language_model`].
    pub async fn train_language_model(
        &self,
        customization_id: &str,
    ) -> WatsonResult<DetailedResponse<()>> {
        require("customization_id", customization_id)?;
        let request = self
            .executor
            .request(TRAIN_LANGUAGE_MODEL)
            .path_param("customization_id", customization_id)
            .build()?;
        self.executor.execute_unit(request).await
    }

    pub async fn get_language_model(
        &self,
        customization_id: &str,
    ) -> WatsonResult<DetailedResponse<LanguageModel>> {
        require("customization_id", customization_id)?;
        let request = self
            .executor
            .request(GET_LANGUAGE_MODEL)
            .path_param("customization_id", customization_id)
            .build()?;
        self.executor.execute_json(request).await
    }

    /// Poll the custom model until training reaches a terminal state.
    pub async fn wait_for_language_model(
        &self,
        customization_id: &str,
        policy: &PollPolicy,
    ) -> WatsonResult<PollOutcome<LanguageModel>> {
        require("customization_id", customization_id)?;
        let client = self;
        self.poller
            .wait(customization_id, policy, move || {
                let check = client.get_language_model(customization_id);
                async move { Ok(check.await?.result) }
            })
            .await
    }
}
