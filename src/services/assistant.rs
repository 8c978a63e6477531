//! Watson Assistant v2 client.
//!
//! Stateful conversation: create a session against an assistant, exchange
//! messages within it, delete it when done.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::auth::Authenticator;
use crate::config::ServiceConfig;
use crate::core::request::require;
use crate::core::transport::HttpTransport;
use crate::core::{DetailedResponse, Method, Operation, OperationExecutor};
use crate::error::WatsonResult;

const CREATE_SESSION: Operation = Operation::new(
    "create_session",
    Method::Post,
    "/v2/assistants/{assistant_id}/sessions",
);
const DELETE_SESSION: Operation = Operation::new(
    "delete_session",
    Method::Delete,
    "/v2/assistants/{assistant_id}/sessions/{session_id}",
);
const MESSAGE: Operation = Operation::new(
    "message",
    Method::Post,
    "/v2/assistants/{assistant_id}/sessions/{session_id}/message",
);

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SessionResponse {
    #[serde(default)]
    pub session_id: String,
}

/// User input for one message turn.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MessageInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl MessageInput {
    /// Plain text input.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            message_type: Some("text".to_string()),
            text: Some(text.into()),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RuntimeResponseGeneric {
    #[serde(default)]
    pub response_type: String,
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RuntimeIntent {
    #[serde(default)]
    pub intent: String,
    #[serde(default)]
    pub confidence: f64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RuntimeEntity {
    #[serde(default)]
    pub entity: String,
    #[serde(default)]
    pub value: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MessageOutput {
    #[serde(default)]
    pub generic: Vec<RuntimeResponseGeneric>,
    #[serde(default)]
    pub intents: Vec<RuntimeIntent>,
    #[serde(default)]
    pub entities: Vec<RuntimeEntity>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub output: MessageOutput,
    #[serde(default)]
    pub context: Option<serde_json::Value>,
}

pub struct AssistantClient {
    executor: OperationExecutor,
}

impl AssistantClient {
    pub fn new(config: ServiceConfig, authenticator: Arc<dyn Authenticator>) -> Self {
        Self {
            executor: OperationExecutor::new(config, authenticator),
        }
    }

    pub fn with_transport(mut self, transport: Arc<dyn HttpTransport>) -> Self {
        self.executor = self.executor.with_transport(transport);
        self
    }

    pub async fn create_session(
        &self,
        assistant_id: &str,
    ) -> WatsonResult<DetailedResponse<SessionResponse>> {
        require("assistant_id", assistant_id)?;
        let request = self
            .executor
            .request(CREATE_SESSION)
            .path_param("assistant_id", assistant_id)
            .build()?;
        self.executor.execute_json(request).await
    }

    pub async fn delete_session(
        &self,
        assistant_id: &str,
        session_id: &str,
    ) -> WatsonResult<DetailedResponse<()>> {
        require("assistant_id", assistant_id)?;
        require("session_id", session_id)?;
        let request = self
            .executor
            .request(DELETE_SESSION)
            .path_param("assistant_id", assistant_id)
            .path_param("session_id", session_id)
            .build()?;
        self.executor.execute_unit(request).await
    }

    /// Send one message turn. `input` and `context` are optional; absent
    /// fields are omitted from the JSON body entirely.
    pub async fn message(
        &self,
        assistant_id: &str,
        session_id: &str,
        input: Option<MessageInput>,
        context: Option<serde_json::Value>,
    ) -> WatsonResult<DetailedResponse<MessageResponse>> {
        require("assistant_id", assistant_id)?;
        require("session_id", session_id)?;
        let mut body = serde_json::Map::new();
        if let Some(input) = input {
            body.insert("input".to_string(), serde_json::to_value(input)?);
        }
        if let Some(context) = context {
            body.insert("context".to_string(), context);
        }
        let request = self
            .executor
            .request(MESSAGE)
            .path_param("assistant_id", assistant_id)
            .path_param("session_id", session_id)
            .json_body(serde_json::Value::Object(body))
            .build()?;
        self.executor.execute_json(request).await
    }
}
