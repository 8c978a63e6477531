//! Watson Discovery v1 client.
//!
//! Environments and collections are long-running resources: creation
//! returns immediately with a `pending` status and readiness is observed by
//! polling. Document ingestion uploads a file plus optional metadata as a
//! multipart form.

use std::sync::Arc;

use bytes::Bytes;
use serde::Deserialize;

use crate::auth::Authenticator;
use crate::config::ServiceConfig;
use crate::core::request::{require, require_bytes, Part, PartKind};
use crate::core::transport::HttpTransport;
use crate::core::{DetailedResponse, Method, Operation, OperationExecutor};
use crate::error::WatsonResult;
use crate::poll::{PollOutcome, PollPolicy, PollStatus, ResourceStatus, StatusPoller};

const CREATE_ENVIRONMENT: Operation =
    Operation::new("create_environment", Method::Post, "/v1/environments");
const LIST_ENVIRONMENTS: Operation =
    Operation::new("list_environments", Method::Get, "/v1/environments");
const GET_ENVIRONMENT: Operation = Operation::new(
    "get_environment",
    Method::Get,
    "/v1/environments/{environment_id}",
);
const CREATE_COLLECTION: Operation = Operation::new(
    "create_collection",
    Method::Post,
    "/v1/environments/{environment_id}/collections",
);
const ADD_DOCUMENT: Operation = Operation::new(
    "add_document",
    Method::Post,
    "/v1/environments/{environment_id}/collections/{collection_id}/documents",
);
const QUERY: Operation = Operation::new(
    "query",
    Method::Get,
    "/v1/environments/{environment_id}/collections/{collection_id}/query",
);

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Environment {
    #[serde(default)]
    pub environment_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Reported status token: `pending`, `active`, `maintenance`, ...
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub read_only: bool,
}

impl PollStatus for Environment {
    fn poll_status(&self) -> ResourceStatus {
        ResourceStatus::from_token(&self.status)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListEnvironmentsResponse {
    #[serde(default)]
    pub environments: Vec<Environment>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Collection {
    #[serde(default)]
    pub collection_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub language: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DocumentAccepted {
    #[serde(default)]
    pub document_id: String,
    #[serde(default)]
    pub status: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct QueryResponse {
    #[serde(default)]
    pub matching_results: u64,
    #[serde(default)]
    pub results: Vec<serde_json::Value>,
}

pub struct DiscoveryClient {
    executor: OperationExecutor,
    poller: StatusPoller,
}

impl DiscoveryClient {
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

    pub async fn create_environment(
        &self,
        name: &str,
        description: Option<&str>,
    ) -> WatsonResult<DetailedResponse<Environment>> {
        require("name", name)?;
        let mut body = serde_json::Map::new();
        body.insert("name".to_string(), serde_json::Value::from(name));
        if let Some(description) = description {
            body.insert(
                "description".to_string(),
                serde_json::Value::from(description),
            );
        }
        let request = self
            .executor
            .request(CREATE_ENVIRONMENT)
            .json_body(serde_json::Value::Object(body))
            .build()?;
        self.executor.execute_json(request).await
    }

    pub async fn list_environments(
        &self,
        name: Option<&str>,
    ) -> WatsonResult<DetailedResponse<ListEnvironmentsResponse>> {
        let request = self
            .executor
            .request(LIST_ENVIRONMENTS)
            .query_param_opt("name", name)
            .build()?;
        self.executor.execute_json(request).await
    }

    pub async fn get_environment(
        &self,
        environment_id: &str,
    ) -> WatsonResult<DetailedResponse<Environment>> {
        require("environment_id", environment_id)?;
        let request = self
            .executor
            .request(GET_ENVIRONMENT)
            .path_param("environment_id", environment_id)
            .build()?;
        self.executor.execute_json(request).await
    }

    pub async fn create_collection(
        &self,
        environment_id: &str,
        name: &str,
        description: Option<&str>,
        language: Option<&str>,
    ) -> WatsonResult<DetailedResponse<Collection>> {
        require("environment_id", environment_id)?;
        require("name", name)?;
        let mut body = serde_json::Map::new();
        body.insert("name".to_string(), serde_json::Value::from(name));
        if let Some(description) = description {
            body.insert(
                "description".to_string(),
                serde_json::Value::from(description),
            );
        }
        if let Some(language) = language {
            body.insert("language".to_string(), serde_json::Value::from(language));
        }
        let request = self
            .executor
            .request(CREATE_COLLECTION)
            .path_param("environment_id", environment_id)
            .json_body(serde_json::Value::Object(body))
            .build()?;
        self.executor.execute_json(request).await
    }

    /// Ingest one document as a multipart form: a `file` part with filename
    /// and MIME type, plus an optional `metadata` JSON part.
    pub async fn add_document(
        &self,
        environment_id: &str,
        collection_id: &str,
        file: impl Into<Bytes>,
        filename: &str,
        content_type: &str,
        metadata: Option<serde_json::Value>,
    ) -> WatsonResult<DetailedResponse<DocumentAccepted>> {
        require("environment_id", environment_id)?;
        require("collection_id", collection_id)?;
        require("filename", filename)?;
        require("content_type", content_type)?;
        let file = file.into();
        require_bytes("file", &file)?;
        let mut parts = vec![Part {
            name: "file".to_string(),
            kind: PartKind::File {
                data: file,
                filename: filename.to_string(),
                content_type: content_type.to_string(),
            },
        }];
        if let Some(metadata) = metadata {
            parts.push(Part {
                name: "metadata".to_string(),
                kind: PartKind::Text(metadata.to_string()),
            });
        }
        let request = self
            .executor
            .request(ADD_DOCUMENT)
            .path_param("environment_id", environment_id)
            .path_param("collection_id", collection_id)
            .multipart_body(parts)
            .build()?;
        self.executor.execute_json(request).await
    }

    pub async fn query(
        &self,
        environment_id: &str,
        collection_id: &str,
        natural_language_query: Option<&str>,
        filter: Option<&str>,
        count: Option<u32>,
    ) -> WatsonResult<DetailedResponse<QueryResponse>> {
        require("environment_id", environment_id)?;
        require("collection_id", collection_id)?;
        let count = count.map(|c| c.to_string());
        let request = self
            .executor
            .request(QUERY)
            .path_param("environment_id", environment_id)
            .path_param("collection_id", collection_id)
            .query_param_opt("natural_language_query", natural_language_query)
            .query_param_opt("filter", filter)
            .query_param_opt("count", count.as_deref())
            .build()?;
        self.executor.execute_json(request).await
    }

    /// Poll the environment until it becomes active or fails.
    pub async fn wait_for_environment(
        &self,
        environment_id: &str,
        policy: &PollPolicy,
    ) -> WatsonResult<PollOutcome<Environment>> {
        require("environment_id", environment_id)?;
        let client = self;
        self.poller
            .wait(environment_id, policy, move || {
                let check = client.get_environment(environment_id);
                async move { Ok(check.await?.result) }
            })
            .await
    }
}
