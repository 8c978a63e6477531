//! Operation execution.
//!
//! [`OperationExecutor`] is the single dispatch path shared by every service
//! client: seed a builder from the service configuration, authenticate the
//! built request, send it through the transport, and map the response. The
//! per-service wrappers reduce to parameter validation plus descriptor and
//! DTO declarations.
//!
//! Nothing here retries. An authentication failure, transport failure, or
//! error status propagates to the caller unchanged.

use std::sync::Arc;

use serde::de::DeserializeOwned;

use crate::auth::Authenticator;
use crate::config::ServiceConfig;
use crate::core::operation::Operation;
use crate::core::request::{RequestBuilder, WatsonRequest};
use crate::core::response::{
    map_bytes, map_json, map_unit, DetailedResponse, WatsonResponse,
};
use crate::core::transport::{HttpTransport, ReqwestTransport};
use crate::error::WatsonResult;

#[derive(Clone)]
pub struct OperationExecutor {
    config: ServiceConfig,
    authenticator: Arc<dyn Authenticator>,
    transport: Arc<dyn HttpTransport>,
}

impl OperationExecutor {
    pub fn new(config: ServiceConfig, authenticator: Arc<dyn Authenticator>) -> Self {
        Self {
            config,
            authenticator,
            transport: Arc::new(ReqwestTransport::new()),
        }
    }

    /// Swap in a different transport (tests, custom clients).
    pub fn with_transport(mut self, transport: Arc<dyn HttpTransport>) -> Self {
        self.transport = transport;
        self
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// Start a request for `operation`, pre-seeded with the service URL, the
    /// pinned `version` query argument (when the service carries one), the
    /// configured default headers, and `Accept: application/json`. Wrappers
    /// for binary endpoints override `Accept` per call.
    pub fn request(&self, operation: Operation) -> RequestBuilder {
        let mut builder = RequestBuilder::new(operation, &self.config.service_url)
            .header("Accept", "application/json");
        for (name, value) in &self.config.default_headers {
            builder = builder.header(name.clone(), value.clone());
        }
        if let Some(version) = &self.config.version {
            builder = builder.query_param("version", version.clone());
        }
        builder
    }

    /// Authenticate and send, returning the raw response.
    pub async fn dispatch(&self, request: WatsonRequest) -> WatsonResult<WatsonResponse> {
        let request = self.authenticator.authenticate(request).await?;
        tracing::debug!(
            operation = request.operation_name,
            method = request.method.as_str(),
            url = %request.url,
            "dispatching request"
        );
        let response = self.transport.send(request).await?;
        tracing::debug!(status = response.status, "response received");
        Ok(response)
    }

    /// Dispatch and map onto a JSON result type.
    pub async fn execute_json<T>(&self, request: WatsonRequest) -> WatsonResult<DetailedResponse<T>>
    where
        T: DeserializeOwned + Default,
    {
        map_json(self.dispatch(request).await?)
    }

    /// Dispatch and return the raw body bytes (binary endpoints).
    pub async fn execute_bytes(
        &self,
        request: WatsonRequest,
    ) -> WatsonResult<DetailedResponse<bytes::Bytes>> {
        map_bytes(self.dispatch(request).await?)
    }

    /// Dispatch and discard the body (delete endpoints).
    pub async fn execute_unit(&self, request: WatsonRequest) -> WatsonResult<DetailedResponse<()>> {
        map_unit(self.dispatch(request).await?)
    }
}
