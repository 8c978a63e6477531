//! Request construction.
//!
//! [`RequestBuilder`] turns an [`Operation`] descriptor plus caller-supplied
//! values into a transport-ready [`WatsonRequest`]. It owns the three
//! contracts the services rely on:
//!
//! - every `{placeholder}` in the path template must be substituted with a
//!   percent-encoded, non-empty value, otherwise the build fails with
//!   `InvalidArgument` before any network activity;
//! - optional query arguments are omitted when their source value is absent
//!   or empty, never encoded as null;
//! - exactly one body mode applies per operation (none, JSON, raw bytes, or
//!   multipart); modes are never mixed.
//!
//! Query arguments and headers keep insertion order, so building the same
//! request twice yields byte-identical output.

use bytes::Bytes;

use crate::core::operation::{Method, Operation};
use crate::error::{WatsonError, WatsonResult};

/// Check a required string parameter for presence before dispatch.
pub fn require(name: &str, value: &str) -> WatsonResult<()> {
    if value.trim().is_empty() {
        return Err(WatsonError::missing_param(name));
    }
    Ok(())
}

/// Check a required byte payload for presence before dispatch.
pub fn require_bytes(name: &str, value: &[u8]) -> WatsonResult<()> {
    if value.is_empty() {
        return Err(WatsonError::missing_param(name));
    }
    Ok(())
}

/// One part of a multipart form body.
#[derive(Debug, Clone)]
pub struct Part {
    pub name: String,
    pub kind: PartKind,
}

#[derive(Debug, Clone)]
pub enum PartKind {
    /// A plain string field.
    Text(String),
    /// A named byte buffer with a filename and MIME type.
    File {
        data: Bytes,
        filename: String,
        content_type: String,
    },
}

/// Request body, exactly one mode per operation.
#[derive(Debug, Clone, Default)]
pub enum RequestBody {
    #[default]
    None,
    Json(serde_json::Value),
    Bytes {
        data: Bytes,
        content_type: String,
    },
    Multipart(Vec<Part>),
}

/// A transport-ready request. Built fresh per call, discarded after dispatch.
#[derive(Debug, Clone)]
pub struct WatsonRequest {
    pub operation_name: &'static str,
    pub method: Method,
    /// Resolved URL without the query string.
    pub url: String,
    /// Headers in insertion order; later values override earlier ones with
    /// the same name at the transport.
    pub headers: Vec<(String, String)>,
    /// Query arguments in insertion order.
    pub query: Vec<(String, String)>,
    pub body: RequestBody,
}

impl WatsonRequest {
    /// Append or replace a header.
    pub fn set_header(&mut self, name: &str, value: impl Into<String>) {
        if let Some(existing) = self
            .headers
            .iter_mut()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
        {
            existing.1 = value.into();
        } else {
            self.headers.push((name.to_string(), value.into()));
        }
    }

    /// Full URL including the encoded query string.
    pub fn full_url(&self) -> String {
        if self.query.is_empty() {
            return self.url.clone();
        }
        let qs = self
            .query
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");
        format!("{}?{}", self.url, qs)
    }
}

/// Builder for one request against one operation descriptor.
#[derive(Debug)]
pub struct RequestBuilder {
    operation: Operation,
    base_url: String,
    path_values: Vec<(&'static str, String)>,
    headers: Vec<(String, String)>,
    query: Vec<(String, String)>,
    body: RequestBody,
}

impl RequestBuilder {
    pub fn new(operation: Operation, base_url: impl Into<String>) -> Self {
        Self {
            operation,
            base_url: base_url.into(),
            path_values: Vec::new(),
            headers: Vec::new(),
            query: Vec::new(),
            body: RequestBody::None,
        }
    }

    /// Supply a value for a `{name}` segment of the path template.
    pub fn path_param(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.path_values.push((name, value.into()));
        self
    }

    /// Add a query argument unconditionally.
    pub fn query_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((name.into(), value.into()));
        self
    }

    /// Add a query argument only when the source value is present and
    /// non-empty. Omission, not null-encoding, is the policy for optional
    /// arguments.
    pub fn query_param_opt(mut self, name: impl Into<String>, value: Option<&str>) -> Self {
        if let Some(v) = value {
            if !v.is_empty() {
                self.query.push((name.into(), v.to_string()));
            }
        }
        self
    }

    /// Set a header; a later value replaces an earlier one with the same
    /// name, so per-call headers override configured defaults.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        let value = value.into();
        if let Some(existing) = self
            .headers
            .iter_mut()
            .find(|(n, _)| n.eq_ignore_ascii_case(&name))
        {
            existing.1 = value;
        } else {
            self.headers.push((name, value));
        }
        self
    }

    /// Use a JSON body. Callers assemble the value from all required fields
    /// plus only the optional fields that are present.
    pub fn json_body(mut self, value: serde_json::Value) -> Self {
        self.body = RequestBody::Json(value);
        self
    }

    /// Use a raw byte body with the given MIME type (audio uploads).
    pub fn bytes_body(mut self, data: impl Into<Bytes>, content_type: impl Into<String>) -> Self {
        self.body = RequestBody::Bytes {
            data: data.into(),
            content_type: content_type.into(),
        };
        self
    }

    /// Use a multipart form body.
    pub fn multipart_body(mut self, parts: Vec<Part>) -> Self {
        self.body = RequestBody::Multipart(parts);
        self
    }

    /// Resolve the path template and produce the final request.
    pub fn build(self) -> WatsonResult<WatsonRequest> {
        let path = substitute_path(self.operation.path, &self.path_values)?;
        let mut headers = self.headers;
        match &self.body {
            RequestBody::Json(_) => {
                if !headers
                    .iter()
                    .any(|(n, _)| n.eq_ignore_ascii_case("content-type"))
                {
                    headers.push(("Content-Type".to_string(), "application/json".to_string()));
                }
            }
            RequestBody::Bytes { content_type, .. } => {
                headers.push(("Content-Type".to_string(), content_type.clone()));
            }
            // Multipart owns its boundary-based Content-Type at the transport.
            RequestBody::None | RequestBody::Multipart(_) => {}
        }
        Ok(WatsonRequest {
            operation_name: self.operation.name,
            method: self.operation.method,
            url: format!("{}{}", self.base_url, path),
            headers,
            query: self.query,
            body: self.body,
        })
    }
}

/// Substitute every `{name}` segment of `template` with its percent-encoded
/// value. A placeholder with no supplied value is an `InvalidArgument`.
fn substitute_path(template: &str, values: &[(&str, String)]) -> WatsonResult<String> {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        let end = after.find('}').ok_or_else(|| {
            WatsonError::InvalidArgument(format!("unclosed placeholder in path `{template}`"))
        })?;
        let name = &after[..end];
        let value = values
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
            .ok_or_else(|| WatsonError::missing_param(name))?;
        if value.trim().is_empty() {
            return Err(WatsonError::missing_param(name));
        }
        out.push_str(&urlencoding::encode(value));
        rest = &after[end + 1..];
    }
    out.push_str(rest);
    Ok(out)
}
