//! Operation descriptors.
//!
//! One [`Operation`] is defined per REST endpoint, as a `const` in the owning
//! service module. Descriptors are static metadata with lifecycle load-once,
//! read-only; the per-call state lives in [`crate::core::request`].

/// HTTP method of an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

/// Static metadata describing one REST endpoint.
///
/// The path is a template whose `{name}` segments are substituted with
/// percent-encoded values at build time.
#[derive(Debug, Clone, Copy)]
pub struct Operation {
    /// Operation name, used in logs and error messages.
    pub name: &'static str,
    pub method: Method,
    /// Path template, e.g. `"/v1/environments/{environment_id}"`.
    pub path: &'static str,
}

impl Operation {
    pub const fn new(name: &'static str, method: Method, path: &'static str) -> Self {
        Self { name, method, path }
    }
}
