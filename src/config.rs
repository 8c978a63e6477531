//! Service configuration.
//!
//! Every client takes an explicit [`ServiceConfig`] at construction; there is
//! no process-wide mutable credential or endpoint state.

/// Connection settings for one Watson service instance.
///
/// The `version` date pins the server-side API revision and is attached to
/// every request as a `version` query argument. It is immutable once the
/// client is constructed. Services that do not take a version date (Speech to
/// Text, Text to Speech) simply leave it unset.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Base URL of the service instance, without a trailing slash.
    pub service_url: String,
    /// API revision date, e.g. `"2021-06-14"`.
    pub version: Option<String>,
    /// Headers attached to every request, in insertion order.
    pub default_headers: Vec<(String, String)>,
}

impl ServiceConfig {
    /// Create a configuration for a service that pins an API version date.
    pub fn new(service_url: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            service_url: trim_trailing_slash(service_url.into()),
            version: Some(version.into()),
            default_headers: Vec::new(),
        }
    }

    /// Create a configuration for a service without a version date.
    pub fn without_version(service_url: impl Into<String>) -> Self {
        Self {
            service_url: trim_trailing_slash(service_url.into()),
            version: None,
            default_headers: Vec::new(),
        }
    }

    /// Attach a header to every request made with this configuration.
    pub fn with_default_header(
        mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.default_headers.push((name.into(), value.into()));
        self
    }
}

fn trim_trailing_slash(mut url: String) -> String {
    while url.ends_with('/') {
        url.pop();
    }
    url
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_trimmed() {
        let config = ServiceConfig::new("https://api.example.com/discovery/", "2021-06-14");
        assert_eq!(config.service_url, "https://api.example.com/discovery");
    }

    #[test]
    fn versionless_config() {
        let config = ServiceConfig::without_version("https://stt.example.com");
        assert!(config.version.is_none());
    }
}
