//! Response mapping.
//!
//! A [`WatsonResponse`] is the raw transport-level reply; mapping turns it
//! into a [`DetailedResponse<T>`] or a typed error. The contracts:
//!
//! - 2xx with a non-empty body deserializes into the declared type, and a
//!   malformed body is a `DecodingError`, never a partially populated result;
//! - 2xx with an empty body yields `T::default()`, so callers can uniformly
//!   inspect `.result` without a null case;
//! - non-2xx raises a `ServiceError` carrying the status code, the raw body,
//!   and a best-effort parsed message field.

use bytes::Bytes;
use serde::de::DeserializeOwned;

use crate::error::{WatsonError, WatsonResult};

/// Raw reply from the transport. Always carries a status code, even for
/// application-level errors; the transport raises only on true connection
/// failure.
#[derive(Debug, Clone)]
pub struct WatsonResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Bytes,
}

impl WatsonResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Look up a response header, case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Typed payload paired with the raw response for diagnostics.
#[derive(Debug, Clone)]
pub struct DetailedResponse<T> {
    pub result: T,
    pub status: u16,
    pub headers: Vec<(String, String)>,
    /// Raw body bytes as received.
    pub raw: Bytes,
}

fn error_from(response: &WatsonResponse) -> WatsonError {
    let text = String::from_utf8_lossy(&response.body);
    let fallback = reqwest::StatusCode::from_u16(response.status)
        .ok()
        .and_then(|s| s.canonical_reason());
    WatsonError::service_error(response.status, &text, fallback)
}

/// Map a response onto a JSON-deserializable result type.
pub fn map_json<T>(response: WatsonResponse) -> WatsonResult<DetailedResponse<T>>
where
    T: DeserializeOwned + Default,
{
    if !response.is_success() {
        return Err(error_from(&response));
    }
    let result = if response.body.is_empty() {
        T::default()
    } else {
        serde_json::from_slice(&response.body)
            .map_err(|e| WatsonError::DecodingError(e.to_string()))?
    };
    Ok(DetailedResponse {
        result,
        status: response.status,
        headers: response.headers,
        raw: response.body,
    })
}

/// Map a binary response (audio synthesis) onto its raw bytes.
pub fn map_bytes(response: WatsonResponse) -> WatsonResult<DetailedResponse<Bytes>> {
    if !response.is_success() {
        return Err(error_from(&response));
    }
    Ok(DetailedResponse {
        result: response.body.clone(),
        status: response.status,
        headers: response.headers,
        raw: response.body,
    })
}

/// Map a response whose body is irrelevant (delete endpoints).
pub fn map_unit(response: WatsonResponse) -> WatsonResult<DetailedResponse<()>> {
    if !response.is_success() {
        return Err(error_from(&response));
    }
    Ok(DetailedResponse {
        result: (),
        status: response.status,
        headers: response.headers,
        raw: response.body,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Default, Deserialize, PartialEq)]
    struct Thing {
        #[serde(default)]
        name: String,
    }

    fn response(status: u16, body: &str) -> WatsonResponse {
        WatsonResponse {
            status,
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: Bytes::copy_from_slice(body.as_bytes()),
        }
    }

    #[test]
    fn success_body_deserializes() {
        let mapped: DetailedResponse<Thing> = map_json(response(200, r#"{"name":"a"}"#)).unwrap();
        assert_eq!(mapped.result.name, "a");
        assert_eq!(mapped.status, 200);
    }

    #[test]
    fn empty_body_yields_default() {
        let mapped: DetailedResponse<Thing> = map_json(response(200, "")).unwrap();
        assert_eq!(mapped.result, Thing::default());
    }

    #[test]
    fn error_status_maps_to_service_error() {
        let err = map_json::<Thing>(response(404, r#"{"message":"not found"}"#)).unwrap_err();
        match err {
            WatsonError::ServiceError {
                status, message, ..
            } => {
                assert_eq!(status, 404);
                assert_eq!(message, "not found");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn malformed_body_is_decoding_error() {
        let err = map_json::<Thing>(response(200, "{not json")).unwrap_err();
        assert!(matches!(err, WatsonError::DecodingError(_)));
    }

    #[test]
    fn header_lookup_is_case_insensitive() {
        let resp = response(200, "{}");
        assert_eq!(resp.header("Content-Type"), Some("application/json"));
    }
}
