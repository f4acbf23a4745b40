//! Response envelope shared by every backend endpoint.
//!
//! Success bodies look like `{"status": "success", ...payload}`; anything else
//! is a rejection carrying an optional `message`.

use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

pub const STATUS_SUCCESS: &str = "success";

const UNKNOWN_ERROR: &str = "An unknown error occurred.";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnvelopeError {
    /// The backend answered with a non-success status.
    #[error("{0}")]
    Rejected(String),
    /// The body was not JSON or did not match the expected payload.
    #[error("Malformed response: {0}")]
    Malformed(String),
}

/// Decode a `{status, message, ...}` body into its payload.
pub fn decode_envelope<T: DeserializeOwned>(body: &str) -> Result<T, EnvelopeError> {
    let value: Value =
        serde_json::from_str(body).map_err(|e| EnvelopeError::Malformed(e.to_string()))?;
    decode_envelope_value(value)
}

pub fn decode_envelope_value<T: DeserializeOwned>(value: Value) -> Result<T, EnvelopeError> {
    let status = value.get("status").and_then(Value::as_str);
    if status != Some(STATUS_SUCCESS) {
        return Err(EnvelopeError::Rejected(rejection_message(&value)));
    }
    serde_json::from_value(value).map_err(|e| EnvelopeError::Malformed(e.to_string()))
}

/// Decode a body from an endpoint that answers without a `status` field
/// (`{"query": ...}` on success, `{"error": ...}` on failure).
pub fn decode_bare<T: DeserializeOwned>(body: &str) -> Result<T, EnvelopeError> {
    let value: Value =
        serde_json::from_str(body).map_err(|e| EnvelopeError::Malformed(e.to_string()))?;
    if value.get("error").is_some() {
        return Err(EnvelopeError::Rejected(rejection_message(&value)));
    }
    serde_json::from_value(value).map_err(|e| EnvelopeError::Malformed(e.to_string()))
}

/// Best-effort message extraction from an error body.
pub fn rejection_message(value: &Value) -> String {
    ["message", "error"]
        .iter()
        .find_map(|key| value.get(*key).and_then(Value::as_str))
        .filter(|m| !m.trim().is_empty())
        .unwrap_or(UNKNOWN_ERROR)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Files {
        files: Vec<String>,
    }

    #[test]
    fn test_success_payload_is_decoded() {
        let files: Files =
            decode_envelope(r#"{"status":"success","files":["a.csv","b.csv"]}"#).unwrap();
        assert_eq!(files.files, vec!["a.csv", "b.csv"]);
    }

    #[test]
    fn test_error_status_carries_message() {
        let err = decode_envelope::<Files>(r#"{"status":"error","message":"No data"}"#)
            .unwrap_err();
        assert_eq!(err, EnvelopeError::Rejected("No data".into()));
    }

    #[test]
    fn test_unknown_status_without_message() {
        let err = decode_envelope::<Files>(r#"{"status":"pending"}"#).unwrap_err();
        assert_eq!(err, EnvelopeError::Rejected(UNKNOWN_ERROR.into()));
    }

    #[test]
    fn test_missing_status_is_rejected() {
        let err = decode_envelope::<Files>(r#"{"files":[]}"#).unwrap_err();
        assert!(matches!(err, EnvelopeError::Rejected(_)));
    }

    #[test]
    fn test_success_with_wrong_shape_is_malformed() {
        let err = decode_envelope::<Files>(r#"{"status":"success","files":3}"#).unwrap_err();
        assert!(matches!(err, EnvelopeError::Malformed(_)));
        let err = decode_envelope::<Files>("<html>").unwrap_err();
        assert!(matches!(err, EnvelopeError::Malformed(_)));
    }

    #[test]
    fn test_bare_body() {
        #[derive(Debug, Deserialize)]
        struct Query {
            query: String,
        }
        let q: Query = decode_bare(r#"{"query":"index=\"x\""}"#).unwrap();
        assert_eq!(q.query, "index=\"x\"");
        let err = decode_bare::<Query>(r#"{"error":"No query found"}"#).unwrap_err();
        assert_eq!(err, EnvelopeError::Rejected("No query found".into()));
    }
}
