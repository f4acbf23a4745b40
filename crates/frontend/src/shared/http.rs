//! JSON-over-HTTP client for the backend endpoints.
//!
//! Every call resolves to `Result<T, ApiError>`: a request that never got an
//! answer is a transport error, any answer that is not a success envelope is a
//! server error.

use crate::shared::api_utils::api_url;
use crate::shared::error::ApiError;
use contracts::shared::envelope::{decode_bare, decode_envelope, EnvelopeError};
use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiClient {
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    pub fn url(&self, path: &str) -> String {
        api_url(&self.base_url, path)
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.url(path);
        let response = Request::get(&url).send().await.map_err(|e| transport(&url, e))?;
        read_envelope(response).await
    }

    /// GET for endpoints that answer without a status envelope.
    pub async fn get_bare<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.url(path);
        let response = Request::get(&url).send().await.map_err(|e| transport(&url, e))?;
        let status = response.status();
        let body = read_body(&url, &response).await?;
        decode_bare(&body).map_err(|e| classify(e, status))
    }

    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.url(path);
        let request = Request::post(&url)
            .json(body)
            .map_err(|e| ApiError::State(format!("Failed to serialize request: {}", e)))?;
        let response = request.send().await.map_err(|e| transport(&url, e))?;
        read_envelope(response).await
    }

    /// JSON POST for endpoints that answer without a status envelope.
    pub async fn post_bare<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.url(path);
        let request = Request::post(&url)
            .json(body)
            .map_err(|e| ApiError::State(format!("Failed to serialize request: {}", e)))?;
        let response = request.send().await.map_err(|e| transport(&url, e))?;
        let status = response.status();
        let body = read_body(&url, &response).await?;
        decode_bare(&body).map_err(|e| classify(e, status))
    }

    /// POST with an empty JSON object, for action endpoints keyed by path.
    pub async fn post_action<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.post(path, &serde_json::json!({})).await
    }

    pub async fn post_form<T: DeserializeOwned>(
        &self,
        path: &str,
        form: web_sys::FormData,
    ) -> Result<T, ApiError> {
        let url = self.url(path);
        let request = Request::post(&url)
            .body(form)
            .map_err(|e| ApiError::State(format!("Failed to build request: {}", e)))?;
        let response = request.send().await.map_err(|e| transport(&url, e))?;
        read_envelope(response).await
    }
}

/// Payload of endpoints that only report `{status: "success"}`.
#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct Acknowledged {}

fn transport(url: &str, e: gloo_net::Error) -> ApiError {
    log::error!("Request to {} failed: {}", url, e);
    ApiError::Transport(e.to_string())
}

async fn read_body(url: &str, response: &Response) -> Result<String, ApiError> {
    response.text().await.map_err(|e| transport(url, e))
}

async fn read_envelope<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let status = response.status();
    let body = read_body(&response.url(), &response).await?;
    decode_envelope(&body).map_err(|e| classify(e, status))
}

/// A non-2xx answer whose body is not an envelope is reported by status code.
fn classify(e: EnvelopeError, status: u16) -> ApiError {
    match e {
        EnvelopeError::Malformed(detail) if !(200..300).contains(&status) => {
            log::error!("HTTP error {}: {}", status, detail);
            ApiError::Server(format!("HTTP error: {}", status))
        }
        other => {
            log::error!("Backend rejected request: {}", other);
            other.into()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_keeps_server_message() {
        let err = classify(EnvelopeError::Rejected("Invalid path".into()), 400);
        assert_eq!(err, ApiError::Server("Invalid path".into()));
    }

    #[test]
    fn test_classify_unparseable_error_status() {
        let err = classify(EnvelopeError::Malformed("expected value".into()), 502);
        assert_eq!(err, ApiError::Server("HTTP error: 502".into()));
        let err = classify(EnvelopeError::Malformed("expected value".into()), 200);
        assert_eq!(err, ApiError::Server("Malformed response: expected value".into()));
    }

    #[test]
    fn test_client_joins_base() {
        assert_eq!(ApiClient::new("").url("/get_lookup_files"), "/get_lookup_files");
        assert_eq!(
            ApiClient::new("http://127.0.0.1:5000").url("/get_lookup_files"),
            "http://127.0.0.1:5000/get_lookup_files"
        );
    }
}
