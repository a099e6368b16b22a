//! HTTP response handling.
//!
//! Backend responses are wrapped as `{ "success": bool, "data"?: T,
//! "error"?: string }`. Auth responses put `token` and `user` beside
//! `success` instead of under `data`.

use crate::FetchError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// The backend's response envelope.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiEnvelope<T> {
    /// Whether the call succeeded.
    #[serde(default)]
    pub success: bool,
    /// Payload on success.
    pub data: Option<T>,
    /// Message on failure.
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Deserialize)]
struct EnvelopeStatus {
    #[serde(default = "default_success")]
    success: bool,
    #[serde(default)]
    error: Option<String>,
}

fn default_success() -> bool {
    true
}

/// An HTTP response.
#[derive(Debug, Clone)]
pub struct Response {
    /// The HTTP status code.
    pub status: u16,
    /// The response body.
    pub body: Vec<u8>,
}

impl Response {
    /// Create a new response.
    pub fn new(status: u16, body: Vec<u8>) -> Self {
        Self { status, body }
    }

    /// Check if the response was successful (2xx status).
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Parse the response body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, FetchError> {
        serde_json::from_slice(&self.body).map_err(|e| FetchError::ParseError(e.to_string()))
    }

    /// Error for a non-2xx status: the envelope's `error` when the body
    /// carries one, otherwise a generic status message.
    fn status_error(&self) -> FetchError {
        let message = serde_json::from_slice::<EnvelopeStatus>(&self.body)
            .ok()
            .and_then(|s| s.error)
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| format!("Request failed with status code {}", self.status));
        FetchError::HttpError {
            status: self.status,
            message,
        }
    }

    /// Check the status and the envelope's `success` flag.
    fn ensure_api_success(&self) -> Result<(), FetchError> {
        if !self.is_success() {
            return Err(self.status_error());
        }
        let status: EnvelopeStatus = self.json()?;
        if !status.success {
            return Err(FetchError::Api(
                status.error.unwrap_or_else(|| "Request failed".to_string()),
            ));
        }
        Ok(())
    }

    /// Unwrap the envelope's `data` payload.
    pub fn into_data<T: DeserializeOwned>(self) -> Result<T, FetchError> {
        self.ensure_api_success()?;
        let envelope: ApiEnvelope<T> = self.json()?;
        envelope
            .data
            .ok_or_else(|| FetchError::ParseError("response has no data".to_string()))
    }

    /// Parse the whole body after checking the envelope, for responses
    /// that carry their payload beside `success`.
    pub fn into_body<T: DeserializeOwned>(self) -> Result<T, FetchError> {
        self.ensure_api_success()?;
        self.json()
    }
}
