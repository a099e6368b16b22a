//! HTTP client error types.

use thiserror::Error;

/// Errors that can occur when making HTTP requests.
#[derive(Error, Debug)]
pub enum FetchError {
    /// Failed to send the request.
    #[error("Request failed: {0}")]
    RequestError(String),

    /// Invalid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// HTTP error response.
    #[error("HTTP {status}: {message}")]
    HttpError { status: u16, message: String },

    /// The backend answered `success: false`.
    #[error("{0}")]
    Api(String),

    /// Failed to parse response body.
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Request timeout.
    #[error("Request timed out")]
    Timeout,

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    JsonError(String),
}

impl FetchError {
    /// Text suitable for showing to the shopper.
    ///
    /// Backend-provided messages are passed through unchanged; everything
    /// else uses the error's display text.
    pub fn user_message(&self) -> String {
        match self {
            FetchError::HttpError { message, .. } | FetchError::Api(message) => message.clone(),
            other => other.to_string(),
        }
    }

    /// HTTP status, when the server answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::HttpError { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(e: serde_json::Error) -> Self {
        FetchError::JsonError(e.to_string())
    }
}

impl From<url::ParseError> for FetchError {
    fn from(e: url::ParseError) -> Self {
        FetchError::InvalidUrl(e.to_string())
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            FetchError::Timeout
        } else {
            FetchError::RequestError(e.to_string())
        }
    }
}

impl From<FetchError> for storefront_core::checkout::GatewayError {
    fn from(e: FetchError) -> Self {
        storefront_core::checkout::GatewayError::new(e.user_message())
    }
}

impl From<FetchError> for storefront_auth::AuthError {
    fn from(e: FetchError) -> Self {
        storefront_auth::AuthError::Backend(e.user_message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_passes_backend_text_through() {
        let err = FetchError::HttpError {
            status: 402,
            message: "card_declined".to_string(),
        };
        assert_eq!(err.user_message(), "card_declined");
        assert_eq!(err.status(), Some(402));
        assert_eq!(FetchError::Timeout.user_message(), "Request timed out");
    }

    #[test]
    fn test_gateway_conversion() {
        let gateway: storefront_core::checkout::GatewayError =
            FetchError::Api("Order not found".to_string()).into();
        assert_eq!(gateway.message, "Order not found");
    }
}
