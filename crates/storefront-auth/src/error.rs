//! Authentication errors.

use thiserror::Error;

/// Authentication error type.
#[derive(Error, Debug)]
pub enum AuthError {
    /// The backend rejected the request; the message is shown as-is.
    #[error("{0}")]
    Backend(String),

    /// No token is held.
    #[error("not signed in")]
    NotAuthenticated,

    /// Token could not be decoded.
    #[error("token invalid: {0}")]
    InvalidToken(String),

    /// Token expired.
    #[error("token expired")]
    TokenExpired,

    /// Cache error.
    #[error("cache error: {0}")]
    Cache(#[from] storefront_cache::CacheError),
}

impl AuthError {
    /// Check if this is an authentication failure.
    pub fn is_auth_failure(&self) -> bool {
        matches!(
            self,
            AuthError::NotAuthenticated | AuthError::InvalidToken(_) | AuthError::TokenExpired
        )
    }

    /// Message for the shopper, or `fallback` when the backend gave none.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            AuthError::Backend(message) if !message.trim().is_empty() => message.clone(),
            _ => fallback.to_string(),
        }
    }
}
