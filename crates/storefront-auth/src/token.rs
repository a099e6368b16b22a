//! Bearer tokens and their persistence.
//!
//! The backend issues JWTs. The client never verifies signatures; it only
//! reads the payload to drop tokens that have already expired.

use crate::AuthError;
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use serde::{Deserialize, Serialize};
use storefront_cache::Cache;

/// Storage key the token is persisted under.
pub const TOKEN_STORAGE_KEY: &str = "token";

/// An opaque bearer token.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuthToken(String);

impl std::fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("AuthToken(..)")
    }
}

/// The JWT payload fields the client cares about.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TokenClaims {
    /// Expiry as a Unix timestamp in seconds.
    #[serde(default)]
    pub exp: Option<i64>,
    /// Subject (the user id on this backend).
    #[serde(default)]
    pub sub: Option<serde_json::Value>,
}

impl AuthToken {
    /// Wrap a token string.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Get the raw token.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Decode the payload segment. The signature is not checked.
    pub fn claims(&self) -> Result<TokenClaims, AuthError> {
        let payload = self
            .0
            .split('.')
            .nth(1)
            .ok_or_else(|| AuthError::InvalidToken("not a JWT".to_string()))?;
        let bytes = URL_SAFE_NO_PAD
            .decode(payload.trim_end_matches('='))
            .map_err(|e| AuthError::InvalidToken(e.to_string()))?;
        serde_json::from_slice(&bytes).map_err(|e| AuthError::InvalidToken(e.to_string()))
    }

    /// Check expiry against `now` (Unix seconds). Tokens without `exp` never
    /// expire locally.
    pub fn is_expired_at(&self, now: i64) -> Result<bool, AuthError> {
        Ok(self.claims()?.exp.is_some_and(|exp| exp < now))
    }

    /// Fail unless the token decodes and is unexpired.
    pub fn validate(&self) -> Result<(), AuthError> {
        if self.is_expired_at(chrono::Utc::now().timestamp())? {
            return Err(AuthError::TokenExpired);
        }
        Ok(())
    }
}

/// Persists the bearer token in a [`Cache`].
#[derive(Debug, Clone)]
pub struct TokenStore {
    cache: Cache,
}

impl TokenStore {
    pub fn new(cache: Cache) -> Self {
        Self { cache }
    }

    /// Load the saved token, if any.
    pub fn load(&self) -> Result<Option<AuthToken>, AuthError> {
        Ok(self.cache.get(TOKEN_STORAGE_KEY)?)
    }

    pub fn save(&self, token: &AuthToken) -> Result<(), AuthError> {
        self.cache.set(TOKEN_STORAGE_KEY, token)?;
        Ok(())
    }

    pub fn clear(&self) -> Result<(), AuthError> {
        self.cache.delete(TOKEN_STORAGE_KEY)?;
        Ok(())
    }
}

#[cfg(test)]
pub(crate) fn jwt_with_payload(payload: &str) -> AuthToken {
    let header = URL_SAFE_NO_PAD.encode(r#"{"alg":"HS256","typ":"JWT"}"#);
    let body = URL_SAFE_NO_PAD.encode(payload);
    AuthToken::new(format!("{}.{}.signature", header, body))
}
