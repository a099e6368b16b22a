//! REST client for the storefront backend.
//!
//! Provides a small builder API over a pluggable [`Transport`] with
//! automatic JSON handling and the backend's `{success, data, error}`
//! envelope, plus typed endpoint methods on [`StorefrontApi`].
//!
//! # Example
//!
//! ```rust,ignore
//! use storefront_api::{FetchClient, StorefrontApi};
//! use storefront_core::catalog::ListingSource;
//!
//! let client = FetchClient::new("http://localhost:5000/api", Duration::from_secs(10))?;
//! let api = StorefrontApi::new(client);
//!
//! let products = api.fetch_listing(&ListingSource::Category("men".into())).await?;
//! let order = api.get_order(OrderId::new(101)).await?;
//! ```

mod error;
mod request;
mod response;
mod services;
mod transport;

pub use error::FetchError;
pub use request::{Method, RequestBuilder};
pub use response::{ApiEnvelope, Response};
pub use services::StorefrontApi;
pub use transport::{ReqwestTransport, Transport};

use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

/// Default API base URL for a local backend.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000/api";

/// HTTP client for the storefront API.
///
/// Relative paths are resolved against the base URL, and the current bearer
/// token (if any) is attached to every request.
#[derive(Clone)]
pub struct FetchClient {
    base_url: String,
    default_headers: HashMap<String, String>,
    bearer_token: Option<String>,
    transport: Arc<dyn Transport>,
}

impl std::fmt::Debug for FetchClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FetchClient")
            .field("base_url", &self.base_url)
            .field("authenticated", &self.bearer_token.is_some())
            .finish_non_exhaustive()
    }
}

impl FetchClient {
    /// Create a client sending over `reqwest` with the given request timeout.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, FetchError> {
        Ok(Self::with_transport(
            base_url,
            Arc::new(ReqwestTransport::new(timeout)?),
        ))
    }

    /// Create a client over a custom transport.
    pub fn with_transport(base_url: impl Into<String>, transport: Arc<dyn Transport>) -> Self {
        let mut default_headers = HashMap::new();
        default_headers.insert("Accept".to_string(), "application/json".to_string());
        Self {
            base_url: base_url.into(),
            default_headers,
            bearer_token: None,
            transport,
        }
    }

    /// Set or clear the bearer token attached to requests.
    pub fn set_bearer_token(&mut self, token: Option<String>) {
        self.bearer_token = token;
    }

    /// Create a GET request.
    pub fn get(&self, path: &str) -> ClientRequestBuilder {
        self.request(Method::Get, path)
    }

    /// Create a POST request.
    pub fn post(&self, path: &str) -> ClientRequestBuilder {
        self.request(Method::Post, path)
    }

    /// Create a request with a custom method.
    pub fn request(&self, method: Method, path: &str) -> ClientRequestBuilder {
        let full_url = if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else {
            format!(
                "{}/{}",
                self.base_url.trim_end_matches('/'),
                path.trim_start_matches('/')
            )
        };

        let mut builder = RequestBuilder::new(method, full_url);
        for (key, value) in &self.default_headers {
            builder = builder.header(key.clone(), value.clone());
        }
        if let Some(token) = &self.bearer_token {
            builder = builder.bearer_auth(token);
        }

        ClientRequestBuilder {
            builder,
            transport: self.transport.clone(),
        }
    }
}

/// A request builder bound to a client.
pub struct ClientRequestBuilder {
    builder: RequestBuilder,
    transport: Arc<dyn Transport>,
}

impl ClientRequestBuilder {
    /// Append a query parameter.
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.builder = self.builder.query(key, value);
        self
    }

    /// Set the request body as JSON.
    pub fn json<T: Serialize + ?Sized>(mut self, value: &T) -> Result<Self, FetchError> {
        self.builder = self.builder.json(value)?;
        Ok(self)
    }

    /// Override the bearer token for this request only.
    pub fn bearer_auth(mut self, token: impl AsRef<str>) -> Self {
        self.builder = self.builder.bearer_auth(token);
        self
    }

    /// Send the request and return the response.
    pub async fn send(self) -> Result<Response, FetchError> {
        let method = self.builder.method().as_str();
        let url = self.builder.url.clone();
        tracing::debug!(method, %url, "http request");

        let response = self.transport.execute(self.builder).await;
        match &response {
            Ok(r) => tracing::debug!(method, %url, status = r.status, "http response"),
            Err(e) => tracing::warn!(method, %url, error = %e, "http request failed"),
        }
        response
    }
}

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{FetchClient, FetchError, Method, Response, StorefrontApi};
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::mock::ScriptedTransport;
    use serde_json::json;

    #[tokio::test]
    async fn test_paths_resolve_against_base_url() {
        let transport = Arc::new(ScriptedTransport::new().respond(200, json!({"success": true})));
        let client = FetchClient::with_transport("http://localhost:5000/api/", transport.clone());

        client.get("/products").send().await.unwrap();
        assert_eq!(
            transport.recorded()[0].url,
            "http://localhost:5000/api/products"
        );
    }

    #[tokio::test]
    async fn test_bearer_token_is_attached() {
        let transport = Arc::new(
            ScriptedTransport::new()
                .respond(200, json!({"success": true}))
                .respond(200, json!({"success": true})),
        );
        let mut client = FetchClient::with_transport("http://api.test", transport.clone());

        client.get("orders/user").send().await.unwrap();
        client.set_bearer_token(Some("tok".to_string()));
        client.get("orders/user").send().await.unwrap();

        let recorded = transport.recorded();
        assert_eq!(recorded[0].authorization, None);
        assert_eq!(recorded[1].authorization.as_deref(), Some("Bearer tok"));
    }

    #[tokio::test]
    async fn test_transport_errors_propagate() {
        let transport = Arc::new(ScriptedTransport::new());
        let client = FetchClient::with_transport("http://api.test", transport);
        assert!(matches!(
            client.get("products").send().await,
            Err(FetchError::RequestError(_))
        ));
    }
}
