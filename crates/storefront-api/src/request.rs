//! HTTP request builder.

use crate::FetchError;
use serde::Serialize;
use std::collections::HashMap;
use url::Url;

/// HTTP methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    /// Convert to HTTP method string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
        }
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
        }
    }
}

/// A builder for constructing HTTP requests.
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    pub(crate) method: Method,
    pub(crate) url: String,
    pub(crate) query: Vec<(String, String)>,
    pub(crate) headers: HashMap<String, String>,
    pub(crate) body: Option<Vec<u8>>,
}

impl RequestBuilder {
    /// Create a new request builder.
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            query: Vec::new(),
            headers: HashMap::new(),
            body: None,
        }
    }

    pub fn method(&self) -> Method {
        self.method
    }

    /// Add a header to the request.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Append a query parameter. Values are percent-encoded when the URL is
    /// built.
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Set the request body as JSON.
    pub fn json<T: Serialize + ?Sized>(mut self, value: &T) -> Result<Self, FetchError> {
        let json = serde_json::to_vec(value)?;
        self.headers
            .insert("Content-Type".to_string(), "application/json".to_string());
        self.body = Some(json);
        Ok(self)
    }

    /// Add a bearer token authorization header.
    pub fn bearer_auth(self, token: impl AsRef<str>) -> Self {
        self.header("Authorization", format!("Bearer {}", token.as_ref()))
    }

    /// Get a header value (case-insensitive).
    pub fn get_header(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }

    /// Request body, if any.
    pub fn body_bytes(&self) -> Option<&[u8]> {
        self.body.as_deref()
    }

    /// The absolute URL with query parameters applied.
    pub fn build_url(&self) -> Result<Url, FetchError> {
        let mut url = Url::parse(&self.url)?;
        if !self.query.is_empty() {
            url.query_pairs_mut().extend_pairs(self.query.iter());
        }
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_is_encoded() {
        let request = RequestBuilder::new(Method::Get, "http://localhost:5000/api/products/search")
            .query("q", "red & blue shirts");
        assert_eq!(
            request.build_url().unwrap().as_str(),
            "http://localhost:5000/api/products/search?q=red+%26+blue+shirts"
        );
    }

    #[test]
    fn test_invalid_url() {
        let request = RequestBuilder::new(Method::Get, "/products");
        assert!(matches!(request.build_url(), Err(FetchError::InvalidUrl(_))));
    }

    #[test]
    fn test_json_sets_content_type() {
        let request = RequestBuilder::new(Method::Post, "http://x/")
            .json(&serde_json::json!({"a": 1}))
            .unwrap();
        assert_eq!(request.get_header("content-type"), Some("application/json"));
        assert_eq!(request.body_bytes(), Some(br#"{"a":1}"#.as_slice()));
    }

    #[test]
    fn test_bearer_auth_header() {
        let bearer = RequestBuilder::new(Method::Get, "http://x/").bearer_auth("abc");
        assert_eq!(bearer.get_header("Authorization"), Some("Bearer abc"));
    }
}
