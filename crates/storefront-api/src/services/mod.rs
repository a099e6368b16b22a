//! Typed endpoint methods.

mod auth;
mod orders;
mod products;

use crate::FetchClient;

/// The storefront backend's REST endpoints.
///
/// Implements [`storefront_core::checkout::OrderGateway`] and
/// [`storefront_auth::AuthBackend`].
#[derive(Debug, Clone)]
pub struct StorefrontApi {
    client: FetchClient,
}

impl StorefrontApi {
    pub fn new(client: FetchClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &FetchClient {
        &self.client
    }

    /// Set or clear the bearer token used for every call.
    pub fn set_token(&mut self, token: Option<&storefront_auth::AuthToken>) {
        self.client
            .set_bearer_token(token.map(|t| t.as_str().to_string()));
    }
}

#[cfg(test)]
pub(crate) fn scripted(
    responses: Vec<(u16, serde_json::Value)>,
) -> (
    StorefrontApi,
    std::sync::Arc<crate::transport::mock::ScriptedTransport>,
) {
    use crate::transport::mock::ScriptedTransport;

    let transport = responses
        .into_iter()
        .fold(ScriptedTransport::new(), |t, (status, body)| {
            t.respond(status, body)
        });
    let transport = std::sync::Arc::new(transport);
    let client = FetchClient::with_transport("http://localhost:5000/api", transport.clone());
    (StorefrontApi::new(client), transport)
}
