//! Auth endpoints.
//!
//! Login and registration return `token` and `user` beside `success`
//! rather than under `data`.

use super::StorefrontApi;
use crate::FetchError;
use async_trait::async_trait;
use serde::Deserialize;
use storefront_auth::{
    AuthBackend, AuthError, AuthResponse, AuthToken, LoginRequest, RegisterRequest, User,
};

#[derive(Deserialize)]
struct MeResponse {
    user: User,
}

impl StorefrontApi {
    /// `POST /auth/login`
    pub async fn login(&self, request: &LoginRequest) -> Result<AuthResponse, FetchError> {
        self.client
            .post("auth/login")
            .json(request)?
            .send()
            .await?
            .into_body()
    }

    /// `POST /auth/register`
    pub async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse, FetchError> {
        self.client
            .post("auth/register")
            .json(request)?
            .send()
            .await?
            .into_body()
    }

    /// `GET /auth/me` with an explicit token.
    pub async fn me(&self, token: &AuthToken) -> Result<User, FetchError> {
        let response: MeResponse = self
            .client
            .get("auth/me")
            .bearer_auth(token.as_str())
            .send()
            .await?
            .into_body()?;
        Ok(response.user)
    }
}

#[async_trait]
impl AuthBackend for StorefrontApi {
    async fn login(&self, request: &LoginRequest) -> Result<AuthResponse, AuthError> {
        Ok(StorefrontApi::login(self, request).await?)
    }

    async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse, AuthError> {
        Ok(StorefrontApi::register(self, request).await?)
    }

    async fn current_user(&self, token: &AuthToken) -> Result<User, AuthError> {
        Ok(self.me(token).await?)
    }
}

#[cfg(test)]
mod tests {
    use crate::services::scripted;
    use serde_json::json;
    use storefront_auth::{AuthManager, AuthToken};
    use storefront_cache::Cache;

    fn user_json() -> serde_json::Value {
        json!({"id": 2, "username": "grace", "email": "grace@example.com", "firstName": "Grace", "lastName": "Hopper"})
    }

    #[tokio::test]
    async fn test_login_through_manager() {
        let (mut api, transport) = scripted(vec![
            (200, json!({"success": true, "token": "h.e30.s", "user": user_json()})),
            (200, json!({"success": true, "data": []})),
        ]);
        let mut auth = AuthManager::new(Cache::in_memory());

        let user = auth.login(&api, "grace@example.com", "cobol").await.unwrap();
        assert_eq!(user.display_name(), "Grace Hopper");

        api.set_token(auth.token());
        api.user_orders().await.unwrap();

        let recorded = transport.recorded();
        assert_eq!(
            recorded[0].body,
            Some(json!({"email": "grace@example.com", "password": "cobol"}))
        );
        assert_eq!(recorded[1].authorization.as_deref(), Some("Bearer h.e30.s"));
    }

    #[tokio::test]
    async fn test_login_failure_message() {
        let (api, _) = scripted(vec![(
            401,
            json!({"success": false, "error": "Invalid credentials"}),
        )]);
        let mut auth = AuthManager::new(Cache::in_memory());

        assert!(auth.login(&api, "x@y.z", "nope").await.is_err());
        assert_eq!(auth.error(), Some("Invalid credentials"));
    }

    #[tokio::test]
    async fn test_me_sends_explicit_token() {
        let (api, transport) = scripted(vec![(200, json!({"success": true, "user": user_json()}))]);
        let user = api.me(&AuthToken::new("abc")).await.unwrap();
        assert_eq!(user.username, "grace");
        assert_eq!(transport.recorded()[0].authorization.as_deref(), Some("Bearer abc"));
    }
}
