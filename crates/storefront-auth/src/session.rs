//! Auth session state.
//!
//! [`AuthManager`] holds the signed-in user and bearer token for one
//! storefront session and keeps the token persisted across runs. Network
//! calls go through an [`AuthBackend`] passed into each operation.

use crate::token::{AuthToken, TokenStore};
use crate::user::{AuthResponse, LoginRequest, RegisterRequest, User};
use crate::AuthError;
use async_trait::async_trait;
use storefront_cache::Cache;

/// Message recorded when login fails without a server message.
pub const MSG_LOGIN_FAILED: &str = "Login failed";
/// Message recorded when registration fails without a server message.
pub const MSG_REGISTRATION_FAILED: &str = "Registration failed";
/// Message recorded when a stored token is rejected by the server.
pub const MSG_AUTH_FAILED: &str = "Authentication failed";

/// Auth endpoints.
#[async_trait]
pub trait AuthBackend: Send + Sync {
    /// `POST /auth/login`
    async fn login(&self, request: &LoginRequest) -> Result<AuthResponse, AuthError>;

    /// `POST /auth/register`
    async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse, AuthError>;

    /// `GET /auth/me` with `token` as bearer.
    async fn current_user(&self, token: &AuthToken) -> Result<User, AuthError>;
}

/// The session's authentication state.
#[derive(Debug)]
pub struct AuthManager {
    store: TokenStore,
    token: Option<AuthToken>,
    user: Option<User>,
    error: Option<String>,
}

impl AuthManager {
    /// Create a signed-out manager persisting into `cache`.
    pub fn new(cache: Cache) -> Self {
        Self {
            store: TokenStore::new(cache),
            token: None,
            user: None,
            error: None,
        }
    }

    /// Restore the session from the persisted token.
    ///
    /// Expired tokens are dropped silently and undecodable ones are dropped
    /// with "Authentication failed" recorded, both without a network call. A
    /// token the server rejects is dropped with the same message. Never fails; the outcome is read through the accessors.
    pub async fn init<B: AuthBackend + ?Sized>(&mut self, backend: &B) {
        let token = match self.store.load() {
            Ok(Some(token)) => token,
            Ok(None) => {
                self.reset();
                return;
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to read stored token");
                self.reset();
                return;
            }
        };

        match token.validate() {
            Ok(()) => {}
            Err(AuthError::TokenExpired) => {
                tracing::info!("dropping expired token");
                self.logout();
                return;
            }
            Err(e) => {
                tracing::warn!(error = %e, "stored token is unreadable");
                self.logout();
                self.error = Some(MSG_AUTH_FAILED.to_string());
                return;
            }
        }

        match backend.current_user(&token).await {
            Ok(user) => {
                tracing::info!(user_id = %user.id, "session restored");
                self.token = Some(token);
                self.user = Some(user);
                self.error = None;
            }
            Err(e) => {
                tracing::info!(error = %e, "stored token rejected");
                self.logout();
                self.error = Some(MSG_AUTH_FAILED.to_string());
            }
        }
    }

    /// Sign in with email and password.
    pub async fn login<B: AuthBackend + ?Sized>(
        &mut self,
        backend: &B,
        email: &str,
        password: &str,
    ) -> Result<&User, AuthError> {
        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let result = backend.login(&request).await;
        self.accept(result, MSG_LOGIN_FAILED)
    }

    /// Create an account and sign in.
    pub async fn register<B: AuthBackend + ?Sized>(
        &mut self,
        backend: &B,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<&User, AuthError> {
        let request = RegisterRequest {
            username: username.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        };
        let result = backend.register(&request).await;
        self.accept(result, MSG_REGISTRATION_FAILED)
    }

    fn accept(
        &mut self,
        result: Result<AuthResponse, AuthError>,
        fallback: &str,
    ) -> Result<&User, AuthError> {
        match result {
            Ok(response) => {
                if let Err(e) = self.store.save(&response.token) {
                    tracing::warn!(error = %e, "failed to persist token");
                }
                tracing::info!(user_id = %response.user.id, "signed in");
                self.token = Some(response.token);
                self.error = None;
                Ok(&*self.user.insert(response.user))
            }
            Err(e) => {
                self.error = Some(e.user_message(fallback));
                Err(e)
            }
        }
    }

    /// Sign out and forget the stored token.
    pub fn logout(&mut self) {
        if let Err(e) = self.store.clear() {
            tracing::warn!(error = %e, "failed to remove stored token");
        }
        if self.user.is_some() {
            tracing::info!("signed out");
        }
        self.reset();
    }

    fn reset(&mut self) {
        self.token = None;
        self.user = None;
        self.error = None;
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some() && self.token.is_some()
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// Bearer token to attach to API calls.
    pub fn token(&self) -> Option<&AuthToken> {
        self.token.as_ref()
    }

    /// Last recorded error message.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::{jwt_with_payload, TOKEN_STORAGE_KEY};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use storefront_core::ids::UserId;

    struct FakeBackend {
        reject: Option<&'static str>,
        me_calls: AtomicUsize,
    }

    impl FakeBackend {
        fn new(reject: Option<&'static str>) -> Self {
            Self {
                reject,
                me_calls: AtomicUsize::new(0),
            }
        }

        fn user() -> User {
            User {
                id: UserId::new(7),
                username: "ada".to_string(),
                email: "ada@example.com".to_string(),
                first_name: None,
                last_name: None,
            }
        }

        fn respond(&self) -> Result<AuthResponse, AuthError> {
            match self.reject {
                Some(message) => Err(AuthError::Backend(message.to_string())),
                None => Ok(AuthResponse {
                    token: jwt_with_payload(r#"{"sub": 7}"#),
                    user: Self::user(),
                }),
            }
        }
    }

    #[async_trait]
    impl AuthBackend for FakeBackend {
        async fn login(&self, _request: &LoginRequest) -> Result<AuthResponse, AuthError> {
            self.respond()
        }

        async fn register(&self, _request: &RegisterRequest) -> Result<AuthResponse, AuthError> {
            self.respond()
        }

        async fn current_user(&self, _token: &AuthToken) -> Result<User, AuthError> {
            self.me_calls.fetch_add(1, Ordering::SeqCst);
            match self.reject {
                Some(message) => Err(AuthError::Backend(message.to_string())),
                None => Ok(Self::user()),
            }
        }
    }

    #[tokio::test]
    async fn test_init_without_token_is_signed_out() {
        let backend = FakeBackend::new(None);
        let mut auth = AuthManager::new(Cache::in_memory());
        auth.init(&backend).await;

        assert!(!auth.is_authenticated());
        assert_eq!(backend.me_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_expired_token_is_dropped_without_network() {
        let cache = Cache::in_memory();
        cache
            .set(TOKEN_STORAGE_KEY, &jwt_with_payload(r#"{"exp": 1000}"#))
            .unwrap();
        let backend = FakeBackend::new(None);
        let mut auth = AuthManager::new(cache.clone());
        auth.init(&backend).await;

        assert!(!auth.is_authenticated());
        assert_eq!(auth.error(), None);
        assert_eq!(backend.me_calls.load(Ordering::SeqCst), 0);
        assert!(!cache.exists(TOKEN_STORAGE_KEY).unwrap());
    }

    #[tokio::test]
    async fn test_undecodable_token_is_dropped_with_error() {
        let cache = Cache::in_memory();
        cache
            .set(TOKEN_STORAGE_KEY, &AuthToken::new("not-a-jwt"))
            .unwrap();
        let backend = FakeBackend::new(None);
        let mut auth = AuthManager::new(cache.clone());
        auth.init(&backend).await;

        assert!(!auth.is_authenticated());
        assert_eq!(auth.error(), Some(MSG_AUTH_FAILED));
        assert_eq!(backend.me_calls.load(Ordering::SeqCst), 0);
        assert!(!cache.exists(TOKEN_STORAGE_KEY).unwrap());
    }

    #[tokio::test]
    async fn test_valid_token_restores_user() {
        let cache = Cache::in_memory();
        let far_future = chrono::Utc::now().timestamp() + 3600;
        cache
            .set(
                TOKEN_STORAGE_KEY,
                &jwt_with_payload(&format!(r#"{{"exp": {}}}"#, far_future)),
            )
            .unwrap();
        let backend = FakeBackend::new(None);
        let mut auth = AuthManager::new(cache);
        auth.init(&backend).await;

        assert!(auth.is_authenticated());
        assert_eq!(auth.user().map(|u| u.username.as_str()), Some("ada"));
        assert_eq!(backend.me_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_rejected_token_signs_out_with_error() {
        let cache = Cache::in_memory();
        cache
            .set(TOKEN_STORAGE_KEY, &jwt_with_payload(r#"{"sub": 7}"#))
            .unwrap();
        let backend = FakeBackend::new(Some("Token has been revoked"));
        let mut auth = AuthManager::new(cache.clone());
        auth.init(&backend).await;

        assert!(!auth.is_authenticated());
        assert_eq!(auth.error(), Some(MSG_AUTH_FAILED));
        assert!(!cache.exists(TOKEN_STORAGE_KEY).unwrap());
    }

    #[tokio::test]
    async fn test_login_persists_token() {
        let cache = Cache::in_memory();
        let backend = FakeBackend::new(None);
        let mut auth = AuthManager::new(cache.clone());

        let user = auth.login(&backend, "ada@example.com", "pw").await.unwrap();
        assert_eq!(user.id, UserId::new(7));
        assert!(auth.is_authenticated());
        assert!(cache.exists(TOKEN_STORAGE_KEY).unwrap());

        auth.logout();
        assert!(!auth.is_authenticated());
        assert!(!cache.exists(TOKEN_STORAGE_KEY).unwrap());
    }

    #[tokio::test]
    async fn test_login_failure_records_server_message() {
        let backend = FakeBackend::new(Some("Invalid credentials"));
        let mut auth = AuthManager::new(Cache::in_memory());

        assert!(auth.login(&backend, "a@b.c", "bad").await.is_err());
        assert_eq!(auth.error(), Some("Invalid credentials"));
        assert!(!auth.is_authenticated());
    }

    #[tokio::test]
    async fn test_register_failure_falls_back_to_generic_message() {
        let backend = FakeBackend::new(Some(""));
        let mut auth = AuthManager::new(Cache::in_memory());

        assert!(auth.register(&backend, "ada", "a@b.c", "pw").await.is_err());
        assert_eq!(auth.error(), Some(MSG_REGISTRATION_FAILED));
    }
}
