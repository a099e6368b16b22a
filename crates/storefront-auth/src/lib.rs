//! Authentication for the storefront client.
//!
//! Persists the bearer token, drops expired tokens locally, and tracks the
//! signed-in user.

mod error;
mod session;
mod token;
mod user;

pub use error::AuthError;
pub use session::{
    AuthBackend, AuthManager, MSG_AUTH_FAILED, MSG_LOGIN_FAILED, MSG_REGISTRATION_FAILED,
};
pub use token::{AuthToken, TokenClaims, TokenStore, TOKEN_STORAGE_KEY};
pub use user::{AuthResponse, LoginRequest, RegisterRequest, User};
