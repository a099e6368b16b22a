//! User types and auth request/response bodies.

use serde::{Deserialize, Serialize};
use storefront_core::ids::UserId;

use crate::AuthToken;

/// A signed-in shopper.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// User ID.
    pub id: UserId,
    /// Login name.
    pub username: String,
    /// Email address.
    pub email: String,
    /// First name, if given.
    #[serde(default)]
    pub first_name: Option<String>,
    /// Last name, if given.
    #[serde(default)]
    pub last_name: Option<String>,
}

impl User {
    /// Full name when known, otherwise the username.
    pub fn display_name(&self) -> String {
        match (self.first_name.as_deref(), self.last_name.as_deref()) {
            (Some(first), Some(last)) => format!("{} {}", first, last),
            (Some(first), None) => first.to_string(),
            _ => self.username.clone(),
        }
    }
}

/// Body of `POST /auth/login`.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

/// Body of `POST /auth/register`.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for RegisterRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisterRequest")
            .field("username", &self.username)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

/// Successful login or registration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthResponse {
    /// Bearer token for subsequent requests.
    pub token: AuthToken,
    /// The signed-in user.
    pub user: User,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_deserializes_backend_shape() {
        let json = r#"{"id": 4, "username": "ada", "email": "ada@example.com", "firstName": "Ada", "lastName": null}"#;
        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.id, UserId::new(4));
        assert_eq!(user.display_name(), "Ada");
    }

    #[test]
    fn test_display_name_falls_back_to_username() {
        let user = User {
            id: UserId::new(1),
            username: "grace".to_string(),
            email: "grace@example.com".to_string(),
            first_name: None,
            last_name: None,
        };
        assert_eq!(user.display_name(), "grace");
    }

    #[test]
    fn test_auth_response_shape() {
        let json = r#"{"success": true, "token": "a.b.c", "user": {"id": 1, "username": "u", "email": "e"}}"#;
        let response: AuthResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.token.as_str(), "a.b.c");
    }

    #[test]
    fn test_login_debug_hides_password() {
        let request = LoginRequest {
            email: "a@b.c".to_string(),
            password: "hunter2".to_string(),
        };
        assert!(!format!("{:?}", request).contains("hunter2"));
    }
}
