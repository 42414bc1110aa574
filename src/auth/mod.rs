pub mod extractors;
pub mod middleware;
pub mod password;
pub mod token;

use serde::{Deserialize, Serialize};
use validator::Validate;

// Re-export necessary items
pub use extractors::CurrentUser;
pub use middleware::AuthMiddleware;
pub use password::{hash_password, verify_password};
pub use token::{issue_access_token, verify_access_token, Claims};

/// Represents the payload for a user login request.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    /// User's email address.
    /// Must be a valid email format.
    #[validate(email)]
    pub email: String,
    /// User's password.
    pub password: String,
}

/// Represents the payload for a new user registration request.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Email address for the new account. Doubles as the login handle;
    /// must be a valid email format and unique across users.
    #[validate(email)]
    pub email: String,
    /// Password for the new account. No strength or length rules are
    /// imposed; the hash is what gets stored either way.
    pub password: String,
    /// Optional display name.
    pub name: Option<String>,
}

/// Response structure after a successful login.
///
/// The refresh token is a second access token with identical claims; there is
/// no distinct refresh semantics, rotation, or server-side revocation. Known
/// weak point carried over from the product's current design.
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    /// The signed access token for bearer authentication.
    pub access_token: String,
    /// See note above: shaped like the access token, no extra semantics.
    pub refresh_token: String,
    /// Always "bearer".
    pub token_type: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn test_login_request_validation() {
        let valid_login = LoginRequest {
            email: "test@example.com".to_string(),
            password: "pw123".to_string(),
        };
        assert!(valid_login.validate().is_ok());

        let invalid_email_login = LoginRequest {
            email: "testexample.com".to_string(),
            password: "pw123".to_string(),
        };
        assert!(invalid_email_login.validate().is_err());
    }

    #[test]
    fn test_register_request_validation() {
        let valid_register = RegisterRequest {
            email: "test@example.com".to_string(),
            password: "pw123".to_string(),
            name: Some("Test User".to_string()),
        };
        assert!(valid_register.validate().is_ok());

        let no_name_register = RegisterRequest {
            email: "test@example.com".to_string(),
            password: "pw123".to_string(),
            name: None,
        };
        assert!(no_name_register.validate().is_ok(), "name is optional");

        let invalid_email_register = RegisterRequest {
            email: "not-an-email".to_string(),
            password: "pw123".to_string(),
            name: None,
        };
        assert!(invalid_email_register.validate().is_err());

        // No password rules: even an empty password is accepted as-is
        let empty_password_register = RegisterRequest {
            email: "test@example.com".to_string(),
            password: "".to_string(),
            name: None,
        };
        assert!(empty_password_register.validate().is_ok());
    }
}
