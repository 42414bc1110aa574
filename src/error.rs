//!
//! # Custom Error Handling
//!
//! This module defines the custom error type `AppError` used throughout the application.
//! It centralizes error management, providing a consistent way to handle and represent
//! the error conditions that can occur, from database issues to validation failures.
//!
//! `AppError` implements `actix_web::error::ResponseError` to seamlessly convert
//! application errors into HTTP responses with JSON bodies. It also provides `From`
//! implementations for `sqlx::Error`, `validator::ValidationErrors`, and
//! `bcrypt::BcryptError`, allowing conversion with the `?` operator.
//!
//! Two deliberate collapses happen at this boundary: every `Unauthorized` response
//! carries the same shape regardless of which credential check failed, and every
//! 500-class response carries a generic body while the underlying cause only goes
//! to the log.

use actix_web::{error::ResponseError, http::header, HttpResponse};
use serde_json::json;
use std::fmt;
use validator::ValidationErrors;

/// Represents all possible errors that can occur within the application.
#[derive(Debug)]
pub enum AppError {
    /// A request conflicts with existing state, e.g. registering an email
    /// that is already taken (HTTP 400).
    Conflict(String),
    /// Authentication is missing, invalid, or failed (HTTP 401).
    /// The response includes a `WWW-Authenticate: Bearer` challenge.
    Unauthorized(String),
    /// The requested resource does not exist — or is not owned by the
    /// requester, which is indistinguishable by design (HTTP 404).
    NotFound(String),
    /// An unexpected server-side error (HTTP 500). The message is logged,
    /// never sent to the client.
    Internal(String),
    /// An error originating from database operations (HTTP 500).
    /// Wraps errors from the `sqlx` crate; logged, never sent to the client.
    Database(String),
    /// Failed input validation (HTTP 422 Unprocessable Entity).
    /// Wraps errors from the `validator` crate.
    Validation(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            AppError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            AppError::Internal(msg) => write!(f, "Internal Server Error: {}", msg),
            AppError::Database(msg) => write!(f, "Database Error: {}", msg),
            AppError::Validation(msg) => write!(f, "Validation Error: {}", msg),
        }
    }
}

/// Converts `AppError` variants into `HttpResponse` objects.
///
/// This implementation lets Actix Web translate `AppError` results from
/// handlers and middleware into the correct status codes and JSON bodies.
impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::Conflict(msg) => HttpResponse::BadRequest().json(json!({
                "error": msg
            })),
            AppError::Unauthorized(msg) => HttpResponse::Unauthorized()
                .insert_header((header::WWW_AUTHENTICATE, "Bearer"))
                .json(json!({
                    "error": msg
                })),
            AppError::NotFound(msg) => HttpResponse::NotFound().json(json!({
                "error": msg
            })),
            // Internal and database causes stay in the log; the client sees
            // a fixed body with no internal detail.
            AppError::Internal(msg) | AppError::Database(msg) => {
                log::error!("internal error: {}", msg);
                HttpResponse::InternalServerError().json(json!({
                    "error": "Internal server error"
                }))
            }
            AppError::Validation(msg) => HttpResponse::UnprocessableEntity().json(json!({
                "error": msg
            })),
        }
    }
}

/// Converts `sqlx::Error` into `AppError`.
///
/// `sqlx::Error::RowNotFound` maps to `AppError::NotFound`; everything else
/// becomes `AppError::Database`.
impl From<sqlx::Error> for AppError {
    fn from(error: sqlx::Error) -> AppError {
        match error {
            sqlx::Error::RowNotFound => AppError::NotFound("Record not found".into()),
            _ => AppError::Database(error.to_string()),
        }
    }
}

/// Converts `validator::ValidationErrors` into `AppError::Validation`,
/// preserving the detailed validation messages.
impl From<ValidationErrors> for AppError {
    fn from(error: ValidationErrors) -> AppError {
        AppError::Validation(error.to_string())
    }
}

/// Converts `bcrypt::BcryptError` into `AppError::Internal`.
///
/// Only hashing can surface this; verification collapses bcrypt errors to
/// `false` before they reach the caller (see `auth::password`).
impl From<bcrypt::BcryptError> for AppError {
    fn from(error: bcrypt::BcryptError) -> AppError {
        AppError::Internal(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_responses() {
        // Test Conflict (maps to 400 per the API contract)
        let error = AppError::Conflict("Email already registered".into());
        let response = error.error_response();
        assert_eq!(response.status(), 400);

        // Test Unauthorized, including the bearer challenge header
        let error = AppError::Unauthorized("Could not validate credentials".into());
        let response = error.error_response();
        assert_eq!(response.status(), 401);
        assert_eq!(
            response
                .headers()
                .get(header::WWW_AUTHENTICATE)
                .and_then(|v| v.to_str().ok()),
            Some("Bearer")
        );

        // Test NotFound
        let error = AppError::NotFound("Todo not found".into());
        let response = error.error_response();
        assert_eq!(response.status(), 404);

        // Test Internal
        let error = AppError::Internal("Server error".into());
        let response = error.error_response();
        assert_eq!(response.status(), 500);

        // Test Validation
        let error = AppError::Validation("description too short".into());
        let response = error.error_response();
        assert_eq!(response.status(), 422);
    }

    #[test]
    fn test_sqlx_row_not_found_maps_to_not_found() {
        let error: AppError = sqlx::Error::RowNotFound.into();
        let response = error.error_response();
        assert_eq!(response.status(), 404);
    }
}
