use actix_web::{
  HttpResponse,
  error::ResponseError,
  http::{StatusCode, header::ContentType},
};
use std::fmt;

use crate::domain::account::errors::{AccountError, ErrorKind};

use super::dtos::ErrorResponse;

/// API error type that maps domain errors to HTTP responses
#[derive(Debug)]
pub enum ApiError {
  /// Malformed input or weak password (400 Bad Request)
  Validation(String),

  /// Authentication and account-state errors (401, 404 or 409)
  Auth(AuthErrorKind),

  /// Internal server error (500 Internal Server Error)
  Internal(String),
}

/// Authentication error kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthErrorKind {
  /// Unknown email, wrong password or deactivated account (401)
  InvalidCredentials,

  /// Missing, malformed, expired or wrong-kind token (401)
  InvalidToken,

  /// Email already registered (409)
  EmailAlreadyExists,

  /// Username already taken (409)
  UsernameAlreadyExists,

  /// Account not found (404)
  AccountNotFound,
}

impl fmt::Display for ApiError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ApiError::Validation(msg) => write!(f, "Validation error: {}", msg),
      ApiError::Auth(kind) => write!(f, "Authentication error: {:?}", kind),
      ApiError::Internal(msg) => write!(f, "Internal error: {}", msg),
    }
  }
}

impl ResponseError for ApiError {
  fn status_code(&self) -> StatusCode {
    match self {
      ApiError::Validation(_) => StatusCode::BAD_REQUEST,
      ApiError::Auth(kind) => match kind {
        AuthErrorKind::InvalidCredentials => StatusCode::UNAUTHORIZED,
        AuthErrorKind::InvalidToken => StatusCode::UNAUTHORIZED,
        AuthErrorKind::EmailAlreadyExists => StatusCode::CONFLICT,
        AuthErrorKind::UsernameAlreadyExists => StatusCode::CONFLICT,
        AuthErrorKind::AccountNotFound => StatusCode::NOT_FOUND,
      },
      ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }

  fn error_response(&self) -> HttpResponse {
    let status = self.status_code();
    let (error_type, message) = match self {
      ApiError::Validation(msg) => ("validation_error", msg.clone()),
      ApiError::Auth(kind) => match kind {
        AuthErrorKind::InvalidCredentials => (
          "invalid_credentials",
          "Invalid email or password".to_string(),
        ),
        AuthErrorKind::InvalidToken => (
          "invalid_token",
          "Invalid or missing authorization token".to_string(),
        ),
        AuthErrorKind::EmailAlreadyExists => (
          "email_already_exists",
          "An account with this email already exists".to_string(),
        ),
        AuthErrorKind::UsernameAlreadyExists => (
          "username_already_exists",
          "An account with this username already exists".to_string(),
        ),
        AuthErrorKind::AccountNotFound => ("account_not_found", "Account not found".to_string()),
      },
      ApiError::Internal(msg) => {
        // Don't expose internal error details
        tracing::error!("Internal error: {}", msg);
        (
          "internal_error",
          "An internal server error occurred".to_string(),
        )
      }
    };

    let error_response = ErrorResponse {
      error: error_type.to_string(),
      message,
      details: None,
    };

    HttpResponse::build(status)
      .content_type(ContentType::json())
      .json(error_response)
  }
}

/// Convert AccountError to ApiError
impl From<AccountError> for ApiError {
  fn from(error: AccountError) -> Self {
    match error.kind() {
      ErrorKind::DuplicateEmail => ApiError::Auth(AuthErrorKind::EmailAlreadyExists),
      ErrorKind::DuplicateUsername => ApiError::Auth(AuthErrorKind::UsernameAlreadyExists),
      ErrorKind::InvalidCredentials => ApiError::Auth(AuthErrorKind::InvalidCredentials),
      ErrorKind::NotFound => ApiError::Auth(AuthErrorKind::AccountNotFound),
      ErrorKind::InvalidToken => {
        tracing::debug!(error = %error, "Rejected token");
        ApiError::Auth(AuthErrorKind::InvalidToken)
      }
      ErrorKind::WeakPassword | ErrorKind::Validation => ApiError::Validation(error.to_string()),
      ErrorKind::Internal => ApiError::Internal(error.to_string()),
    }
  }
}

/// Convert validation errors from validator crate
impl From<validator::ValidationErrors> for ApiError {
  fn from(errors: validator::ValidationErrors) -> Self {
    let mut messages: Vec<String> = errors
      .field_errors()
      .iter()
      .flat_map(|(field, errors)| {
        errors
          .iter()
          .map(|error| {
            error
              .message
              .as_ref()
              .map(|m| m.to_string())
              .unwrap_or_else(|| format!("Invalid field: {}", field))
          })
          .collect::<Vec<_>>()
      })
      .collect();
    messages.sort();

    ApiError::Validation(messages.join(", "))
  }
}
