use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::account::entities::{AccountView, TokenPair};

/// Request for account registration
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
  #[validate(length(
    min = 3,
    max = 50,
    message = "Username must be between 3 and 50 characters"
  ))]
  pub username: String,

  #[validate(
    email(message = "Invalid email format"),
    length(max = 100, message = "Email must be at most 100 characters")
  )]
  pub email: String,

  #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
  pub password: String,

  #[serde(default)]
  #[validate(length(max = 50, message = "First name must be at most 50 characters"))]
  pub first_name: String,

  #[serde(default)]
  #[validate(length(max = 50, message = "Last name must be at most 50 characters"))]
  pub last_name: String,
}

/// Request for login
///
/// The email format is not checked here; a malformed address fails like a
/// wrong password.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
  #[validate(length(min = 1, message = "Email is required"))]
  pub email: String,

  #[validate(length(min = 1, message = "Password is required"))]
  pub password: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RefreshRequest {
  #[validate(length(min = 1, message = "Refresh token is required"))]
  pub refresh_token: String,
}

/// Request for replacing the caller's profile; absent fields are cleared
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateProfileRequest {
  #[serde(default)]
  #[validate(length(max = 50, message = "First name must be at most 50 characters"))]
  pub first_name: String,

  #[serde(default)]
  #[validate(length(max = 50, message = "Last name must be at most 50 characters"))]
  pub last_name: String,

  #[serde(default)]
  #[validate(length(max = 255, message = "Avatar must be at most 255 characters"))]
  pub avatar: String,

  #[serde(default)]
  #[validate(length(max = 50, message = "Timezone must be at most 50 characters"))]
  pub timezone: String,

  #[serde(default)]
  #[validate(length(max = 10, message = "Language must be at most 10 characters"))]
  pub language: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ChangePasswordRequest {
  #[validate(length(min = 1, message = "Current password is required"))]
  pub current_password: String,

  #[validate(length(min = 6, message = "New password must be at least 6 characters"))]
  pub new_password: String,
}

/// Query string for listing accounts
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListAccountsQuery {
  pub offset: Option<i64>,
  pub limit: Option<i64>,
}

/// Response after successful login
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
  pub account: AccountView,
  pub tokens: TokenPair,
}

/// A page of accounts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListAccountsResponse {
  pub accounts: Vec<AccountView>,
  pub total: i64,
  pub offset: i64,
  pub limit: i64,
}

/// Standard success response for operations without data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuccessResponse {
  pub message: String,
}

/// Standard error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
  /// Error type/code
  pub error: String,

  /// Human-readable error message
  pub message: String,

  #[serde(skip_serializing_if = "Option::is_none")]
  pub details: Option<serde_json::Value>,
}

#[cfg(test)]
mod tests {
  use super::*;

  fn register_request() -> RegisterRequest {
    RegisterRequest {
      username: "testuser".to_string(),
      email: "test@example.com".to_string(),
      password: "password123".to_string(),
      first_name: String::new(),
      last_name: String::new(),
    }
  }

  #[test]
  fn test_register_request_validation_valid() {
    assert!(register_request().validate().is_ok());
  }

  #[test]
  fn test_register_request_validation_invalid_fields() {
    let mut request = register_request();
    request.email = "invalid-email".to_string();
    assert!(request.validate().is_err());

    let mut request = register_request();
    request.password = "short".to_string();
    assert!(request.validate().is_err());

    let mut request = register_request();
    request.username = "ab".to_string();
    assert!(request.validate().is_err());
  }

  #[test]
  fn test_register_request_names_default_to_empty() {
    let request: RegisterRequest = serde_json::from_str(
      r#"{"username":"testuser","email":"test@example.com","password":"password123"}"#,
    )
    .unwrap();

    assert_eq!(request.first_name, "");
    assert!(request.validate().is_ok());
  }

  #[test]
  fn test_login_request_accepts_any_email_text() {
    let request = LoginRequest {
      email: "not-an-email".to_string(),
      password: "x".to_string(),
    };
    assert!(request.validate().is_ok());

    let empty = LoginRequest {
      email: String::new(),
      password: "x".to_string(),
    };
    assert!(empty.validate().is_err());
  }

  #[test]
  fn test_update_profile_limits() {
    let request: UpdateProfileRequest =
      serde_json::from_str(r#"{"language":"this-is-too-long"}"#).unwrap();
    assert!(request.validate().is_err());

    let request: UpdateProfileRequest = serde_json::from_str(r#"{}"#).unwrap();
    assert!(request.validate().is_ok());
  }
}
