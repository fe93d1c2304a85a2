use std::sync::Arc;

use crate::domain::account::entities::{AccountView, TokenPair};
use crate::domain::account::errors::AccountError;
use crate::domain::account::services::AccountService;
use crate::domain::account::value_objects::Password;

/// Command for logging in with email and password
#[derive(Debug, Clone)]
pub struct LoginAccountCommand {
  pub email: String,
  pub password: String,
}

/// Response after successful login
#[derive(Debug, Clone)]
pub struct LoginAccountResponse {
  pub account: AccountView,
  pub tokens: TokenPair,
}

/// Use case for logging in
pub struct LoginAccountUseCase {
  account_service: Arc<AccountService>,
}

impl LoginAccountUseCase {
  pub fn new(account_service: Arc<AccountService>) -> Self {
    Self { account_service }
  }

  /// Executes the login use case
  ///
  /// The email is not syntax-checked here: a malformed address simply matches
  /// no account and fails like any other bad credential.
  pub async fn execute(
    &self,
    command: LoginAccountCommand,
  ) -> Result<LoginAccountResponse, AccountError> {
    let outcome = self
      .account_service
      .login(command.email.trim(), Password::new(command.password))
      .await?;

    Ok(LoginAccountResponse {
      account: outcome.account,
      tokens: outcome.tokens,
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::application::account::test_support::{account_service, register};
  use crate::domain::account::errors::ErrorKind;

  #[tokio::test]
  async fn test_login_with_malformed_email_is_invalid_credentials() {
    let use_case = LoginAccountUseCase::new(account_service());

    let result = use_case
      .execute(LoginAccountCommand {
        email: "not-an-email".to_string(),
        password: "x".to_string(),
      })
      .await;

    assert_eq!(result.unwrap_err().kind(), ErrorKind::InvalidCredentials);
  }

  #[tokio::test]
  async fn test_login_returns_account_and_tokens() {
    let service = account_service();
    register(&service, "testuser", "test@example.com").await;
    let use_case = LoginAccountUseCase::new(service);

    let response = use_case
      .execute(LoginAccountCommand {
        email: " test@example.com ".to_string(),
        password: "password123".to_string(),
      })
      .await
      .unwrap();

    assert_eq!(response.account.username, "testuser");
    assert!(!response.tokens.access_token.is_empty());
    assert_ne!(response.tokens.access_token, response.tokens.refresh_token);
  }
}
