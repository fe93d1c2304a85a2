use std::sync::Arc;

use crate::domain::account::errors::AccountError;
use crate::domain::account::services::AccountService;
use crate::domain::account::value_objects::{AccountId, Password};

/// Command for changing a password
#[derive(Debug, Clone)]
pub struct ChangePasswordCommand {
  pub account_id: AccountId,
  pub current_password: String,
  pub new_password: String,
}

/// Use case for changing the password of an authenticated account
pub struct ChangePasswordUseCase {
  account_service: Arc<AccountService>,
}

impl ChangePasswordUseCase {
  pub fn new(account_service: Arc<AccountService>) -> Self {
    Self { account_service }
  }

  /// # Errors
  /// `InvalidCredentials` when the current password does not match,
  /// `WeakPassword` when the new one is too short.
  pub async fn execute(&self, command: ChangePasswordCommand) -> Result<(), AccountError> {
    self
      .account_service
      .change_password(
        command.account_id,
        Password::new(command.current_password),
        Password::new(command.new_password),
      )
      .await
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::application::account::test_support::{account_service, register};
  use crate::domain::account::errors::ErrorKind;

  #[tokio::test]
  async fn test_change_password_requires_current() {
    let service = account_service();
    let account = register(&service, "testuser", "test@example.com").await;
    let use_case = ChangePasswordUseCase::new(service);

    let result = use_case
      .execute(ChangePasswordCommand {
        account_id: account.id,
        current_password: "wrong".to_string(),
        new_password: "newpassword456".to_string(),
      })
      .await;

    assert_eq!(result.unwrap_err().kind(), ErrorKind::InvalidCredentials);
  }
}
