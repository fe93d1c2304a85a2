use std::sync::Arc;

use crate::domain::account::entities::AccountView;
use crate::domain::account::errors::AccountError;
use crate::domain::account::services::AccountService;
use crate::domain::account::value_objects::{Email, Password, Username};

/// Command for registering a new account
#[derive(Debug, Clone)]
pub struct RegisterAccountCommand {
  pub username: String,
  pub email: String,
  /// Plain text, hashed before it is stored
  pub password: String,
  pub first_name: String,
  pub last_name: String,
}

/// Response after successful registration
#[derive(Debug, Clone)]
pub struct RegisterAccountResponse {
  pub account: AccountView,
}

/// Use case for registering a new account
pub struct RegisterAccountUseCase {
  account_service: Arc<AccountService>,
}

impl RegisterAccountUseCase {
  pub fn new(account_service: Arc<AccountService>) -> Self {
    Self { account_service }
  }

  /// Executes the registration use case
  ///
  /// # Errors
  /// Returns `AccountError::Validation` for a malformed email or username,
  /// otherwise whatever [`AccountService::register`] reports.
  pub async fn execute(
    &self,
    command: RegisterAccountCommand,
  ) -> Result<RegisterAccountResponse, AccountError> {
    let username = Username::new(command.username)?;
    let email = Email::new(command.email)?;
    let password = Password::new(command.password);

    let account = self
      .account_service
      .register(
        username,
        email,
        password,
        command.first_name,
        command.last_name,
      )
      .await?;

    Ok(RegisterAccountResponse { account })
  }
}
