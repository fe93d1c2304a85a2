use std::sync::Arc;

use crate::domain::account::errors::AccountError;
use crate::domain::account::services::AccountService;
use crate::domain::account::value_objects::AccountId;

/// Command for activating or deactivating an account
#[derive(Debug, Clone, Copy)]
pub struct SetAccountStatusCommand {
  pub account_id: AccountId,
  pub active: bool,
}

/// Use case for toggling whether an account may log in
pub struct SetAccountStatusUseCase {
  account_service: Arc<AccountService>,
}

impl SetAccountStatusUseCase {
  pub fn new(account_service: Arc<AccountService>) -> Self {
    Self { account_service }
  }

  pub async fn execute(&self, command: SetAccountStatusCommand) -> Result<(), AccountError> {
    if command.active {
      self.account_service.activate(command.account_id).await?;
      tracing::info!(account_id = %command.account_id, "Account activated");
    } else {
      self.account_service.deactivate(command.account_id).await?;
      tracing::info!(account_id = %command.account_id, "Account deactivated");
    }
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::application::account::test_support::{account_service, register};

  #[tokio::test]
  async fn test_toggle_status() {
    let service = account_service();
    let account = register(&service, "testuser", "test@example.com").await;
    let use_case = SetAccountStatusUseCase::new(service.clone());

    use_case
      .execute(SetAccountStatusCommand {
        account_id: account.id,
        active: false,
      })
      .await
      .unwrap();
    assert!(!service.get_profile(account.id).await.unwrap().is_active);

    use_case
      .execute(SetAccountStatusCommand {
        account_id: account.id,
        active: true,
      })
      .await
      .unwrap();
    assert!(service.get_profile(account.id).await.unwrap().is_active);
  }
}
