use std::sync::Arc;

use crate::domain::account::entities::AccountView;
use crate::domain::account::errors::AccountError;
use crate::domain::account::services::AccountService;
use crate::domain::account::value_objects::AccountId;

/// Use case for reading an account's public profile
pub struct GetProfileUseCase {
  account_service: Arc<AccountService>,
}

impl GetProfileUseCase {
  pub fn new(account_service: Arc<AccountService>) -> Self {
    Self { account_service }
  }

  pub async fn execute(&self, account_id: AccountId) -> Result<AccountView, AccountError> {
    self.account_service.get_profile(account_id).await
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::application::account::test_support::{account_service, register};
  use crate::domain::account::errors::ErrorKind;

  #[tokio::test]
  async fn test_get_profile() {
    let service = account_service();
    let account = register(&service, "testuser", "test@example.com").await;
    let use_case = GetProfileUseCase::new(service);

    assert_eq!(use_case.execute(account.id).await.unwrap(), account);
    assert_eq!(
      use_case
        .execute(AccountId::new(12345))
        .await
        .unwrap_err()
        .kind(),
      ErrorKind::NotFound
    );
  }
}
