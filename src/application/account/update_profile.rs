use std::sync::Arc;

use crate::domain::account::entities::{AccountView, ProfileUpdate};
use crate::domain::account::errors::AccountError;
use crate::domain::account::services::AccountService;
use crate::domain::account::value_objects::AccountId;

/// Command for replacing an account's profile fields
///
/// Every field is written; leaving one empty clears it.
#[derive(Debug, Clone)]
pub struct UpdateProfileCommand {
  pub account_id: AccountId,
  pub first_name: String,
  pub last_name: String,
  pub avatar: String,
  pub timezone: String,
  pub language: String,
}

/// Use case for updating a profile
pub struct UpdateProfileUseCase {
  account_service: Arc<AccountService>,
}

impl UpdateProfileUseCase {
  pub fn new(account_service: Arc<AccountService>) -> Self {
    Self { account_service }
  }

  pub async fn execute(&self, command: UpdateProfileCommand) -> Result<AccountView, AccountError> {
    let profile = ProfileUpdate {
      first_name: command.first_name,
      last_name: command.last_name,
      avatar: command.avatar,
      timezone: command.timezone,
      language: command.language,
    };

    self
      .account_service
      .update_profile(command.account_id, profile)
      .await
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::application::account::test_support::{account_service, register};

  #[tokio::test]
  async fn test_update_profile() {
    let service = account_service();
    let account = register(&service, "testuser", "test@example.com").await;
    let use_case = UpdateProfileUseCase::new(service);

    let updated = use_case
      .execute(UpdateProfileCommand {
        account_id: account.id,
        first_name: "Grace".to_string(),
        last_name: "Hopper".to_string(),
        avatar: String::new(),
        timezone: "America/New_York".to_string(),
        language: "en-US".to_string(),
      })
      .await
      .unwrap();

    assert_eq!(updated.first_name, "Grace");
    assert_eq!(updated.timezone, "America/New_York");
    assert_eq!(updated.language, "en-US");
    assert_eq!(updated.username, "testuser");
  }
}
