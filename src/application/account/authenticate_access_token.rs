use std::sync::Arc;

use crate::domain::account::entities::AuthenticatedAccount;
use crate::domain::account::errors::AccountError;
use crate::domain::account::services::AccountService;

/// Use case for resolving a bearer access token to an identity
///
/// Only the token is checked; a deactivated account keeps working with an
/// access token issued before deactivation until that token expires.
pub struct AuthenticateAccessTokenUseCase {
  account_service: Arc<AccountService>,
}

impl AuthenticateAccessTokenUseCase {
  pub fn new(account_service: Arc<AccountService>) -> Self {
    Self { account_service }
  }

  pub fn execute(&self, access_token: &str) -> Result<AuthenticatedAccount, AccountError> {
    self.account_service.authenticate(access_token)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::application::account::test_support::{account_service, login, register};
  use crate::domain::account::errors::ErrorKind;

  #[tokio::test]
  async fn test_authenticate() {
    let service = account_service();
    let account = register(&service, "testuser", "test@example.com").await;
    let tokens = login(&service, "test@example.com").await;
    let use_case = AuthenticateAccessTokenUseCase::new(service);

    let identity = use_case.execute(&tokens.access_token).unwrap();
    assert_eq!(identity.id, account.id);
    assert_eq!(identity.email, "test@example.com");

    assert_eq!(
      use_case
        .execute(&tokens.refresh_token)
        .unwrap_err()
        .kind(),
      ErrorKind::InvalidToken
    );
  }
}
