use std::sync::Arc;

use crate::domain::account::entities::TokenPair;
use crate::domain::account::errors::AccountError;
use crate::domain::account::services::AccountService;

/// Command for exchanging a refresh token
#[derive(Debug, Clone)]
pub struct RefreshTokensCommand {
  pub refresh_token: String,
}

/// Use case for rotating a session token pair
pub struct RefreshTokensUseCase {
  account_service: Arc<AccountService>,
}

impl RefreshTokensUseCase {
  pub fn new(account_service: Arc<AccountService>) -> Self {
    Self { account_service }
  }

  pub async fn execute(&self, command: RefreshTokensCommand) -> Result<TokenPair, AccountError> {
    self
      .account_service
      .refresh_tokens(&command.refresh_token)
      .await
  }
}
