use std::sync::Arc;

use crate::domain::account::entities::AccountView;
use crate::domain::account::errors::AccountError;
use crate::domain::account::services::AccountService;

pub const DEFAULT_PAGE_SIZE: i64 = 20;
pub const MAX_PAGE_SIZE: i64 = 100;

/// Command for listing accounts
///
/// A missing or non-positive limit falls back to [`DEFAULT_PAGE_SIZE`];
/// larger limits are capped at [`MAX_PAGE_SIZE`].
#[derive(Debug, Clone, Default)]
pub struct ListAccountsCommand {
  pub offset: Option<i64>,
  pub limit: Option<i64>,
}

/// A page of accounts
#[derive(Debug, Clone)]
pub struct ListAccountsResponse {
  pub accounts: Vec<AccountView>,
  pub total: i64,
  pub offset: i64,
  pub limit: i64,
}

/// Use case for paging through accounts
pub struct ListAccountsUseCase {
  account_service: Arc<AccountService>,
}

impl ListAccountsUseCase {
  pub fn new(account_service: Arc<AccountService>) -> Self {
    Self { account_service }
  }

  pub async fn execute(
    &self,
    command: ListAccountsCommand,
  ) -> Result<ListAccountsResponse, AccountError> {
    let offset = command.offset.unwrap_or(0).max(0);
    let limit = match command.limit {
      Some(limit) if limit > 0 => limit.min(MAX_PAGE_SIZE),
      _ => DEFAULT_PAGE_SIZE,
    };

    let page = self.account_service.list_accounts(offset, limit).await?;

    Ok(ListAccountsResponse {
      accounts: page.accounts,
      total: page.total,
      offset,
      limit,
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::application::account::test_support::{account_service, register};

  #[tokio::test]
  async fn test_page_bounds() {
    let service = account_service();
    register(&service, "testuser", "test@example.com").await;
    let use_case = ListAccountsUseCase::new(service);

    let defaults = use_case.execute(ListAccountsCommand::default()).await.unwrap();
    assert_eq!(defaults.offset, 0);
    assert_eq!(defaults.limit, DEFAULT_PAGE_SIZE);
    assert_eq!(defaults.total, 1);
    assert_eq!(defaults.accounts.len(), 1);

    let capped = use_case
      .execute(ListAccountsCommand {
        offset: Some(-3),
        limit: Some(10_000),
      })
      .await
      .unwrap();
    assert_eq!(capped.offset, 0);
    assert_eq!(capped.limit, MAX_PAGE_SIZE);
  }
}
