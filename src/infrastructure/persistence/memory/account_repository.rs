use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;

use crate::domain::account::{
  entities::{Account, NewAccount},
  errors::RepositoryError,
  ports::AccountRepository,
  value_objects::AccountId,
};

/// Constraint names mirror the unique indexes of the `accounts` table
const EMAIL_CONSTRAINT: &str = "accounts_email_key";
const USERNAME_CONSTRAINT: &str = "accounts_username_key";

#[derive(Default)]
struct Store {
  next_id: i64,
  accounts: BTreeMap<AccountId, Account>,
}

impl Store {
  fn live(&self) -> impl DoubleEndedIterator<Item = &Account> {
    self
      .accounts
      .values()
      .filter(|account| account.deleted_at.is_none())
  }

  fn live_mut(&mut self, id: AccountId) -> Result<&mut Account, RepositoryError> {
    self
      .accounts
      .get_mut(&id)
      .filter(|account| account.deleted_at.is_none())
      .ok_or(RepositoryError::NotFound)
  }

  /// Rejects an email or username already used by another live account
  fn check_unique(
    &self,
    id: Option<AccountId>,
    email: &str,
    username: &str,
  ) -> Result<(), RepositoryError> {
    for account in self.live().filter(|account| Some(account.id) != id) {
      if account.email == email {
        return Err(RepositoryError::DuplicateKey(EMAIL_CONSTRAINT.to_string()));
      }
      if account.username == username {
        return Err(RepositoryError::DuplicateKey(
          USERNAME_CONSTRAINT.to_string(),
        ));
      }
    }
    Ok(())
  }
}

/// In-process account store with the same uniqueness and soft-delete rules
/// as the Postgres repository
#[derive(Default)]
pub struct InMemoryAccountRepository {
  store: Mutex<Store>,
}

impl InMemoryAccountRepository {
  pub fn new() -> Self {
    Self::default()
  }
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
  async fn create(&self, account: NewAccount) -> Result<Account, RepositoryError> {
    let mut store = self.store.lock().await;
    store.check_unique(None, &account.email, &account.username)?;

    store.next_id += 1;
    let now = Utc::now();
    let created = Account {
      id: AccountId::new(store.next_id),
      username: account.username,
      email: account.email,
      password_hash: account.password_hash,
      is_active: account.is_active,
      first_name: account.first_name,
      last_name: account.last_name,
      avatar: String::new(),
      timezone: account.timezone,
      language: account.language,
      last_login_at: None,
      password_reset_token: None,
      password_reset_expires_at: None,
      created_at: now,
      updated_at: now,
      deleted_at: None,
    };

    store.accounts.insert(created.id, created.clone());
    Ok(created)
  }

  async fn get_by_id(&self, id: AccountId) -> Result<Option<Account>, RepositoryError> {
    let store = self.store.lock().await;
    Ok(store.live().find(|account| account.id == id).cloned())
  }

  async fn get_by_email(&self, email: &str) -> Result<Option<Account>, RepositoryError> {
    let store = self.store.lock().await;
    Ok(store.live().find(|account| account.email == email).cloned())
  }

  async fn get_by_username(&self, username: &str) -> Result<Option<Account>, RepositoryError> {
    let store = self.store.lock().await;
    Ok(store.live().find(|account| account.username == username).cloned())
  }

  async fn update(&self, account: &Account) -> Result<Account, RepositoryError> {
    let mut store = self.store.lock().await;
    store.check_unique(Some(account.id), &account.email, &account.username)?;

    let stored = store.live_mut(account.id)?;
    let created_at = stored.created_at;
    *stored = Account {
      created_at,
      updated_at: Utc::now(),
      deleted_at: None,
      ..account.clone()
    };
    Ok(stored.clone())
  }

  async fn delete(&self, id: AccountId) -> Result<(), RepositoryError> {
    let mut store = self.store.lock().await;
    let account = store.live_mut(id)?;
    let now = Utc::now();
    account.deleted_at = Some(now);
    account.updated_at = now;
    Ok(())
  }

  async fn list(&self, offset: i64, limit: i64) -> Result<Vec<Account>, RepositoryError> {
    let store = self.store.lock().await;
    let offset = usize::try_from(offset).unwrap_or(0);
    let limit = usize::try_from(limit).unwrap_or(0);

    // Newest first, matching the Postgres ordering
    Ok(
      store
        .live()
        .rev()
        .skip(offset)
        .take(limit)
        .cloned()
        .collect(),
    )
  }

  async fn count(&self) -> Result<i64, RepositoryError> {
    let store = self.store.lock().await;
    Ok(store.live().count() as i64)
  }

  async fn exists(&self, id: AccountId) -> Result<bool, RepositoryError> {
    let store = self.store.lock().await;
    Ok(store.live().any(|account| account.id == id))
  }

  async fn exists_by_email(&self, email: &str) -> Result<bool, RepositoryError> {
    let store = self.store.lock().await;
    Ok(store.live().any(|account| account.email == email))
  }

  async fn exists_by_username(&self, username: &str) -> Result<bool, RepositoryError> {
    let store = self.store.lock().await;
    Ok(store.live().any(|account| account.username == username))
  }

  async fn update_password(&self, id: AccountId, password_hash: &str) -> Result<(), RepositoryError> {
    let mut store = self.store.lock().await;
    let account = store.live_mut(id)?;
    account.password_hash = password_hash.to_string();
    account.updated_at = Utc::now();
    Ok(())
  }

  async fn update_last_login(&self, id: AccountId) -> Result<(), RepositoryError> {
    let mut store = self.store.lock().await;
    let account = store.live_mut(id)?;
    let now = Utc::now();
    account.last_login_at = Some(now);
    account.updated_at = now;
    Ok(())
  }

  async fn set_password_reset_token(
    &self,
    id: AccountId,
    token: &str,
    expires_at: DateTime<Utc>,
  ) -> Result<(), RepositoryError> {
    let mut store = self.store.lock().await;
    let account = store.live_mut(id)?;
    account.password_reset_token = Some(token.to_string());
    account.password_reset_expires_at = Some(expires_at);
    account.updated_at = Utc::now();
    Ok(())
  }

  async fn clear_password_reset_token(&self, id: AccountId) -> Result<(), RepositoryError> {
    let mut store = self.store.lock().await;
    let account = store.live_mut(id)?;
    account.password_reset_token = None;
    account.password_reset_expires_at = None;
    account.updated_at = Utc::now();
    Ok(())
  }

  async fn activate(&self, id: AccountId) -> Result<(), RepositoryError> {
    let mut store = self.store.lock().await;
    let account = store.live_mut(id)?;
    account.is_active = true;
    account.updated_at = Utc::now();
    Ok(())
  }

  async fn deactivate(&self, id: AccountId) -> Result<(), RepositoryError> {
    let mut store = self.store.lock().await;
    let account = store.live_mut(id)?;
    account.is_active = false;
    account.updated_at = Utc::now();
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn new_account(username: &str, email: &str) -> NewAccount {
    NewAccount::new(
      username.to_string(),
      email.to_string(),
      "hash".to_string(),
      String::new(),
      String::new(),
    )
  }

  #[tokio::test]
  async fn test_ids_are_sequential() {
    let repo = InMemoryAccountRepository::new();

    let first = repo.create(new_account("first", "first@example.com")).await.unwrap();
    let second = repo
      .create(new_account("second", "second@example.com"))
      .await
      .unwrap();

    assert_eq!(first.id, AccountId::new(1));
    assert_eq!(second.id, AccountId::new(2));
  }

  #[tokio::test]
  async fn test_uniqueness_is_enforced() {
    let repo = InMemoryAccountRepository::new();
    repo.create(new_account("taken", "taken@example.com")).await.unwrap();

    match repo.create(new_account("other", "taken@example.com")).await {
      Err(RepositoryError::DuplicateKey(constraint)) => assert!(constraint.contains("email")),
      other => panic!("Expected DuplicateKey, got {:?}", other),
    }
    match repo.create(new_account("taken", "other@example.com")).await {
      Err(RepositoryError::DuplicateKey(constraint)) => assert!(constraint.contains("username")),
      other => panic!("Expected DuplicateKey, got {:?}", other),
    }
  }

  #[tokio::test]
  async fn test_soft_delete_hides_and_frees_identifiers() {
    let repo = InMemoryAccountRepository::new();
    let account = repo.create(new_account("gone", "gone@example.com")).await.unwrap();

    repo.delete(account.id).await.unwrap();

    assert!(repo.get_by_id(account.id).await.unwrap().is_none());
    assert!(!repo.exists_by_username("gone").await.unwrap());
    assert_eq!(repo.count().await.unwrap(), 0);
    assert!(repo.list(0, 10).await.unwrap().is_empty());
    assert!(matches!(
      repo.deactivate(account.id).await,
      Err(RepositoryError::NotFound)
    ));

    assert!(repo.create(new_account("gone", "gone@example.com")).await.is_ok());
  }

  #[tokio::test]
  async fn test_list_is_newest_first() {
    let repo = InMemoryAccountRepository::new();
    for i in 1..=4 {
      repo
        .create(new_account(&format!("user{}", i), &format!("user{}@example.com", i)))
        .await
        .unwrap();
    }

    let page: Vec<i64> = repo
      .list(1, 2)
      .await
      .unwrap()
      .iter()
      .map(|account| account.id.into_inner())
      .collect();

    assert_eq!(page, vec![3, 2]);
    assert!(repo.list(-1, -1).await.unwrap().is_empty());
  }

  #[tokio::test]
  async fn test_update_keeps_creation_time() {
    let repo = InMemoryAccountRepository::new();
    let mut account = repo.create(new_account("user", "user@example.com")).await.unwrap();
    let created_at = account.created_at;

    account.first_name = "Changed".to_string();
    let updated = repo.update(&account).await.unwrap();

    assert_eq!(updated.first_name, "Changed");
    assert_eq!(updated.created_at, created_at);
    assert!(updated.updated_at >= created_at);
  }
}
