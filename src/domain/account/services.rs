use std::sync::Arc;

use super::entities::{
  AccountView, AuthenticatedAccount, NewAccount, ProfileUpdate, TokenPair, validate_names,
};
use super::errors::{AccountError, RepositoryError, RepositoryResultExt};
use super::ports::{AccountRepository, PasswordHasher, TokenService};
use super::value_objects::{AccountId, Email, Password, Username};

/// Result of a successful login
#[derive(Debug, Clone)]
pub struct LoginOutcome {
  pub account: AccountView,
  pub tokens: TokenPair,
}

/// One page of accounts plus the total number of live accounts
#[derive(Debug, Clone)]
pub struct AccountPage {
  pub accounts: Vec<AccountView>,
  pub total: i64,
}

/// Account service implementing registration, authentication and profile rules
///
/// Holds no mutable state of its own; every call runs its own sequence of
/// repository operations, so one instance is shared across all workers.
pub struct AccountService {
  account_repo: Arc<dyn AccountRepository>,
  password_hasher: Arc<dyn PasswordHasher>,
  token_service: Arc<dyn TokenService>,
}

impl AccountService {
  pub fn new(
    account_repo: Arc<dyn AccountRepository>,
    password_hasher: Arc<dyn PasswordHasher>,
    token_service: Arc<dyn TokenService>,
  ) -> Self {
    Self {
      account_repo,
      password_hasher,
      token_service,
    }
  }

  /// Registers a new active account
  ///
  /// # Errors
  /// `DuplicateEmail` or `DuplicateUsername` when either is taken,
  /// `WeakPassword` when the password fails the strength policy,
  /// `Validation` when a name exceeds its length limit.
  pub async fn register(
    &self,
    username: Username,
    email: Email,
    password: Password,
    first_name: String,
    last_name: String,
  ) -> Result<AccountView, AccountError> {
    validate_names(&first_name, &last_name)?;

    if self
      .account_repo
      .exists_by_email(email.as_str())
      .await
      .during("check email")?
    {
      return Err(AccountError::DuplicateEmail);
    }

    if self
      .account_repo
      .exists_by_username(username.as_str())
      .await
      .during("check username")?
    {
      return Err(AccountError::DuplicateUsername);
    }

    let password_hash = self.password_hasher.hash(&password).await?;

    let new_account = NewAccount::new(
      username.into_inner(),
      email.into_inner(),
      password_hash.into_inner(),
      first_name,
      last_name,
    );

    // The existence checks above race with concurrent registrations; the
    // repository's uniqueness constraint is the real guard.
    let account = match self.account_repo.create(new_account).await {
      Ok(account) => account,
      Err(RepositoryError::DuplicateKey(constraint)) if constraint.contains("email") => {
        return Err(AccountError::DuplicateEmail);
      }
      Err(RepositoryError::DuplicateKey(constraint)) if constraint.contains("username") => {
        return Err(AccountError::DuplicateUsername);
      }
      Err(e) => return Err(e).during("create account"),
    };

    tracing::info!(account_id = %account.id, "Account registered");

    Ok(account.view())
  }

  /// Verifies credentials and issues a token pair
  ///
  /// Unknown email, deactivated account and wrong password all fail with the
  /// same `InvalidCredentials` error.
  pub async fn login(&self, email: &str, password: Password) -> Result<LoginOutcome, AccountError> {
    let account = self
      .account_repo
      .get_by_email(&email.to_lowercase())
      .await
      .during("find account by email")?
      .ok_or(AccountError::InvalidCredentials)?;

    if !account.is_active {
      tracing::debug!(account_id = %account.id, "Login rejected for deactivated account");
      return Err(AccountError::InvalidCredentials);
    }

    if !self
      .password_hasher
      .verify(&account.password_hash, &password)
      .await
    {
      return Err(AccountError::InvalidCredentials);
    }

    let tokens = self
      .token_service
      .issue(account.id, &account.username, &account.email)?;

    self.record_last_login(account.id);

    tracing::debug!(account_id = %account.id, "Login succeeded");

    Ok(LoginOutcome {
      account: account.view(),
      tokens,
    })
  }

  /// Best-effort last-login stamp.
  ///
  /// Runs as a detached task so the login never waits on it. A storage
  /// failure is logged and dropped.
  fn record_last_login(&self, id: AccountId) {
    let account_repo = Arc::clone(&self.account_repo);
    tokio::spawn(async move {
      if let Err(e) = account_repo.update_last_login(id).await {
        tracing::warn!(account_id = %id, error = %e, "Failed to record last login");
      }
    });
  }

  /// Exchanges a refresh token for a new token pair
  pub async fn refresh_tokens(&self, refresh_token: &str) -> Result<TokenPair, AccountError> {
    self.token_service.rotate(refresh_token)
  }

  /// Validates an access token and returns the identity it carries
  pub fn authenticate(&self, access_token: &str) -> Result<AuthenticatedAccount, AccountError> {
    self
      .token_service
      .validate_access(access_token)
      .map(AuthenticatedAccount::from)
  }

  pub async fn get_profile(&self, id: AccountId) -> Result<AccountView, AccountError> {
    self
      .account_repo
      .get_by_id(id)
      .await
      .during("find account")?
      .map(|account| account.view())
      .ok_or(AccountError::NotFound)
  }

  /// Replaces all mutable profile fields of an account
  pub async fn update_profile(
    &self,
    id: AccountId,
    profile: ProfileUpdate,
  ) -> Result<AccountView, AccountError> {
    profile.validate()?;

    let mut account = self
      .account_repo
      .get_by_id(id)
      .await
      .during("find account")?
      .ok_or(AccountError::NotFound)?;

    account.apply_profile(profile);

    let updated = self
      .account_repo
      .update(&account)
      .await
      .during("update account")?;

    Ok(updated.view())
  }

  /// Changes the password after verifying the current one
  ///
  /// # Errors
  /// `NotFound`, `InvalidCredentials` when `current` does not match,
  /// `WeakPassword` when `new_password` fails the strength policy.
  pub async fn change_password(
    &self,
    id: AccountId,
    current: Password,
    new_password: Password,
  ) -> Result<(), AccountError> {
    let account = self
      .account_repo
      .get_by_id(id)
      .await
      .during("find account")?
      .ok_or(AccountError::NotFound)?;

    if !self
      .password_hasher
      .verify(&account.password_hash, &current)
      .await
    {
      return Err(AccountError::InvalidCredentials);
    }

    let password_hash = self.password_hasher.hash(&new_password).await?;

    self
      .account_repo
      .update_password(id, password_hash.as_str())
      .await
      .during("update password")?;

    tracing::info!(account_id = %id, "Password changed");

    Ok(())
  }

  /// Returns a page of accounts and the total count.
  ///
  /// Negative `offset` or `limit` is treated as 0. The two reads are
  /// independent, so the total may disagree with the page under concurrent
  /// writes.
  pub async fn list_accounts(&self, offset: i64, limit: i64) -> Result<AccountPage, AccountError> {
    let accounts = self
      .account_repo
      .list(offset.max(0), limit.max(0))
      .await
      .during("list accounts")?;

    let total = self.account_repo.count().await.during("count accounts")?;

    Ok(AccountPage {
      accounts: accounts.iter().map(|account| account.view()).collect(),
      total,
    })
  }

  pub async fn activate(&self, id: AccountId) -> Result<(), AccountError> {
    self.ensure_exists(id).await?;
    self.account_repo.activate(id).await.during("activate account")
  }

  pub async fn deactivate(&self, id: AccountId) -> Result<(), AccountError> {
    self.ensure_exists(id).await?;
    self
      .account_repo
      .deactivate(id)
      .await
      .during("deactivate account")
  }

  async fn ensure_exists(&self, id: AccountId) -> Result<(), AccountError> {
    if self.account_repo.exists(id).await.during("check account")? {
      Ok(())
    } else {
      Err(AccountError::NotFound)
    }
  }
}
