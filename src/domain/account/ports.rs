use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::entities::{Account, NewAccount, SessionClaims, TokenPair};
use super::errors::{AccountError, RepositoryError};
use super::value_objects::{AccountId, Password, PasswordHash};

/// Repository trait for account persistence operations
///
/// Lookups return `Ok(None)` when no live (non-deleted) account matches.
/// Implementations must enforce uniqueness of email and username themselves
/// and report a violation as [`RepositoryError::DuplicateKey`] carrying a
/// constraint name that mentions the offending column.
#[async_trait]
pub trait AccountRepository: Send + Sync {
  /// Persists a new account and returns it with its assigned id
  async fn create(&self, account: NewAccount) -> Result<Account, RepositoryError>;

  async fn get_by_id(&self, id: AccountId) -> Result<Option<Account>, RepositoryError>;

  async fn get_by_email(&self, email: &str) -> Result<Option<Account>, RepositoryError>;

  async fn get_by_username(&self, username: &str) -> Result<Option<Account>, RepositoryError>;

  /// Saves every field of an existing account
  async fn update(&self, account: &Account) -> Result<Account, RepositoryError>;

  /// Soft deletes an account (marks as deleted without removing the record)
  async fn delete(&self, id: AccountId) -> Result<(), RepositoryError>;

  /// Returns a page of accounts, newest first
  async fn list(&self, offset: i64, limit: i64) -> Result<Vec<Account>, RepositoryError>;

  async fn count(&self) -> Result<i64, RepositoryError>;

  async fn exists(&self, id: AccountId) -> Result<bool, RepositoryError>;

  async fn exists_by_email(&self, email: &str) -> Result<bool, RepositoryError>;

  async fn exists_by_username(&self, username: &str) -> Result<bool, RepositoryError>;

  async fn update_password(&self, id: AccountId, password_hash: &str)
  -> Result<(), RepositoryError>;

  /// Stamps the last-login timestamp with the current time
  async fn update_last_login(&self, id: AccountId) -> Result<(), RepositoryError>;

  async fn set_password_reset_token(
    &self,
    id: AccountId,
    token: &str,
    expires_at: DateTime<Utc>,
  ) -> Result<(), RepositoryError>;

  async fn clear_password_reset_token(&self, id: AccountId) -> Result<(), RepositoryError>;

  async fn activate(&self, id: AccountId) -> Result<(), RepositoryError>;

  async fn deactivate(&self, id: AccountId) -> Result<(), RepositoryError>;
}

/// Service trait for password hashing operations
#[async_trait]
pub trait PasswordHasher: Send + Sync {
  /// Hashes a password after checking the strength policy
  ///
  /// Every call produces a fresh salt, so hashing the same password twice
  /// yields two different strings.
  async fn hash(&self, password: &Password) -> Result<PasswordHash, AccountError>;

  /// Returns true only if `candidate` matches `hash`; malformed hashes never match
  async fn verify(&self, hash: &str, candidate: &Password) -> bool;
}

/// Service trait for issuing and validating session tokens
pub trait TokenService: Send + Sync {
  fn issue(&self, account_id: AccountId, username: &str, email: &str)
  -> Result<TokenPair, AccountError>;

  fn validate_access(&self, token: &str) -> Result<SessionClaims, AccountError>;

  fn validate_refresh(&self, token: &str) -> Result<SessionClaims, AccountError>;

  /// Validates a refresh token and issues a new pair for the same identity.
  ///
  /// The presented refresh token stays valid until it expires.
  fn rotate(&self, refresh_token: &str) -> Result<TokenPair, AccountError> {
    let claims = self.validate_refresh(refresh_token)?;
    self.issue(claims.user_id, &claims.username, &claims.email)
  }
}
