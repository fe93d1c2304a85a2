use serde::{Deserialize, Serialize};
use std::fmt;
use validator::ValidateEmail;
use zeroize::{Zeroize, ZeroizeOnDrop};

use super::errors::{AccountError, ValidationError};

// ============================================================================
// AccountId Value Object
// ============================================================================

/// Repository-assigned numeric account identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(i64);

impl AccountId {
  pub fn new(id: i64) -> Self {
    Self(id)
  }

  pub fn into_inner(self) -> i64 {
    self.0
  }
}

impl fmt::Display for AccountId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

impl From<i64> for AccountId {
  fn from(id: i64) -> Self {
    Self(id)
  }
}

// ============================================================================
// Email Value Object
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Email(String);

impl Email {
  const MAX_LENGTH: usize = 100;

  /// Creates a new Email after validation
  pub fn new(email: impl Into<String>) -> Result<Self, ValidationError> {
    let email = email.into().trim().to_lowercase();

    if email.chars().count() > Self::MAX_LENGTH {
      return Err(ValidationError::EmailTooLong {
        max: Self::MAX_LENGTH,
      });
    }

    if !email.validate_email() {
      return Err(ValidationError::InvalidEmail);
    }

    Ok(Self(email))
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }

  pub fn into_inner(self) -> String {
    self.0
  }
}

impl fmt::Display for Email {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

impl AsRef<str> for Email {
  fn as_ref(&self) -> &str {
    &self.0
  }
}

// ============================================================================
// Username Value Object
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Username(String);

impl Username {
  const MIN_LENGTH: usize = 3;
  const MAX_LENGTH: usize = 50;

  pub fn new(username: impl Into<String>) -> Result<Self, ValidationError> {
    let username = username.into();
    let length = username.chars().count();

    if !(Self::MIN_LENGTH..=Self::MAX_LENGTH).contains(&length) {
      return Err(ValidationError::UsernameLength {
        min: Self::MIN_LENGTH,
        max: Self::MAX_LENGTH,
      });
    }

    Ok(Self(username))
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }

  pub fn into_inner(self) -> String {
    self.0
  }
}

impl fmt::Display for Username {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

// ============================================================================
// Password Value Object (Plain Password - Never Stored)
// ============================================================================

/// Plain-text password, wiped from memory on drop.
///
/// Construction never fails: a login attempt with a short password must be
/// reported as invalid credentials, not as a weak password. The strength
/// policy is applied explicitly with [`Password::ensure_strong_enough`].
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Password(String);

impl Password {
  pub const MIN_LENGTH: usize = 6;

  pub fn new(password: impl Into<String>) -> Self {
    Self(password.into())
  }

  /// Checks the minimum-length policy without hashing
  pub fn ensure_strong_enough(&self) -> Result<(), AccountError> {
    if self.0.chars().count() < Self::MIN_LENGTH {
      return Err(AccountError::WeakPassword {
        min: Self::MIN_LENGTH,
      });
    }
    Ok(())
  }

  /// Returns the password as a string slice (use with caution)
  pub fn as_str(&self) -> &str {
    &self.0
  }
}

// Implement Debug without exposing the password
impl fmt::Debug for Password {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("Password(***)")
  }
}

impl fmt::Display for Password {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("***")
  }
}

// ============================================================================
// PasswordHash Value Object
// ============================================================================

/// Self-describing password hash (PHC string format)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
  pub fn new(hash: impl Into<String>) -> Self {
    Self(hash.into())
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }

  pub fn into_inner(self) -> String {
    self.0
  }
}

// ============================================================================
// TokenKind
// ============================================================================

/// Discriminates access tokens from refresh tokens via the token id prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
  Access,
  Refresh,
}

impl TokenKind {
  pub fn as_str(&self) -> &'static str {
    match self {
      TokenKind::Access => "access",
      TokenKind::Refresh => "refresh",
    }
  }

  /// Token id in the form `<kind>_<accountID>_<unixIssuedAt>`
  pub fn token_id(&self, account_id: AccountId, issued_at: i64) -> String {
    format!("{}{}", self.id_prefix(account_id), issued_at)
  }

  pub fn id_prefix(&self, account_id: AccountId) -> String {
    format!("{}_{}_", self.as_str(), account_id)
  }
}

impl fmt::Display for TokenKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}
