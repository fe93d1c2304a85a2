use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::errors::ValidationError;
use super::value_objects::AccountId;

pub const DEFAULT_TIMEZONE: &str = "UTC";
pub const DEFAULT_LANGUAGE: &str = "zh-CN";

pub const MAX_NAME_LENGTH: usize = 50;
pub const MAX_AVATAR_LENGTH: usize = 255;
pub const MAX_TIMEZONE_LENGTH: usize = 50;
pub const MAX_LANGUAGE_LENGTH: usize = 10;

fn ensure_max_chars(field: &'static str, value: &str, max: usize) -> Result<(), ValidationError> {
  if value.chars().count() > max {
    return Err(ValidationError::FieldTooLong { field, max });
  }
  Ok(())
}

/// Checks first and last name against the stored column limits
pub fn validate_names(first_name: &str, last_name: &str) -> Result<(), ValidationError> {
  ensure_max_chars("First name", first_name, MAX_NAME_LENGTH)?;
  ensure_max_chars("Last name", last_name, MAX_NAME_LENGTH)
}

/// Account entity representing a registered user
///
/// Deliberately not `Serialize`: it carries the password hash and reset token.
/// Use [`AccountView`] for anything that leaves the service.
#[derive(Debug, Clone, PartialEq)]
pub struct Account {
  pub id: AccountId,
  pub username: String,
  pub email: String,
  /// Self-describing password hash (PHC string)
  pub password_hash: String,
  pub is_active: bool,
  pub first_name: String,
  pub last_name: String,
  pub avatar: String,
  pub timezone: String,
  pub language: String,
  pub last_login_at: Option<DateTime<Utc>>,
  pub password_reset_token: Option<String>,
  pub password_reset_expires_at: Option<DateTime<Utc>>,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
  /// Soft delete marker; deleted accounts are invisible to lookups
  pub deleted_at: Option<DateTime<Utc>>,
}

impl Account {
  /// Display name, falling back to the username when no name is set
  pub fn full_name(&self) -> String {
    if self.first_name.is_empty() && self.last_name.is_empty() {
      return self.username.clone();
    }
    format!("{} {}", self.first_name, self.last_name)
  }

  /// Checks if a password reset token is set and not yet expired
  pub fn is_password_reset_valid(&self) -> bool {
    match (&self.password_reset_token, &self.password_reset_expires_at) {
      (Some(token), Some(expires_at)) => !token.is_empty() && *expires_at > Utc::now(),
      _ => false,
    }
  }

  /// Replaces every mutable profile field
  pub fn apply_profile(&mut self, profile: ProfileUpdate) {
    self.first_name = profile.first_name;
    self.last_name = profile.last_name;
    self.avatar = profile.avatar;
    self.timezone = profile.timezone;
    self.language = profile.language;
    self.updated_at = Utc::now();
  }

  pub fn view(&self) -> AccountView {
    AccountView::from(self)
  }
}

/// Account data before the repository assigns an id
#[derive(Debug, Clone)]
pub struct NewAccount {
  pub username: String,
  pub email: String,
  pub password_hash: String,
  pub first_name: String,
  pub last_name: String,
  pub is_active: bool,
  pub timezone: String,
  pub language: String,
}

impl NewAccount {
  /// Creates an active account record with default timezone and language
  pub fn new(
    username: String,
    email: String,
    password_hash: String,
    first_name: String,
    last_name: String,
  ) -> Self {
    Self {
      username,
      email,
      password_hash,
      first_name,
      last_name,
      is_active: true,
      timezone: DEFAULT_TIMEZONE.to_string(),
      language: DEFAULT_LANGUAGE.to_string(),
    }
  }
}

/// Full replacement of the mutable profile fields.
///
/// There are no partial-update semantics: a field left empty by the caller
/// overwrites the stored value with an empty string.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
  pub first_name: String,
  pub last_name: String,
  pub avatar: String,
  pub timezone: String,
  pub language: String,
}

impl ProfileUpdate {
  pub fn validate(&self) -> Result<(), ValidationError> {
    validate_names(&self.first_name, &self.last_name)?;
    ensure_max_chars("Avatar", &self.avatar, MAX_AVATAR_LENGTH)?;
    ensure_max_chars("Timezone", &self.timezone, MAX_TIMEZONE_LENGTH)?;
    ensure_max_chars("Language", &self.language, MAX_LANGUAGE_LENGTH)
  }
}

/// Public projection of an account, safe to return to clients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountView {
  pub id: AccountId,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
  pub username: String,
  pub email: String,
  pub is_active: bool,
  pub first_name: String,
  pub last_name: String,
  pub avatar: String,
  pub last_login_at: Option<DateTime<Utc>>,
  pub timezone: String,
  pub language: String,
}

impl From<&Account> for AccountView {
  fn from(account: &Account) -> Self {
    Self {
      id: account.id,
      created_at: account.created_at,
      updated_at: account.updated_at,
      username: account.username.clone(),
      email: account.email.clone(),
      is_active: account.is_active,
      first_name: account.first_name.clone(),
      last_name: account.last_name.clone(),
      avatar: account.avatar.clone(),
      last_login_at: account.last_login_at,
      timezone: account.timezone.clone(),
      language: account.language.clone(),
    }
  }
}

/// Claims embedded in both access and refresh tokens
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionClaims {
  pub user_id: AccountId,
  pub username: String,
  pub email: String,
  pub iss: String,
  /// `user_<accountID>`
  pub sub: String,
  pub iat: i64,
  pub nbf: i64,
  pub exp: i64,
  /// `<kind>_<accountID>_<unixIssuedAt>`
  pub jti: String,
}

/// Access + refresh token pair handed to a client after login or rotation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenPair {
  pub access_token: String,
  pub refresh_token: String,
  /// Always `Bearer`
  pub token_type: String,
  /// Access token lifetime in seconds
  pub expires_in: i64,
}

/// Identity extracted from a validated access token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedAccount {
  pub id: AccountId,
  pub username: String,
  pub email: String,
}

impl From<SessionClaims> for AuthenticatedAccount {
  fn from(claims: SessionClaims) -> Self {
    Self {
      id: claims.user_id,
      username: claims.username,
      email: claims.email,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use chrono::Duration;

  fn sample_account() -> Account {
    let now = Utc::now();
    Account {
      id: AccountId::new(7),
      username: "testuser".to_string(),
      email: "test@example.com".to_string(),
      password_hash: "$argon2id$secret".to_string(),
      is_active: true,
      first_name: String::new(),
      last_name: String::new(),
      avatar: String::new(),
      timezone: DEFAULT_TIMEZONE.to_string(),
      language: DEFAULT_LANGUAGE.to_string(),
      last_login_at: None,
      password_reset_token: Some("reset".to_string()),
      password_reset_expires_at: Some(now + Duration::hours(1)),
      created_at: now,
      updated_at: now,
      deleted_at: None,
    }
  }

  #[test]
  fn test_new_account_defaults() {
    let account = NewAccount::new(
      "testuser".to_string(),
      "test@example.com".to_string(),
      "hash".to_string(),
      "Test".to_string(),
      "User".to_string(),
    );

    assert!(account.is_active);
    assert_eq!(account.timezone, "UTC");
    assert_eq!(account.language, "zh-CN");
  }

  #[test]
  fn test_full_name_falls_back_to_username() {
    let mut account = sample_account();
    assert_eq!(account.full_name(), "testuser");

    account.first_name = "Test".to_string();
    account.last_name = "User".to_string();
    assert_eq!(account.full_name(), "Test User");
  }

  #[test]
  fn test_password_reset_validity() {
    let mut account = sample_account();
    assert!(account.is_password_reset_valid());

    account.password_reset_expires_at = Some(Utc::now() - Duration::seconds(1));
    assert!(!account.is_password_reset_valid());

    account.password_reset_token = None;
    assert!(!account.is_password_reset_valid());
  }

  #[test]
  fn test_apply_profile_replaces_every_field() {
    let mut account = sample_account();
    account.avatar = "https://cdn.example.com/a.png".to_string();

    account.apply_profile(ProfileUpdate {
      first_name: "New".to_string(),
      ..Default::default()
    });

    assert_eq!(account.first_name, "New");
    assert_eq!(account.avatar, "");
    assert_eq!(account.timezone, "");
  }

  #[test]
  fn test_profile_update_limits() {
    assert!(ProfileUpdate::default().validate().is_ok());

    let long_avatar = ProfileUpdate {
      avatar: "a".repeat(MAX_AVATAR_LENGTH + 1),
      ..Default::default()
    };
    assert!(matches!(
      long_avatar.validate(),
      Err(ValidationError::FieldTooLong { field: "Avatar", max: 255 })
    ));

    let long_language = ProfileUpdate {
      language: "x".repeat(11),
      ..Default::default()
    };
    assert!(long_language.validate().is_err());

    // Counted in characters, not bytes
    assert!(validate_names(&"é".repeat(50), "").is_ok());
    assert!(matches!(
      validate_names("", &"L".repeat(51)),
      Err(ValidationError::FieldTooLong { field: "Last name", max: 50 })
    ));
  }

  #[test]
  fn test_view_hides_secrets() {
    let json = serde_json::to_value(sample_account().view()).unwrap();
    assert!(json.get("password_hash").is_none());
    assert!(json.get("password_reset_token").is_none());
    assert_eq!(json["id"], 7);
    assert_eq!(json["email"], "test@example.com");
  }
}
