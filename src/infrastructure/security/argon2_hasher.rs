use argon2::password_hash::SaltString;
use argon2::{
  Algorithm, Argon2, Params, Version,
  password_hash::{
    PasswordHash as Argon2PasswordHash, PasswordHasher as Argon2PasswordHasherTrait,
    PasswordVerifier,
  },
};
use async_trait::async_trait;

use crate::domain::account::errors::{AccountError, HashError};
use crate::domain::account::ports::PasswordHasher;
use crate::domain::account::value_objects::{Password, PasswordHash};

/// Argon2id password hasher implementation
///
/// Uses the Argon2id algorithm with these parameters:
/// - Memory cost: 19 MiB (19456 KiB)
/// - Time cost: 2 iterations
/// - Parallelism: 1 thread
///
/// Hashing and verification are CPU-bound, so both run on the blocking pool
/// instead of stalling the async workers.
#[derive(Clone)]
pub struct Argon2PasswordHasher {
  argon2: Argon2<'static>,
}

impl Argon2PasswordHasher {
  pub fn new() -> Result<Self, AccountError> {
    // Memory cost: 19 MiB = 19456 KiB
    let memory_cost = 19456;
    let time_cost = 2;
    let parallelism = 1;
    let output_len = Some(32);

    let params = Params::new(memory_cost, time_cost, parallelism, output_len).map_err(|e| {
      HashError::HashingFailed(format!("Failed to create Argon2 params: {}", e))
    })?;

    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

    Ok(Self { argon2 })
  }
}

#[async_trait]
impl PasswordHasher for Argon2PasswordHasher {
  /// Hashes a plain text password using Argon2id
  ///
  /// # Errors
  /// * `AccountError::WeakPassword` - password shorter than the minimum
  /// * `AccountError::Hash` - the hashing itself failed
  async fn hash(&self, password: &Password) -> Result<PasswordHash, AccountError> {
    password.ensure_strong_enough()?;

    let argon2 = self.argon2.clone();
    let password = password.clone();

    let hash = tokio::task::spawn_blocking(move || {
      // Generate a random salt using the OS's cryptographically secure RNG
      let salt = SaltString::generate(&mut rand::rngs::OsRng);
      argon2
        .hash_password(password.as_str().as_bytes(), &salt)
        .map(|hash| hash.to_string())
    })
    .await
    .map_err(|e| HashError::TaskFailed(e.to_string()))?
    .map_err(|e| HashError::HashingFailed(e.to_string()))?;

    Ok(PasswordHash::new(hash))
  }

  /// Verifies a candidate password against a stored PHC string
  ///
  /// A hash that fails to parse is treated as a mismatch.
  async fn verify(&self, hash: &str, candidate: &Password) -> bool {
    let argon2 = self.argon2.clone();
    let hash = hash.to_string();
    let candidate = candidate.clone();

    let outcome = tokio::task::spawn_blocking(move || {
      let parsed_hash = match Argon2PasswordHash::new(&hash) {
        Ok(parsed) => parsed,
        Err(e) => {
          tracing::debug!(error = %e, "Stored password hash is malformed");
          return false;
        }
      };

      // verify_password compares in constant time
      argon2
        .verify_password(candidate.as_str().as_bytes(), &parsed_hash)
        .is_ok()
    })
    .await;

    match outcome {
      Ok(matches) => matches,
      Err(e) => {
        tracing::error!(error = %e, "Password verification task failed");
        false
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[tokio::test]
  async fn test_hash_password() {
    let hasher = Argon2PasswordHasher::new().unwrap();
    let password = Password::new("test_password_123");

    let hash = hasher.hash(&password).await.unwrap();

    assert!(hash.as_str().starts_with("$argon2id$"));
    assert!(!hash.as_str().contains("test_password_123"));
  }

  #[tokio::test]
  async fn test_verify_correct_and_incorrect_password() {
    let hasher = Argon2PasswordHasher::new().unwrap();
    let password = Password::new("test_password_123");

    let hash = hasher.hash(&password).await.unwrap();

    assert!(hasher.verify(hash.as_str(), &password).await);
    assert!(
      !hasher
        .verify(hash.as_str(), &Password::new("wrong_password"))
        .await
    );
  }

  #[tokio::test]
  async fn test_hash_produces_different_salts() {
    let hasher = Argon2PasswordHasher::new().unwrap();
    let password = Password::new("test_password_123");

    let hash1 = hasher.hash(&password).await.unwrap();
    let hash2 = hasher.hash(&password).await.unwrap();

    // Same password should produce different hashes due to random salt
    assert_ne!(hash1.as_str(), hash2.as_str());

    assert!(hasher.verify(hash1.as_str(), &password).await);
    assert!(hasher.verify(hash2.as_str(), &password).await);
  }

  #[tokio::test]
  async fn test_short_password_is_rejected_before_hashing() {
    let hasher = Argon2PasswordHasher::new().unwrap();

    let result = hasher.hash(&Password::new("12345")).await;

    assert!(matches!(result, Err(AccountError::WeakPassword { min: 6 })));
  }

  #[tokio::test]
  async fn test_verify_malformed_hash_is_false() {
    let hasher = Argon2PasswordHasher::new().unwrap();

    assert!(
      !hasher
        .verify("invalid_hash", &Password::new("whatever"))
        .await
    );
    assert!(!hasher.verify("", &Password::new("whatever")).await);
  }

  #[tokio::test]
  async fn test_argon2_parameters() {
    let hasher = Argon2PasswordHasher::new().unwrap();
    let hash = hasher
      .hash(&Password::new("test_password_123"))
      .await
      .unwrap();

    let parsed = Argon2PasswordHash::new(hash.as_str()).unwrap();

    assert_eq!(parsed.version, Some(Version::V0x13 as u32));
    assert_eq!(parsed.params.get_decimal("m"), Some(19456));
    assert_eq!(parsed.params.get_decimal("t"), Some(2));
  }
}
