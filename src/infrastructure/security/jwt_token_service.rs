use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};

use crate::domain::account::entities::{SessionClaims, TokenPair};
use crate::domain::account::errors::{AccountError, TokenError};
use crate::domain::account::ports::TokenService;
use crate::domain::account::value_objects::{AccountId, TokenKind};
use crate::infrastructure::config::JwtConfig;

const TOKEN_TYPE: &str = "Bearer";

/// HMAC-signed JWT implementation of [`TokenService`]
///
/// Access and refresh tokens share the same claims and secret; they are told
/// apart only by the `jti` prefix.
pub struct JwtTokenService {
  encoding_key: EncodingKey,
  decoding_key: DecodingKey,
  access_ttl: Duration,
  refresh_ttl: Duration,
  issuer: String,
  validation: Validation,
}

impl JwtTokenService {
  /// Creates a token service
  ///
  /// # Arguments
  /// * `secret` - HMAC signing secret
  /// * `access_ttl_minutes` - access token lifetime; zero or less yields already-expired tokens
  /// * `refresh_ttl_minutes` - refresh token lifetime
  /// * `issuer` - value of the `iss` claim
  pub fn new(
    secret: &[u8],
    access_ttl_minutes: i64,
    refresh_ttl_minutes: i64,
    issuer: impl Into<String>,
  ) -> Self {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.algorithms = vec![Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];
    validation.leeway = 0;
    validation.validate_exp = true;
    validation.validate_nbf = true;

    Self {
      encoding_key: EncodingKey::from_secret(secret),
      decoding_key: DecodingKey::from_secret(secret),
      access_ttl: Duration::minutes(access_ttl_minutes),
      refresh_ttl: Duration::minutes(refresh_ttl_minutes),
      issuer: issuer.into(),
      validation,
    }
  }

  pub fn from_config(config: &JwtConfig) -> Self {
    Self::new(
      config.secret.as_bytes(),
      config.access_token_ttl_minutes,
      config.refresh_token_ttl_minutes,
      config.issuer.clone(),
    )
  }

  fn sign(
    &self,
    kind: TokenKind,
    account_id: AccountId,
    username: &str,
    email: &str,
    ttl: Duration,
  ) -> Result<String, AccountError> {
    let now = Utc::now();
    let issued_at = now.timestamp();

    let claims = SessionClaims {
      user_id: account_id,
      username: username.to_string(),
      email: email.to_string(),
      iss: self.issuer.clone(),
      sub: format!("user_{}", account_id),
      iat: issued_at,
      nbf: issued_at,
      exp: (now + ttl).timestamp(),
      jti: kind.token_id(account_id, issued_at),
    };

    encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key).map_err(|e| {
      TokenError::SigningFailed {
        kind: kind.as_str(),
        message: e.to_string(),
      }
      .into()
    })
  }

  fn validate(&self, token: &str, kind: TokenKind) -> Result<SessionClaims, AccountError> {
    let claims = decode::<SessionClaims>(token, &self.decoding_key, &self.validation)
      .map_err(|e| {
        tracing::debug!(kind = kind.as_str(), error = %e, "Token rejected");
        AccountError::InvalidToken(e.to_string())
      })?
      .claims;

    // The library only rejects `exp < now`; a token expiring this second is already dead.
    if claims.exp <= Utc::now().timestamp() {
      return Err(AccountError::InvalidToken("token has expired".to_string()));
    }

    if !claims.jti.starts_with(&kind.id_prefix(claims.user_id)) {
      return Err(AccountError::InvalidToken(format!(
        "not a valid {} token",
        kind
      )));
    }

    Ok(claims)
  }
}

impl TokenService for JwtTokenService {
  fn issue(
    &self,
    account_id: AccountId,
    username: &str,
    email: &str,
  ) -> Result<TokenPair, AccountError> {
    let access_token = self.sign(
      TokenKind::Access,
      account_id,
      username,
      email,
      self.access_ttl,
    )?;
    let refresh_token = self.sign(
      TokenKind::Refresh,
      account_id,
      username,
      email,
      self.refresh_ttl,
    )?;

    Ok(TokenPair {
      access_token,
      refresh_token,
      token_type: TOKEN_TYPE.to_string(),
      expires_in: self.access_ttl.num_seconds(),
    })
  }

  fn validate_access(&self, token: &str) -> Result<SessionClaims, AccountError> {
    self.validate(token, TokenKind::Access)
  }

  fn validate_refresh(&self, token: &str) -> Result<SessionClaims, AccountError> {
    self.validate(token, TokenKind::Refresh)
  }
}
