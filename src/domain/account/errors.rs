use thiserror::Error;

/// Failure kinds the account core guarantees to its callers.
///
/// Boundary layers match on this instead of on [`AccountError`] variants, so
/// internal failures (hashing, signing, storage) collapse into one kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
  DuplicateEmail,
  DuplicateUsername,
  WeakPassword,
  InvalidCredentials,
  NotFound,
  InvalidToken,
  Validation,
  Internal,
}

/// Main account error type
#[derive(Debug, Error)]
pub enum AccountError {
  #[error("Email is already registered")]
  DuplicateEmail,

  #[error("Username is already taken")]
  DuplicateUsername,

  #[error("Password too short, minimum {min} characters required")]
  WeakPassword { min: usize },

  /// Unknown email, wrong password and deactivated account all end up here.
  #[error("Invalid email or password")]
  InvalidCredentials,

  #[error("Account not found")]
  NotFound,

  #[error("Invalid token: {0}")]
  InvalidToken(String),

  #[error("Validation error: {0}")]
  Validation(#[from] ValidationError),

  #[error("Hash error: {0}")]
  Hash(#[from] HashError),

  #[error("Token error: {0}")]
  Token(#[from] TokenError),

  #[error("Repository error during {operation}: {source}")]
  Repository {
    operation: &'static str,
    #[source]
    source: RepositoryError,
  },
}

impl AccountError {
  pub fn kind(&self) -> ErrorKind {
    match self {
      AccountError::DuplicateEmail => ErrorKind::DuplicateEmail,
      AccountError::DuplicateUsername => ErrorKind::DuplicateUsername,
      AccountError::WeakPassword { .. } => ErrorKind::WeakPassword,
      AccountError::InvalidCredentials => ErrorKind::InvalidCredentials,
      AccountError::NotFound => ErrorKind::NotFound,
      AccountError::InvalidToken(_) => ErrorKind::InvalidToken,
      AccountError::Validation(_) => ErrorKind::Validation,
      AccountError::Hash(_) | AccountError::Token(_) | AccountError::Repository { .. } => {
        ErrorKind::Internal
      }
    }
  }
}

/// Repository-related errors
#[derive(Debug, Error)]
pub enum RepositoryError {
  #[error("Database connection failed: {0}")]
  ConnectionFailed(String),

  #[error("Query execution failed: {0}")]
  QueryFailed(String),

  #[error("Record not found")]
  NotFound,

  /// Carries the name of the violated constraint
  #[error("Duplicate key violation: {0}")]
  DuplicateKey(String),

  #[error("Database error: {0}")]
  DatabaseError(String),
}

/// Password hashing errors
#[derive(Debug, Error)]
pub enum HashError {
  #[error("Failed to hash password: {0}")]
  HashingFailed(String),

  #[error("Hashing task aborted: {0}")]
  TaskFailed(String),
}

/// Session token signing errors
#[derive(Debug, Error)]
pub enum TokenError {
  #[error("Failed to sign {kind} token: {message}")]
  SigningFailed { kind: &'static str, message: String },
}

/// Input validation errors
#[derive(Debug, Error)]
pub enum ValidationError {
  #[error("Invalid email format")]
  InvalidEmail,

  #[error("Email too long, maximum {max} characters allowed")]
  EmailTooLong { max: usize },

  #[error("Username must be between {min} and {max} characters")]
  UsernameLength { min: usize, max: usize },

  #[error("{field} too long, maximum {max} characters allowed")]
  FieldTooLong { field: &'static str, max: usize },
}

/// Attaches the name of the failing repository operation to a storage error.
pub trait RepositoryResultExt<T> {
  fn during(self, operation: &'static str) -> Result<T, AccountError>;
}

impl<T> RepositoryResultExt<T> for Result<T, RepositoryError> {
  fn during(self, operation: &'static str) -> Result<T, AccountError> {
    self.map_err(|source| AccountError::Repository { operation, source })
  }
}

impl From<sqlx::Error> for RepositoryError {
  fn from(error: sqlx::Error) -> Self {
    match error {
      sqlx::Error::RowNotFound => RepositoryError::NotFound,
      sqlx::Error::Database(db_err) => {
        if db_err.is_unique_violation() {
          let constraint = db_err
            .constraint()
            .map(str::to_string)
            .unwrap_or_else(|| db_err.message().to_string());
          RepositoryError::DuplicateKey(constraint)
        } else {
          RepositoryError::DatabaseError(db_err.message().to_string())
        }
      }
      sqlx::Error::PoolTimedOut => RepositoryError::ConnectionFailed("Pool timed out".to_string()),
      sqlx::Error::PoolClosed => RepositoryError::ConnectionFailed("Pool closed".to_string()),
      _ => RepositoryError::QueryFailed(error.to_string()),
    }
  }
}
