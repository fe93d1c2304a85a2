pub mod entities;
pub mod errors;
pub mod ports;
pub mod services;
pub mod value_objects;

// Re-export commonly used types
pub use entities::{
  Account, AccountView, AuthenticatedAccount, NewAccount, ProfileUpdate, SessionClaims, TokenPair,
};
pub use errors::{
  AccountError, ErrorKind, HashError, RepositoryError, TokenError, ValidationError,
};
pub use services::{AccountPage, AccountService, LoginOutcome};
pub use value_objects::{AccountId, Email, Password, PasswordHash, TokenKind, Username};
