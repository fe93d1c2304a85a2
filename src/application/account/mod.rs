//! Account use cases
//!
//! Each use case turns raw request input into domain values and delegates to
//! the [`AccountService`](crate::domain::account::AccountService).

mod authenticate_access_token;
mod change_password;
mod get_profile;
mod list_accounts;
mod login_account;
mod refresh_tokens;
mod register_account;
mod set_account_status;
mod update_profile;

pub use authenticate_access_token::AuthenticateAccessTokenUseCase;
pub use change_password::{ChangePasswordCommand, ChangePasswordUseCase};
pub use get_profile::GetProfileUseCase;
pub use list_accounts::{
  DEFAULT_PAGE_SIZE, ListAccountsCommand, ListAccountsResponse, ListAccountsUseCase, MAX_PAGE_SIZE,
};
pub use login_account::{LoginAccountCommand, LoginAccountResponse, LoginAccountUseCase};
pub use refresh_tokens::{RefreshTokensCommand, RefreshTokensUseCase};
pub use register_account::{RegisterAccountCommand, RegisterAccountResponse, RegisterAccountUseCase};
pub use set_account_status::{SetAccountStatusCommand, SetAccountStatusUseCase};
pub use update_profile::{UpdateProfileCommand, UpdateProfileUseCase};

#[cfg(test)]
pub(crate) mod test_support {
  use std::sync::Arc;

  use crate::domain::account::{AccountService, AccountView, Email, Password, TokenPair, Username};
  use crate::infrastructure::persistence::memory::InMemoryAccountRepository;
  use crate::infrastructure::security::{Argon2PasswordHasher, JwtTokenService};

  pub fn account_service() -> Arc<AccountService> {
    Arc::new(AccountService::new(
      Arc::new(InMemoryAccountRepository::new()),
      Arc::new(Argon2PasswordHasher::new().unwrap()),
      Arc::new(JwtTokenService::new(b"use-case-secret", 15, 60, "test")),
    ))
  }

  pub async fn register(service: &AccountService, username: &str, email: &str) -> AccountView {
    service
      .register(
        Username::new(username).unwrap(),
        Email::new(email).unwrap(),
        Password::new("password123"),
        String::new(),
        String::new(),
      )
      .await
      .unwrap()
  }

  pub async fn login(service: &AccountService, email: &str) -> TokenPair {
    service
      .login(email, Password::new("password123"))
      .await
      .unwrap()
      .tokens
  }
}
