use actix_web::{HttpResponse, web};
use std::sync::Arc;

use crate::application::account::{
  AuthenticateAccessTokenUseCase, ChangePasswordUseCase, GetProfileUseCase, ListAccountsUseCase,
  LoginAccountUseCase, RefreshTokensUseCase, RegisterAccountUseCase, SetAccountStatusUseCase,
  UpdateProfileUseCase,
};
use crate::domain::account::services::AccountService;

use super::handlers::accounts::{
  activate_account_handler, change_password_handler, deactivate_account_handler, get_me_handler,
  list_accounts_handler, update_me_handler,
};
use super::handlers::auth::{login_handler, refresh_handler, register_handler};
use super::middleware::AuthMiddleware;

/// Every use case the account API needs, built once and shared by all workers
#[derive(Clone)]
pub struct AccountRouteDependencies {
  pub register_use_case: Arc<RegisterAccountUseCase>,
  pub login_use_case: Arc<LoginAccountUseCase>,
  pub refresh_use_case: Arc<RefreshTokensUseCase>,
  pub authenticate_use_case: Arc<AuthenticateAccessTokenUseCase>,
  pub get_profile_use_case: Arc<GetProfileUseCase>,
  pub update_profile_use_case: Arc<UpdateProfileUseCase>,
  pub change_password_use_case: Arc<ChangePasswordUseCase>,
  pub list_accounts_use_case: Arc<ListAccountsUseCase>,
  pub set_status_use_case: Arc<SetAccountStatusUseCase>,
}

impl AccountRouteDependencies {
  pub fn new(account_service: Arc<AccountService>) -> Self {
    Self {
      register_use_case: Arc::new(RegisterAccountUseCase::new(account_service.clone())),
      login_use_case: Arc::new(LoginAccountUseCase::new(account_service.clone())),
      refresh_use_case: Arc::new(RefreshTokensUseCase::new(account_service.clone())),
      authenticate_use_case: Arc::new(AuthenticateAccessTokenUseCase::new(
        account_service.clone(),
      )),
      get_profile_use_case: Arc::new(GetProfileUseCase::new(account_service.clone())),
      update_profile_use_case: Arc::new(UpdateProfileUseCase::new(account_service.clone())),
      change_password_use_case: Arc::new(ChangePasswordUseCase::new(account_service.clone())),
      list_accounts_use_case: Arc::new(ListAccountsUseCase::new(account_service.clone())),
      set_status_use_case: Arc::new(SetAccountStatusUseCase::new(account_service)),
    }
  }
}

/// Configure authentication routes
///
/// # Routes
///
/// - POST /register - Register a new account
/// - POST /login - Exchange credentials for a token pair
/// - POST /refresh - Exchange a refresh token for a new pair
pub fn configure_auth_routes(cfg: &mut web::ServiceConfig, deps: &AccountRouteDependencies) {
  cfg
    .app_data(web::Data::new(deps.register_use_case.clone()))
    .app_data(web::Data::new(deps.login_use_case.clone()))
    .app_data(web::Data::new(deps.refresh_use_case.clone()))
    .route("/register", web::post().to(register_handler))
    .route("/login", web::post().to(login_handler))
    .route("/refresh", web::post().to(refresh_handler));
}

/// Configure account routes; every route requires a valid access token
///
/// # Routes
///
/// - GET /me, PUT /me - Read or replace the caller's profile
/// - PUT /me/password - Change the caller's password
/// - GET "" - List accounts (`offset`, `limit` query parameters)
/// - POST /{id}/activate, POST /{id}/deactivate - Toggle an account
pub fn configure_account_routes(cfg: &mut web::ServiceConfig, deps: &AccountRouteDependencies) {
  cfg
    .app_data(web::Data::new(deps.get_profile_use_case.clone()))
    .app_data(web::Data::new(deps.update_profile_use_case.clone()))
    .app_data(web::Data::new(deps.change_password_use_case.clone()))
    .app_data(web::Data::new(deps.list_accounts_use_case.clone()))
    .app_data(web::Data::new(deps.set_status_use_case.clone()))
    .route("", web::get().to(list_accounts_handler))
    .route("/me", web::get().to(get_me_handler))
    .route("/me", web::put().to(update_me_handler))
    .route("/me/password", web::put().to(change_password_handler))
    .route("/{id}/activate", web::post().to(activate_account_handler))
    .route("/{id}/deactivate", web::post().to(deactivate_account_handler));
}

/// Mount the whole versioned API plus the health check
pub fn configure_api(cfg: &mut web::ServiceConfig, deps: &AccountRouteDependencies) {
  cfg
    .service(web::scope("/api/v1/auth").configure(|cfg| configure_auth_routes(cfg, deps)))
    .service(
      web::scope("/api/v1/users")
        .wrap(AuthMiddleware::new(deps.authenticate_use_case.clone()))
        .configure(|cfg| configure_account_routes(cfg, deps)),
    )
    .route("/health", web::get().to(health_check));
}

/// Health check endpoint
async fn health_check() -> HttpResponse {
  HttpResponse::Ok().body("OK")
}
