use actix_web::{HttpResponse, web};
use std::sync::Arc;
use validator::Validate;

use crate::adapters::http::{
  dtos::{LoginRequest, LoginResponse, RefreshRequest, RegisterRequest},
  errors::ApiError,
};
use crate::application::account::{
  LoginAccountCommand, LoginAccountUseCase, RefreshTokensCommand, RefreshTokensUseCase,
  RegisterAccountCommand, RegisterAccountUseCase,
};

/// Handler for account registration
///
/// POST /api/v1/auth/register
/// Body: RegisterRequest (JSON)
/// Response: AccountView (JSON) with status 201
pub async fn register_handler(
  request: web::Json<RegisterRequest>,
  use_case: web::Data<Arc<RegisterAccountUseCase>>,
) -> Result<HttpResponse, ApiError> {
  request.validate()?;

  let request = request.into_inner();
  let command = RegisterAccountCommand {
    username: request.username,
    email: request.email,
    password: request.password,
    first_name: request.first_name,
    last_name: request.last_name,
  };

  let response = use_case.execute(command).await?;

  Ok(HttpResponse::Created().json(response.account))
}

/// Handler for login
///
/// POST /api/v1/auth/login
/// Body: LoginRequest (JSON)
/// Response: LoginResponse (JSON) with status 200
pub async fn login_handler(
  request: web::Json<LoginRequest>,
  use_case: web::Data<Arc<LoginAccountUseCase>>,
) -> Result<HttpResponse, ApiError> {
  request.validate()?;

  let request = request.into_inner();
  let command = LoginAccountCommand {
    email: request.email,
    password: request.password,
  };

  let response = use_case.execute(command).await?;

  Ok(HttpResponse::Ok().json(LoginResponse {
    account: response.account,
    tokens: response.tokens,
  }))
}

/// Handler for token rotation
///
/// POST /api/v1/auth/refresh
/// Body: RefreshRequest (JSON)
/// Response: TokenPair (JSON) with status 200
pub async fn refresh_handler(
  request: web::Json<RefreshRequest>,
  use_case: web::Data<Arc<RefreshTokensUseCase>>,
) -> Result<HttpResponse, ApiError> {
  request.validate()?;

  let tokens = use_case
    .execute(RefreshTokensCommand {
      refresh_token: request.into_inner().refresh_token,
    })
    .await?;

  Ok(HttpResponse::Ok().json(tokens))
}
