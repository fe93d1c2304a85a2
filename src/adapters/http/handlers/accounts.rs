use actix_web::{HttpRequest, HttpResponse, web};
use std::sync::Arc;
use validator::Validate;

use crate::adapters::http::{
  dtos::{
    ChangePasswordRequest, ListAccountsQuery, ListAccountsResponse, SuccessResponse,
    UpdateProfileRequest,
  },
  errors::ApiError,
  middleware::authenticated_account,
};
use crate::application::account::{
  ChangePasswordCommand, ChangePasswordUseCase, GetProfileUseCase, ListAccountsCommand,
  ListAccountsUseCase, SetAccountStatusCommand, SetAccountStatusUseCase, UpdateProfileCommand,
  UpdateProfileUseCase,
};
use crate::domain::account::value_objects::AccountId;

/// GET /api/v1/users/me
pub async fn get_me_handler(
  use_case: web::Data<Arc<GetProfileUseCase>>,
  http_req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
  let account = authenticated_account(&http_req)?;

  let profile = use_case.execute(account.id).await?;

  Ok(HttpResponse::Ok().json(profile))
}

/// PUT /api/v1/users/me
///
/// Replaces every profile field; fields missing from the body are cleared.
pub async fn update_me_handler(
  request: web::Json<UpdateProfileRequest>,
  use_case: web::Data<Arc<UpdateProfileUseCase>>,
  http_req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
  request.validate()?;
  let account = authenticated_account(&http_req)?;

  let request = request.into_inner();
  let command = UpdateProfileCommand {
    account_id: account.id,
    first_name: request.first_name,
    last_name: request.last_name,
    avatar: request.avatar,
    timezone: request.timezone,
    language: request.language,
  };

  let profile = use_case.execute(command).await?;

  Ok(HttpResponse::Ok().json(profile))
}

/// PUT /api/v1/users/me/password
pub async fn change_password_handler(
  request: web::Json<ChangePasswordRequest>,
  use_case: web::Data<Arc<ChangePasswordUseCase>>,
  http_req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
  request.validate()?;
  let account = authenticated_account(&http_req)?;

  let request = request.into_inner();
  use_case
    .execute(ChangePasswordCommand {
      account_id: account.id,
      current_password: request.current_password,
      new_password: request.new_password,
    })
    .await?;

  Ok(HttpResponse::Ok().json(SuccessResponse {
    message: "Password changed".to_string(),
  }))
}

/// GET /api/v1/users?offset=&limit=
pub async fn list_accounts_handler(
  query: web::Query<ListAccountsQuery>,
  use_case: web::Data<Arc<ListAccountsUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let query = query.into_inner();
  let response = use_case
    .execute(ListAccountsCommand {
      offset: query.offset,
      limit: query.limit,
    })
    .await?;

  Ok(HttpResponse::Ok().json(ListAccountsResponse {
    accounts: response.accounts,
    total: response.total,
    offset: response.offset,
    limit: response.limit,
  }))
}

/// POST /api/v1/users/{id}/activate
pub async fn activate_account_handler(
  path: web::Path<i64>,
  use_case: web::Data<Arc<SetAccountStatusUseCase>>,
) -> Result<HttpResponse, ApiError> {
  set_status(path.into_inner(), true, &use_case).await
}

/// POST /api/v1/users/{id}/deactivate
pub async fn deactivate_account_handler(
  path: web::Path<i64>,
  use_case: web::Data<Arc<SetAccountStatusUseCase>>,
) -> Result<HttpResponse, ApiError> {
  set_status(path.into_inner(), false, &use_case).await
}

async fn set_status(
  id: i64,
  active: bool,
  use_case: &SetAccountStatusUseCase,
) -> Result<HttpResponse, ApiError> {
  use_case
    .execute(SetAccountStatusCommand {
      account_id: AccountId::new(id),
      active,
    })
    .await?;

  let message = if active {
    "Account activated"
  } else {
    "Account deactivated"
  };

  Ok(HttpResponse::Ok().json(SuccessResponse {
    message: message.to_string(),
  }))
}
