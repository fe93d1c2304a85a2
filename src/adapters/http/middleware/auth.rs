use actix_web::{
  Error, HttpMessage, HttpRequest, ResponseError,
  body::EitherBody,
  dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
  http::header::AUTHORIZATION,
};
use futures_util::future::LocalBoxFuture;
use std::{
  future::{Ready, ready},
  rc::Rc,
  sync::Arc,
};

use crate::{
  adapters::http::errors::{ApiError, AuthErrorKind},
  application::account::AuthenticateAccessTokenUseCase,
  domain::account::entities::AuthenticatedAccount,
};

/// Authentication middleware that validates bearer access tokens
///
/// This middleware:
/// 1. Extracts the token from the `Authorization: Bearer <token>` header
/// 2. Validates it as an access token (refresh tokens are rejected)
/// 3. Attaches the [`AuthenticatedAccount`] to request extensions
/// 4. Returns 401 Unauthorized if the header is missing or the token is invalid
pub struct AuthMiddleware {
  authenticate_use_case: Arc<AuthenticateAccessTokenUseCase>,
}

impl AuthMiddleware {
  pub fn new(authenticate_use_case: Arc<AuthenticateAccessTokenUseCase>) -> Self {
    Self {
      authenticate_use_case,
    }
  }
}

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
  S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
  S::Future: 'static,
  B: 'static,
{
  type Response = ServiceResponse<EitherBody<B>>;
  type Error = Error;
  type Transform = AuthMiddlewareService<S>;
  type InitError = ();
  type Future = Ready<Result<Self::Transform, Self::InitError>>;

  fn new_transform(&self, service: S) -> Self::Future {
    ready(Ok(AuthMiddlewareService {
      service: Rc::new(service),
      authenticate_use_case: self.authenticate_use_case.clone(),
    }))
  }
}

pub struct AuthMiddlewareService<S> {
  service: Rc<S>,
  authenticate_use_case: Arc<AuthenticateAccessTokenUseCase>,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
  S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
  S::Future: 'static,
  B: 'static,
{
  type Response = ServiceResponse<EitherBody<B>>;
  type Error = Error;
  type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

  forward_ready!(service);

  fn call(&self, req: ServiceRequest) -> Self::Future {
    let service = Rc::clone(&self.service);
    let authenticate_use_case = self.authenticate_use_case.clone();

    Box::pin(async move {
      let identity = extract_bearer_token(&req)
        .and_then(|token| authenticate_use_case.execute(token).map_err(ApiError::from));

      let account = match identity {
        Ok(account) => account,
        Err(e) => {
          let (request, _) = req.into_parts();
          let response = e.error_response().map_into_right_body();
          return Ok(ServiceResponse::new(request, response));
        }
      };

      tracing::debug!(account_id = %account.id, path = %req.path(), "Authenticated request");
      req.extensions_mut().insert(account);

      let res = service.call(req).await?;
      Ok(res.map_into_left_body())
    })
  }
}

/// Extract the bearer token from the Authorization header
fn extract_bearer_token(req: &ServiceRequest) -> Result<&str, ApiError> {
  req
    .headers()
    .get(AUTHORIZATION)
    .and_then(|h| h.to_str().ok())
    .and_then(|s| s.strip_prefix("Bearer "))
    .map(str::trim)
    .filter(|token| !token.is_empty())
    .ok_or(ApiError::Auth(AuthErrorKind::InvalidToken))
}

/// Get the identity attached by [`AuthMiddleware`]
///
/// Fails with 401 when called from a route the middleware does not wrap.
pub fn authenticated_account(req: &HttpRequest) -> Result<AuthenticatedAccount, ApiError> {
  let account = req.extensions().get::<AuthenticatedAccount>().cloned();

  if account.is_none() {
    tracing::warn!(
      "authenticated_account: no identity in request extensions for path {}",
      req.path()
    );
  }

  account.ok_or(ApiError::Auth(AuthErrorKind::InvalidToken))
}
