use actix_web::{App, http::StatusCode, test};
use serde_json::{Value, json};
use std::sync::Arc;

use user_accounts::adapters::http::{
  AccountRouteDependencies, ListAccountsResponse, LoginResponse, configure_api,
};
use user_accounts::domain::account::{AccountService, AccountView, TokenPair};
use user_accounts::infrastructure::persistence::memory::InMemoryAccountRepository;
use user_accounts::infrastructure::security::{Argon2PasswordHasher, JwtTokenService};

fn dependencies() -> AccountRouteDependencies {
  let service = Arc::new(AccountService::new(
    Arc::new(InMemoryAccountRepository::new()),
    Arc::new(Argon2PasswordHasher::new().unwrap()),
    Arc::new(JwtTokenService::new(b"http-test-secret", 15, 60, "test")),
  ));
  AccountRouteDependencies::new(service)
}

fn register_body() -> Value {
  json!({
    "username": "testuser",
    "email": "test@example.com",
    "password": "password123",
    "first_name": "Test",
    "last_name": "User"
  })
}

#[actix_web::test]
async fn test_health() {
  let deps = dependencies();
  let app = test::init_service(App::new().configure(|cfg| configure_api(cfg, &deps))).await;

  let resp = test::call_service(&app, test::TestRequest::get().uri("/health").to_request()).await;

  assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_register_login_and_profile() {
  let deps = dependencies();
  let app = test::init_service(App::new().configure(|cfg| configure_api(cfg, &deps))).await;

  let req = test::TestRequest::post()
    .uri("/api/v1/auth/register")
    .set_json(register_body())
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::CREATED);
  let body: Value = test::read_body_json(resp).await;
  assert!(body.get("password_hash").is_none());
  assert_eq!(body["email"], "test@example.com");

  let req = test::TestRequest::post()
    .uri("/api/v1/auth/register")
    .set_json(register_body())
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::CONFLICT);

  let req = test::TestRequest::post()
    .uri("/api/v1/auth/login")
    .set_json(json!({"email": "test@example.com", "password": "password123"}))
    .to_request();
  let login: LoginResponse = test::call_and_read_body_json(&app, req).await;
  assert_eq!(login.tokens.token_type, "Bearer");

  let req = test::TestRequest::get()
    .uri("/api/v1/users/me")
    .insert_header((
      "Authorization",
      format!("Bearer {}", login.tokens.access_token),
    ))
    .to_request();
  let me: AccountView = test::call_and_read_body_json(&app, req).await;
  assert_eq!(me.username, "testuser");

  let req = test::TestRequest::put()
    .uri("/api/v1/users/me")
    .insert_header((
      "Authorization",
      format!("Bearer {}", login.tokens.access_token),
    ))
    .set_json(json!({"first_name": "Ada", "language": "en"}))
    .to_request();
  let updated: AccountView = test::call_and_read_body_json(&app, req).await;
  assert_eq!(updated.first_name, "Ada");
  assert_eq!(updated.last_name, "");
  assert_eq!(updated.language, "en");
}

#[actix_web::test]
async fn test_protected_routes_require_access_token() {
  let deps = dependencies();
  let app = test::init_service(App::new().configure(|cfg| configure_api(cfg, &deps))).await;

  let resp = test::call_service(
    &app,
    test::TestRequest::get().uri("/api/v1/users/me").to_request(),
  )
  .await;
  assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

  let req = test::TestRequest::post()
    .uri("/api/v1/auth/register")
    .set_json(register_body())
    .to_request();
  test::call_service(&app, req).await;

  let req = test::TestRequest::post()
    .uri("/api/v1/auth/login")
    .set_json(json!({"email": "test@example.com", "password": "password123"}))
    .to_request();
  let login: LoginResponse = test::call_and_read_body_json(&app, req).await;

  // A refresh token is not accepted where an access token is expected
  let req = test::TestRequest::get()
    .uri("/api/v1/users/me")
    .insert_header((
      "Authorization",
      format!("Bearer {}", login.tokens.refresh_token),
    ))
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
  let body: Value = test::read_body_json(resp).await;
  assert_eq!(body["error"], "invalid_token");

  let req = test::TestRequest::post()
    .uri("/api/v1/auth/refresh")
    .set_json(json!({"refresh_token": login.tokens.refresh_token}))
    .to_request();
  let rotated: TokenPair = test::call_and_read_body_json(&app, req).await;
  assert!(!rotated.access_token.is_empty());
}

#[actix_web::test]
async fn test_login_failures_share_one_response() {
  let deps = dependencies();
  let app = test::init_service(App::new().configure(|cfg| configure_api(cfg, &deps))).await;

  let req = test::TestRequest::post()
    .uri("/api/v1/auth/register")
    .set_json(register_body())
    .to_request();
  test::call_service(&app, req).await;

  let mut bodies = Vec::new();
  for (email, password) in [
    ("test@example.com", "wrongpassword"),
    ("nobody@example.com", "password123"),
    ("not-an-email", "password123"),
  ] {
    let req = test::TestRequest::post()
      .uri("/api/v1/auth/login")
      .set_json(json!({"email": email, "password": password}))
      .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(resp).await;
    bodies.push(body);
  }

  assert!(bodies.windows(2).all(|pair| pair[0] == pair[1]));
}

#[actix_web::test]
async fn test_password_change_and_account_admin() {
  let deps = dependencies();
  let app = test::init_service(App::new().configure(|cfg| configure_api(cfg, &deps))).await;

  let req = test::TestRequest::post()
    .uri("/api/v1/auth/register")
    .set_json(register_body())
    .to_request();
  let account: AccountView = test::call_and_read_body_json(&app, req).await;

  let req = test::TestRequest::post()
    .uri("/api/v1/auth/login")
    .set_json(json!({"email": "test@example.com", "password": "password123"}))
    .to_request();
  let login: LoginResponse = test::call_and_read_body_json(&app, req).await;
  let bearer = format!("Bearer {}", login.tokens.access_token);

  let req = test::TestRequest::put()
    .uri("/api/v1/users/me/password")
    .insert_header(("Authorization", bearer.clone()))
    .set_json(json!({"current_password": "password123", "new_password": "123"}))
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

  let req = test::TestRequest::put()
    .uri("/api/v1/users/me/password")
    .insert_header(("Authorization", bearer.clone()))
    .set_json(json!({"current_password": "password123", "new_password": "newpassword456"}))
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::OK);

  let req = test::TestRequest::get()
    .uri("/api/v1/users?limit=1000")
    .insert_header(("Authorization", bearer.clone()))
    .to_request();
  let page: ListAccountsResponse = test::call_and_read_body_json(&app, req).await;
  assert_eq!(page.total, 1);
  assert_eq!(page.limit, 100);

  let req = test::TestRequest::post()
    .uri("/api/v1/users/999/deactivate")
    .insert_header(("Authorization", bearer.clone()))
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::NOT_FOUND);

  let req = test::TestRequest::post()
    .uri(&format!("/api/v1/users/{}/deactivate", account.id))
    .insert_header(("Authorization", bearer))
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::OK);

  let req = test::TestRequest::post()
    .uri("/api/v1/auth/login")
    .set_json(json!({"email": "test@example.com", "password": "newpassword456"}))
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}
