pub mod dtos;
pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod routes;

// Re-export commonly used types
pub use dtos::{
  ChangePasswordRequest, ErrorResponse, ListAccountsQuery, ListAccountsResponse, LoginRequest,
  LoginResponse, RefreshRequest, RegisterRequest, SuccessResponse, UpdateProfileRequest,
};
pub use errors::{ApiError, AuthErrorKind};
pub use middleware::{AuthMiddleware, authenticated_account};
pub use routes::{
  AccountRouteDependencies, configure_account_routes, configure_api, configure_auth_routes,
};
