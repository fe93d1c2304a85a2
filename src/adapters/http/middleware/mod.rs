pub mod auth;

pub use auth::{AuthMiddleware, authenticated_account};
