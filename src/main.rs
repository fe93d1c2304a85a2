use actix_web::{App, HttpServer, middleware::Logger};
use anyhow::Context;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use user_accounts::{
  adapters::http::{AccountRouteDependencies, configure_api},
  domain::account::services::AccountService,
  infrastructure::{
    config::Config,
    persistence::postgres::PostgresAccountRepository,
    security::{Argon2PasswordHasher, JwtTokenService},
  },
};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
  // Initialize environment variables from .env file
  dotenvy::dotenv().ok();

  let config = Config::load().context("Failed to load configuration")?;

  // RUST_LOG wins over the configured filter
  tracing_subscriber::registry()
    .with(
      tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| config.log.filter.clone().into()),
    )
    .with(tracing_subscriber::fmt::layer())
    .init();

  tracing::info!("Starting user accounts service");
  tracing::debug!(?config, "Configuration loaded");

  let db_pool = tokio::time::timeout(
    Duration::from_secs(config.database.connect_timeout_seconds),
    PgPoolOptions::new()
      .max_connections(config.database.max_connections)
      .acquire_timeout(Duration::from_secs(config.database.acquire_timeout_seconds))
      .connect(&config.database.url),
  )
  .await
  .with_context(|| {
    format!(
      "Database connection timed out after {} seconds. Is PostgreSQL running?",
      config.database.connect_timeout_seconds
    )
  })?
  .context("Failed to connect to database")?;

  tracing::info!("Database connection pool created");

  sqlx::migrate!("./migrations")
    .run(&db_pool)
    .await
    .context("Failed to run database migrations")?;
  tracing::info!("Database migrations completed");

  let account_repo = Arc::new(PostgresAccountRepository::new(db_pool));
  let password_hasher =
    Arc::new(Argon2PasswordHasher::new().context("Failed to create password hasher")?);
  let token_service = Arc::new(JwtTokenService::from_config(&config.jwt));

  let account_service = Arc::new(AccountService::new(
    account_repo,
    password_hasher,
    token_service,
  ));
  let deps = AccountRouteDependencies::new(account_service);

  let server_host = config.server.host.clone();
  let server_port = config.server.port;

  tracing::info!("Starting HTTP server on {}:{}", server_host, server_port);

  HttpServer::new(move || {
    App::new()
      .wrap(Logger::default())
      .configure(|cfg| configure_api(cfg, &deps))
  })
  .bind((server_host.as_str(), server_port))?
  .run()
  .await?;

  Ok(())
}
