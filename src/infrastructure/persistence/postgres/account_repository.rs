use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use sqlx::postgres::PgQueryResult;

use crate::domain::account::{
  entities::{Account, NewAccount},
  errors::RepositoryError,
  ports::AccountRepository,
  value_objects::AccountId,
};

const ACCOUNT_COLUMNS: &str = r#"
    id,
    username,
    email,
    password_hash,
    is_active,
    first_name,
    last_name,
    avatar,
    timezone,
    language,
    last_login_at,
    password_reset_token,
    password_reset_expires_at,
    created_at,
    updated_at,
    deleted_at
"#;

/// PostgreSQL implementation of the AccountRepository trait
pub struct PostgresAccountRepository {
  pool: PgPool,
}

impl PostgresAccountRepository {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }

  async fn find_one(&self, filter: &str, value: &str) -> Result<Option<Account>, RepositoryError> {
    let sql = format!(
      "SELECT {} FROM accounts WHERE {} = $1 AND deleted_at IS NULL",
      ACCOUNT_COLUMNS, filter
    );

    let row = sqlx::query_as::<_, AccountRow>(&sql)
      .bind(value)
      .fetch_optional(&self.pool)
      .await?;

    Ok(row.map(Account::from))
  }
}

/// Database row structure for accounts table
#[derive(Debug, sqlx::FromRow)]
struct AccountRow {
  id: i64,
  username: String,
  email: String,
  password_hash: String,
  is_active: bool,
  first_name: String,
  last_name: String,
  avatar: String,
  timezone: String,
  language: String,
  last_login_at: Option<DateTime<Utc>>,
  password_reset_token: Option<String>,
  password_reset_expires_at: Option<DateTime<Utc>>,
  created_at: DateTime<Utc>,
  updated_at: DateTime<Utc>,
  deleted_at: Option<DateTime<Utc>>,
}

impl From<AccountRow> for Account {
  fn from(row: AccountRow) -> Self {
    Account {
      id: AccountId::new(row.id),
      username: row.username,
      email: row.email,
      password_hash: row.password_hash,
      is_active: row.is_active,
      first_name: row.first_name,
      last_name: row.last_name,
      avatar: row.avatar,
      timezone: row.timezone,
      language: row.language,
      last_login_at: row.last_login_at,
      password_reset_token: row.password_reset_token,
      password_reset_expires_at: row.password_reset_expires_at,
      created_at: row.created_at,
      updated_at: row.updated_at,
      deleted_at: row.deleted_at,
    }
  }
}

/// Maps an UPDATE that touched no live row to `NotFound`
fn expect_row(result: PgQueryResult) -> Result<(), RepositoryError> {
  if result.rows_affected() == 0 {
    Err(RepositoryError::NotFound)
  } else {
    Ok(())
  }
}

#[async_trait]
impl AccountRepository for PostgresAccountRepository {
  async fn create(&self, account: NewAccount) -> Result<Account, RepositoryError> {
    let sql = format!(
      r#"
            INSERT INTO accounts (
                username,
                email,
                password_hash,
                is_active,
                first_name,
                last_name,
                timezone,
                language
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {}
            "#,
      ACCOUNT_COLUMNS
    );

    let row = sqlx::query_as::<_, AccountRow>(&sql)
      .bind(&account.username)
      .bind(&account.email)
      .bind(&account.password_hash)
      .bind(account.is_active)
      .bind(&account.first_name)
      .bind(&account.last_name)
      .bind(&account.timezone)
      .bind(&account.language)
      .fetch_one(&self.pool)
      .await?;

    Ok(row.into())
  }

  async fn get_by_id(&self, id: AccountId) -> Result<Option<Account>, RepositoryError> {
    let sql = format!(
      "SELECT {} FROM accounts WHERE id = $1 AND deleted_at IS NULL",
      ACCOUNT_COLUMNS
    );

    let row = sqlx::query_as::<_, AccountRow>(&sql)
      .bind(id.into_inner())
      .fetch_optional(&self.pool)
      .await?;

    Ok(row.map(Account::from))
  }

  async fn get_by_email(&self, email: &str) -> Result<Option<Account>, RepositoryError> {
    self.find_one("email", email).await
  }

  async fn get_by_username(&self, username: &str) -> Result<Option<Account>, RepositoryError> {
    self.find_one("username", username).await
  }

  async fn update(&self, account: &Account) -> Result<Account, RepositoryError> {
    let sql = format!(
      r#"
            UPDATE accounts
            SET
                username = $2,
                email = $3,
                password_hash = $4,
                is_active = $5,
                first_name = $6,
                last_name = $7,
                avatar = $8,
                timezone = $9,
                language = $10,
                last_login_at = $11,
                password_reset_token = $12,
                password_reset_expires_at = $13,
                updated_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            RETURNING {}
            "#,
      ACCOUNT_COLUMNS
    );

    let row = sqlx::query_as::<_, AccountRow>(&sql)
      .bind(account.id.into_inner())
      .bind(&account.username)
      .bind(&account.email)
      .bind(&account.password_hash)
      .bind(account.is_active)
      .bind(&account.first_name)
      .bind(&account.last_name)
      .bind(&account.avatar)
      .bind(&account.timezone)
      .bind(&account.language)
      .bind(account.last_login_at)
      .bind(&account.password_reset_token)
      .bind(account.password_reset_expires_at)
      .fetch_optional(&self.pool)
      .await?;

    row.map(Account::from).ok_or(RepositoryError::NotFound)
  }

  async fn delete(&self, id: AccountId) -> Result<(), RepositoryError> {
    let result = sqlx::query(
      r#"
            UPDATE accounts
            SET
                deleted_at = NOW(),
                updated_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            "#,
    )
    .bind(id.into_inner())
    .execute(&self.pool)
    .await?;

    expect_row(result)
  }

  async fn list(&self, offset: i64, limit: i64) -> Result<Vec<Account>, RepositoryError> {
    let sql = format!(
      r#"
            SELECT {}
            FROM accounts
            WHERE deleted_at IS NULL
            ORDER BY created_at DESC, id DESC
            LIMIT $1 OFFSET $2
            "#,
      ACCOUNT_COLUMNS
    );

    let rows = sqlx::query_as::<_, AccountRow>(&sql)
      // Postgres rejects negative LIMIT/OFFSET; an empty page matches the in-memory store
      .bind(limit.max(0))
      .bind(offset.max(0))
      .fetch_all(&self.pool)
      .await?;

    Ok(rows.into_iter().map(Account::from).collect())
  }

  async fn count(&self) -> Result<i64, RepositoryError> {
    let count =
      sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM accounts WHERE deleted_at IS NULL")
        .fetch_one(&self.pool)
        .await?;

    Ok(count)
  }

  async fn exists(&self, id: AccountId) -> Result<bool, RepositoryError> {
    let exists = sqlx::query_scalar::<_, bool>(
      "SELECT EXISTS(SELECT 1 FROM accounts WHERE id = $1 AND deleted_at IS NULL)",
    )
    .bind(id.into_inner())
    .fetch_one(&self.pool)
    .await?;

    Ok(exists)
  }

  async fn exists_by_email(&self, email: &str) -> Result<bool, RepositoryError> {
    let exists = sqlx::query_scalar::<_, bool>(
      "SELECT EXISTS(SELECT 1 FROM accounts WHERE email = $1 AND deleted_at IS NULL)",
    )
    .bind(email)
    .fetch_one(&self.pool)
    .await?;

    Ok(exists)
  }

  async fn exists_by_username(&self, username: &str) -> Result<bool, RepositoryError> {
    let exists = sqlx::query_scalar::<_, bool>(
      "SELECT EXISTS(SELECT 1 FROM accounts WHERE username = $1 AND deleted_at IS NULL)",
    )
    .bind(username)
    .fetch_one(&self.pool)
    .await?;

    Ok(exists)
  }

  async fn update_password(&self, id: AccountId, password_hash: &str) -> Result<(), RepositoryError> {
    let result = sqlx::query(
      r#"
            UPDATE accounts
            SET password_hash = $2, updated_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            "#,
    )
    .bind(id.into_inner())
    .bind(password_hash)
    .execute(&self.pool)
    .await?;

    expect_row(result)
  }

  async fn update_last_login(&self, id: AccountId) -> Result<(), RepositoryError> {
    let result = sqlx::query(
      r#"
            UPDATE accounts
            SET last_login_at = NOW(), updated_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            "#,
    )
    .bind(id.into_inner())
    .execute(&self.pool)
    .await?;

    expect_row(result)
  }

  async fn set_password_reset_token(
    &self,
    id: AccountId,
    token: &str,
    expires_at: DateTime<Utc>,
  ) -> Result<(), RepositoryError> {
    let result = sqlx::query(
      r#"
            UPDATE accounts
            SET
                password_reset_token = $2,
                password_reset_expires_at = $3,
                updated_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            "#,
    )
    .bind(id.into_inner())
    .bind(token)
    .bind(expires_at)
    .execute(&self.pool)
    .await?;

    expect_row(result)
  }

  async fn clear_password_reset_token(&self, id: AccountId) -> Result<(), RepositoryError> {
    let result = sqlx::query(
      r#"
            UPDATE accounts
            SET
                password_reset_token = NULL,
                password_reset_expires_at = NULL,
                updated_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            "#,
    )
    .bind(id.into_inner())
    .execute(&self.pool)
    .await?;

    expect_row(result)
  }

  async fn activate(&self, id: AccountId) -> Result<(), RepositoryError> {
    let result = sqlx::query(
      "UPDATE accounts SET is_active = TRUE, updated_at = NOW() WHERE id = $1 AND deleted_at IS NULL",
    )
    .bind(id.into_inner())
    .execute(&self.pool)
    .await?;

    expect_row(result)
  }

  async fn deactivate(&self, id: AccountId) -> Result<(), RepositoryError> {
    let result = sqlx::query(
      "UPDATE accounts SET is_active = FALSE, updated_at = NOW() WHERE id = $1 AND deleted_at IS NULL",
    )
    .bind(id.into_inner())
    .execute(&self.pool)
    .await?;

    expect_row(result)
  }
}
