//! MySQL implementation of the StoreUserRepository trait.
//!
//! Backed by the `store_users` table:
//!
//! ```sql
//! CREATE TABLE store_users (
//!     id BIGINT UNSIGNED AUTO_INCREMENT PRIMARY KEY,
//!     msisdn VARCHAR(20) NOT NULL UNIQUE,
//!     email VARCHAR(255) NOT NULL UNIQUE,
//!     password_hash VARCHAR(255) NOT NULL,
//!     email_verified TINYINT(1) NOT NULL DEFAULT 0,
//!     created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
//!     updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP ON UPDATE CURRENT_TIMESTAMP
//! );
//! ```

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};

use tpcm_core::domain::entities::StoreUser;
use tpcm_core::errors::DomainError;
use tpcm_core::repositories::StoreUserRepository;

const USER_COLUMNS: &str =
    "id, msisdn, email, password_hash, email_verified, created_at, updated_at";

/// MySQL implementation of StoreUserRepository
pub struct MySqlStoreUserRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlStoreUserRepository {
    /// Create a new MySQL store user repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert database row to StoreUser entity
    fn row_to_user(row: &sqlx::mysql::MySqlRow) -> Result<StoreUser, DomainError> {
        Ok(StoreUser {
            id: Some(row.try_get::<u64, _>("id").map_err(column_error("id"))?),
            msisdn: row.try_get("msisdn").map_err(column_error("msisdn"))?,
            email: row.try_get("email").map_err(column_error("email"))?,
            password_hash: row
                .try_get("password_hash")
                .map_err(column_error("password_hash"))?,
            email_verified: row
                .try_get("email_verified")
                .map_err(column_error("email_verified"))?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(column_error("created_at"))?,
            updated_at: row
                .try_get::<DateTime<Utc>, _>("updated_at")
                .map_err(column_error("updated_at"))?,
        })
    }

    async fn find_one(&self, column: &str, value: &str) -> Result<Option<StoreUser>, DomainError> {
        let query = format!(
            "SELECT {} FROM store_users WHERE {} = ? LIMIT 1",
            USER_COLUMNS, column
        );

        let row = sqlx::query(&query)
            .bind(value)
            .fetch_optional(&self.pool)
            .await
            .map_err(query_error)?;

        row.as_ref().map(Self::row_to_user).transpose()
    }
}

fn column_error(column: &'static str) -> impl Fn(sqlx::Error) -> DomainError {
    move |e| DomainError::Internal {
        message: format!("Failed to get {}: {}", column, e),
    }
}

fn query_error(e: sqlx::Error) -> DomainError {
    tracing::error!(error = %e, "store_users query failed");
    DomainError::Internal {
        message: format!("Database query failed: {}", e),
    }
}

#[async_trait]
impl StoreUserRepository for MySqlStoreUserRepository {
    async fn find_by_msisdn(&self, msisdn: &str) -> Result<Option<StoreUser>, DomainError> {
        self.find_one("msisdn", msisdn).await
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<StoreUser>, DomainError> {
        self.find_one("email", email).await
    }

    async fn exists_by_msisdn_or_email(
        &self,
        msisdn: &str,
        email: &str,
    ) -> Result<bool, DomainError> {
        let row = sqlx::query("SELECT id FROM store_users WHERE msisdn = ? OR email = ? LIMIT 1")
            .bind(msisdn)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(query_error)?;

        Ok(row.is_some())
    }

    async fn create(&self, user: StoreUser) -> Result<StoreUser, DomainError> {
        let query = r#"
            INSERT INTO store_users (
                msisdn, email, password_hash, email_verified, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?)
        "#;

        let result = sqlx::query(query)
            .bind(&user.msisdn)
            .bind(&user.email)
            .bind(&user.password_hash)
            .bind(user.email_verified)
            .bind(user.created_at)
            .bind(user.updated_at)
            .execute(&self.pool)
            .await
            .map_err(|e| match e {
                sqlx::Error::Database(db) if db.is_unique_violation() => DomainError::Conflict {
                    message: "User already exists with this phone or email".to_string(),
                },
                other => query_error(other),
            })?;

        Ok(StoreUser {
            id: Some(result.last_insert_id()),
            ..user
        })
    }

    async fn mark_email_verified(&self, email: &str) -> Result<bool, DomainError> {
        let result = sqlx::query(
            "UPDATE store_users SET email_verified = 1, updated_at = ? WHERE email = ?",
        )
        .bind(Utc::now())
        .bind(email)
        .execute(&self.pool)
        .await
        .map_err(query_error)?;

        Ok(result.rows_affected() > 0)
    }
}
