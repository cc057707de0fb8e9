//! MySQL pool shared by the store-user repository and the subscriber directory

use sqlx::mysql::{MySqlConnectOptions, MySqlPoolOptions};
use sqlx::MySqlPool;
use std::str::FromStr;
use std::time::Duration;

use tpcm_shared::DatabaseConfig;

use crate::InfrastructureError;

#[derive(Clone)]
pub struct DatabasePool {
    pool: MySqlPool,
}

impl DatabasePool {
    /// Open a pool sized and timed from `config`
    ///
    /// Connections are made lazily; call [`DatabasePool::ping`] to find out
    /// at startup whether the server is reachable.
    pub async fn new(config: &DatabaseConfig) -> Result<Self, InfrastructureError> {
        let options = MySqlConnectOptions::from_str(&config.url)
            .map_err(|e| InfrastructureError::Config(format!("Invalid database URL: {}", e)))?;

        let pool = MySqlPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(Duration::from_secs(config.connect_timeout))
            .idle_timeout(Duration::from_secs(config.idle_timeout))
            .max_lifetime(Duration::from_secs(config.max_lifetime))
            .connect_lazy_with(options);

        tracing::debug!(
            max_connections = config.max_connections,
            min_connections = config.min_connections,
            "MySQL pool configured"
        );
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &MySqlPool {
        &self.pool
    }

    /// Round-trip a trivial query
    pub async fn ping(&self) -> Result<(), InfrastructureError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, event = "database_unreachable", "MySQL ping failed");
                InfrastructureError::Database(e)
            })?;
        tracing::info!(event = "database_connected", "Connected to MySQL");
        Ok(())
    }

    pub async fn close(&self) {
        self.pool.close().await;
        tracing::info!("MySQL pool closed");
    }
}
