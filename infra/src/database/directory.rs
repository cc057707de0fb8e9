//! Subscriber directory selected from configuration

use async_trait::async_trait;
use sqlx::MySqlPool;

use tpcm_core::domain::entities::{SubscriberSnapshot, ACTIVE_STATUS};
use tpcm_core::errors::DomainError;
use tpcm_core::repositories::{InMemorySubscriberDirectory, SubscriberDirectory};
use tpcm_shared::config::DirectoryBackend;

use super::MySqlSubscriberDirectory;

/// Environment variable listing MSISDNs the in-memory directory reports as active
pub const DEV_SUBSCRIBERS_ENV: &str = "DEV_ACTIVE_MSISDNS";

/// Either the TPCM tables or a seeded in-memory map
pub enum ConfiguredDirectory {
    MySql(MySqlSubscriberDirectory),
    Memory(InMemorySubscriberDirectory),
}

impl ConfiguredDirectory {
    pub fn new(backend: DirectoryBackend, pool: MySqlPool) -> Self {
        match backend {
            DirectoryBackend::Mysql => Self::MySql(MySqlSubscriberDirectory::new(pool)),
            DirectoryBackend::Memory => {
                let seed = std::env::var(DEV_SUBSCRIBERS_ENV).unwrap_or_default();
                let subscribers = development_subscribers(&seed);
                tracing::warn!(
                    subscribers = subscribers.len(),
                    "Using in-memory subscriber directory"
                );
                Self::Memory(InMemorySubscriberDirectory::with_subscribers(subscribers))
            }
        }
    }

    pub fn backend_name(&self) -> &'static str {
        match self {
            Self::MySql(_) => "mysql",
            Self::Memory(_) => "memory",
        }
    }
}

/// One active prepaid subscriber per comma-separated MSISDN
fn development_subscribers(seed: &str) -> Vec<SubscriberSnapshot> {
    seed.split(',')
        .map(str::trim)
        .filter(|msisdn| !msisdn.is_empty())
        .enumerate()
        .map(|(i, msisdn)| SubscriberSnapshot {
            subscriber_id: i as i64 + 1,
            msisdn: msisdn.to_string(),
            status: ACTIVE_STATUS.to_string(),
            subscription_type: "PREPAID".to_string(),
            customer_id: i as i64 + 1,
            customer_name: format!("Development Customer {}", i + 1),
        })
        .collect()
}

#[async_trait]
impl SubscriberDirectory for ConfiguredDirectory {
    async fn find_by_msisdn(&self, msisdn: &str) -> Result<Option<SubscriberSnapshot>, DomainError> {
        match self {
            Self::MySql(directory) => directory.find_by_msisdn(msisdn).await,
            Self::Memory(directory) => directory.find_by_msisdn(msisdn).await,
        }
    }
}
