//! In-memory subscriber directory for local development and tests

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::SubscriberSnapshot;
use crate::errors::DomainError;

use super::trait_::SubscriberDirectory;

/// Subscriber directory backed by a map; status can be changed at runtime
/// to simulate the external side suspending a subscriber
pub struct InMemorySubscriberDirectory {
    subscribers: Arc<RwLock<HashMap<String, SubscriberSnapshot>>>,
    lookups: AtomicUsize,
    unavailable: AtomicBool,
}

impl InMemorySubscriberDirectory {
    /// Create an empty directory
    pub fn new() -> Self {
        Self {
            subscribers: Arc::new(RwLock::new(HashMap::new())),
            lookups: AtomicUsize::new(0),
            unavailable: AtomicBool::new(false),
        }
    }

    /// Create a directory pre-populated with the given snapshots
    pub fn with_subscribers(subscribers: impl IntoIterator<Item = SubscriberSnapshot>) -> Self {
        let map = subscribers
            .into_iter()
            .map(|s| (s.msisdn.clone(), s))
            .collect();
        Self {
            subscribers: Arc::new(RwLock::new(map)),
            ..Self::new()
        }
    }

    /// Add or replace a subscriber
    pub async fn upsert(&self, subscriber: SubscriberSnapshot) {
        let mut subscribers = self.subscribers.write().await;
        subscribers.insert(subscriber.msisdn.clone(), subscriber);
    }

    /// Change a subscriber's status; returns false for unknown MSISDNs
    pub async fn set_status(&self, msisdn: &str, status: &str) -> bool {
        let mut subscribers = self.subscribers.write().await;
        match subscribers.get_mut(msisdn) {
            Some(subscriber) => {
                subscriber.status = status.to_string();
                true
            }
            None => false,
        }
    }

    /// Remove a subscriber
    pub async fn remove(&self, msisdn: &str) -> bool {
        self.subscribers.write().await.remove(msisdn).is_some()
    }

    /// Make every lookup fail as if the directory were down
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Number of lookups served so far
    pub fn lookup_count(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

impl Default for InMemorySubscriberDirectory {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SubscriberDirectory for InMemorySubscriberDirectory {
    async fn find_by_msisdn(&self, msisdn: &str) -> Result<Option<SubscriberSnapshot>, DomainError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(DomainError::external(
                "subscriber_directory",
                "directory unavailable",
            ));
        }
        let subscribers = self.subscribers.read().await;
        Ok(subscribers.get(msisdn).cloned())
    }
}
