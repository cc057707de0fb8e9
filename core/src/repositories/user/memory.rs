//! In-memory implementation of StoreUserRepository for development and tests

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::StoreUser;
use crate::errors::DomainError;

use super::trait_::StoreUserRepository;

/// In-memory store user repository keyed by MSISDN
pub struct InMemoryStoreUserRepository {
    users: Arc<RwLock<HashMap<String, StoreUser>>>,
    next_id: AtomicU64,
}

impl InMemoryStoreUserRepository {
    /// Create a new empty repository
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
            next_id: AtomicU64::new(1),
        }
    }

    /// Number of stored users
    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    /// Whether the repository is empty
    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

impl Default for InMemoryStoreUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StoreUserRepository for InMemoryStoreUserRepository {
    async fn find_by_msisdn(&self, msisdn: &str) -> Result<Option<StoreUser>, DomainError> {
        let users = self.users.read().await;
        Ok(users.get(msisdn).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<StoreUser>, DomainError> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn exists_by_msisdn_or_email(
        &self,
        msisdn: &str,
        email: &str,
    ) -> Result<bool, DomainError> {
        let users = self.users.read().await;
        Ok(users.contains_key(msisdn) || users.values().any(|u| u.email == email))
    }

    async fn create(&self, mut user: StoreUser) -> Result<StoreUser, DomainError> {
        let mut users = self.users.write().await;

        // Check and insert under the same write lock
        if users.contains_key(&user.msisdn) || users.values().any(|u| u.email == user.email) {
            return Err(DomainError::Conflict {
                message: "User already exists with this phone or email".to_string(),
            });
        }

        user.id = Some(self.next_id.fetch_add(1, Ordering::Relaxed));
        users.insert(user.msisdn.clone(), user.clone());
        Ok(user)
    }

    async fn mark_email_verified(&self, email: &str) -> Result<bool, DomainError> {
        let mut users = self.users.write().await;
        match users.values_mut().find(|u| u.email == email) {
            Some(user) => {
                user.email_verified = true;
                user.updated_at = Utc::now();
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
