//! Store user repository trait defining the interface for credential persistence.
//!
//! Implementations own the `store_users` data; the domain only ever creates
//! users and flips their verification flag.

use async_trait::async_trait;

use crate::domain::entities::StoreUser;
use crate::errors::DomainError;

/// Repository trait for StoreUser persistence operations
///
/// Lookups are exact-match on the stored values; callers normalize input
/// before querying.
#[async_trait]
pub trait StoreUserRepository: Send + Sync {
    /// Find a user by MSISDN
    ///
    /// # Returns
    /// * `Ok(Some(StoreUser))` - User found
    /// * `Ok(None)` - No user registered with this MSISDN
    /// * `Err(DomainError)` - Storage error
    async fn find_by_msisdn(&self, msisdn: &str) -> Result<Option<StoreUser>, DomainError>;

    /// Find a user by email address
    async fn find_by_email(&self, email: &str) -> Result<Option<StoreUser>, DomainError>;

    /// Check whether any user already holds this MSISDN or this email
    async fn exists_by_msisdn_or_email(
        &self,
        msisdn: &str,
        email: &str,
    ) -> Result<bool, DomainError>;

    /// Persist a new user
    ///
    /// # Returns
    /// * `Ok(StoreUser)` - The created user with its assigned id
    /// * `Err(DomainError::Conflict)` - MSISDN or email already taken
    async fn create(&self, user: StoreUser) -> Result<StoreUser, DomainError>;

    /// Mark the user owning `email` as verified
    ///
    /// # Returns
    /// * `Ok(true)` - A user was updated
    /// * `Ok(false)` - No user with this email
    async fn mark_email_verified(&self, email: &str) -> Result<bool, DomainError>;
}
