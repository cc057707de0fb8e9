//! Subscriber directory trait: read-only access to the external system of
//! record for subscriber identity and status.

use async_trait::async_trait;

use crate::domain::entities::SubscriberSnapshot;
use crate::errors::DomainError;

/// Lookup interface for the subscriber directory.
///
/// Implementations must hit the source of truth on every call; results are
/// used for trust decisions and must not be cached.
#[async_trait]
pub trait SubscriberDirectory: Send + Sync {
    /// Fetch the current snapshot for an MSISDN, whatever its status
    ///
    /// # Returns
    /// * `Ok(Some(snapshot))` - Subscriber known to the directory
    /// * `Ok(None)` - Unknown MSISDN
    /// * `Err(DomainError::ExternalService)` - Directory unreachable
    async fn find_by_msisdn(&self, msisdn: &str) -> Result<Option<SubscriberSnapshot>, DomainError>;
}
