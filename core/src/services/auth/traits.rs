//! Traits for email dispatch integration

use async_trait::async_trait;

/// Trait for email dispatch integration
#[async_trait]
pub trait EmailDispatchTrait: Send + Sync {
    /// Send a verification code to an email address.
    /// Returns a provider message id on success.
    async fn send_verification_code(
        &self,
        email: &str,
        code: &str,
        ttl_minutes: u64,
    ) -> Result<String, String>;
}
