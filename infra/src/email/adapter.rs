//! Email Service Trait Adapter
//!
//! Implements the core `EmailDispatchTrait` on top of any [`EmailService`].

use async_trait::async_trait;
use tpcm_core::services::auth::EmailDispatchTrait;

use super::email_service::EmailService;

/// Adapter that implements the core EmailDispatchTrait
pub struct EmailServiceAdapter {
    inner: Box<dyn EmailService>,
}

impl EmailServiceAdapter {
    pub fn new(inner: Box<dyn EmailService>) -> Self {
        Self { inner }
    }

    pub fn provider_name(&self) -> &str {
        self.inner.provider_name()
    }
}

#[async_trait]
impl EmailDispatchTrait for EmailServiceAdapter {
    async fn send_verification_code(
        &self,
        email: &str,
        code: &str,
        ttl_minutes: u64,
    ) -> Result<String, String> {
        self.inner
            .send_verification_code(email, code, ttl_minutes)
            .await
            .map_err(|e| e.to_string())
    }
}
