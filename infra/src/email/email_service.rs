//! Email Service Interface

use async_trait::async_trait;

use crate::InfrastructureError;

/// Subject line of the verification email
pub const VERIFICATION_SUBJECT: &str = "TPCM Store - Verify Email";

/// A plain-text email
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// Build the verification email for `code`
pub fn verification_message(to: &str, code: &str, ttl_minutes: u64) -> EmailMessage {
    EmailMessage {
        to: to.to_string(),
        subject: VERIFICATION_SUBJECT.to_string(),
        body: format!(
            "Your verification code is: {}\n\nThis code expires in {} minutes.",
            code, ttl_minutes
        ),
    }
}

/// Email service trait for sending messages
///
/// Implementations include:
/// - HTTP mail relay
/// - Console output for development
#[async_trait]
pub trait EmailService: Send + Sync {
    /// Send a message
    ///
    /// # Returns
    ///
    /// * `Ok(message_id)` - Identifier for the sent message
    /// * `Err(InfrastructureError)` - If sending fails
    async fn send(&self, message: &EmailMessage) -> Result<String, InfrastructureError>;

    /// Send a verification code
    async fn send_verification_code(
        &self,
        email: &str,
        code: &str,
        ttl_minutes: u64,
    ) -> Result<String, InfrastructureError> {
        self.send(&verification_message(email, code, ttl_minutes))
            .await
    }

    /// Provider name (e.g. "console", "relay")
    fn provider_name(&self) -> &str;
}
