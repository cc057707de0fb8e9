//! Console email provider
//!
//! Logs messages instead of sending them. This is the only place a
//! verification code is ever written to the log.

use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use uuid::Uuid;

use tpcm_shared::utils::validation::mask_email;

use super::email_service::{EmailMessage, EmailService};
use crate::InfrastructureError;

/// Email service for development
#[derive(Clone, Default)]
pub struct ConsoleEmailService {
    /// Counter for tracking number of messages sent
    message_count: Arc<AtomicU64>,
}

impl ConsoleEmailService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the total number of messages sent
    pub fn get_message_count(&self) -> u64 {
        self.message_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl EmailService for ConsoleEmailService {
    async fn send(&self, message: &EmailMessage) -> Result<String, InfrastructureError> {
        let message_id = format!("console-{}", Uuid::new_v4());
        self.message_count.fetch_add(1, Ordering::SeqCst);

        tracing::info!(
            to = %mask_email(&message.to),
            subject = %message.subject,
            message_id = %message_id,
            body = %message.body,
            "[CONSOLE EMAIL] Message not sent, logged instead"
        );

        Ok(message_id)
    }

    fn provider_name(&self) -> &str {
        "console"
    }
}
