//! Email Service Module
//!
//! Email dispatch for verification codes.
//!
//! ## Providers
//!
//! - **Console**: logs the message, for development without mail credentials
//! - **Relay**: POSTs the message to an HTTP mail relay
//!
//! [`EmailServiceAdapter`] bridges a provider to the core
//! `EmailDispatchTrait`.

pub mod adapter;
pub mod console;
pub mod email_service;
pub mod relay;

pub use adapter::EmailServiceAdapter;
pub use console::ConsoleEmailService;
pub use email_service::{verification_message, EmailMessage, EmailService};
pub use relay::RelayEmailService;

use tpcm_shared::{EmailConfig, EmailProvider};


/// Create an email service based on configuration
///
/// A relay provider that cannot be built (missing URL, bad client settings)
/// falls back to the console provider with an error logged.
pub fn create_email_service(config: &EmailConfig) -> Box<dyn EmailService> {
    match config.provider {
        EmailProvider::Console => Box::new(ConsoleEmailService::new()),
        EmailProvider::Relay => match RelayEmailService::new(config) {
            Ok(service) => Box::new(service),
            Err(e) => {
                tracing::error!(error = %e, "Failed to initialize email relay");
                tracing::warn!("Falling back to console email service");
                Box::new(ConsoleEmailService::new())
            }
        },
    }
}
