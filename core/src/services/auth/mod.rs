//! Authentication service module
//!
//! Credential flow for store users: registration gated by the subscriber
//! directory, email confirmation through the verification code store,
//! password login and session re-validation.

mod config;
mod password;
mod service;
mod traits;

#[cfg(test)]
mod tests;

pub use config::AuthServiceConfig;
pub use password::PasswordHasher;
pub use service::AuthService;
pub use traits::EmailDispatchTrait;
