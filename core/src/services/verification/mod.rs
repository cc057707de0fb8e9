//! Verification code store for email confirmation
//!
//! Codes are held in memory only. Each code is accepted for the configured
//! lifetime, consumed by the first matching check, and dropped by a timer
//! tied to that specific issuance if nobody uses it.

mod config;
mod store;
mod types;


pub use config::{VerificationStoreConfig, DEFAULT_MAX_ATTEMPTS};
pub use store::VerificationCodeStore;
pub use types::VerifyOutcome;
