//! Configuration for the verification code store

use std::time::Duration;

use tpcm_shared::config::VerificationConfig;

use crate::domain::entities::verification_code::{
    DEFAULT_EVICTION_MINUTES, DEFAULT_EXPIRATION_MINUTES,
};

/// Default number of wrong guesses tolerated per code
pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;

/// Configuration for the verification code store
#[derive(Debug, Clone)]
pub struct VerificationStoreConfig {
    /// How long an issued code is accepted
    pub code_ttl: Duration,
    /// When an issued code is dropped from memory if nobody verified it
    pub eviction_delay: Duration,
    /// Wrong guesses tolerated per code; 0 disables the lockout
    pub max_attempts: u32,
}

impl Default for VerificationStoreConfig {
    fn default() -> Self {
        Self {
            code_ttl: Duration::from_secs(DEFAULT_EXPIRATION_MINUTES as u64 * 60),
            eviction_delay: Duration::from_secs(DEFAULT_EVICTION_MINUTES as u64 * 60),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

impl From<&VerificationConfig> for VerificationStoreConfig {
    fn from(config: &VerificationConfig) -> Self {
        let code_ttl = Duration::from_secs(config.code_ttl_seconds);
        Self {
            code_ttl,
            eviction_delay: Duration::from_secs(config.eviction_delay_seconds).max(code_ttl),
            max_attempts: config.max_attempts,
        }
    }
}
