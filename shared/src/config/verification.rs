//! Email verification code configuration

use serde::{Deserialize, Serialize};

/// Verification code lifetime and lockout settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VerificationConfig {
    /// Logical lifetime of an issued code in seconds
    #[serde(default = "default_code_ttl")]
    pub code_ttl_seconds: u64,

    /// Delay before an issued code is evicted from memory, in seconds.
    /// Never shorter than the logical lifetime.
    #[serde(default = "default_eviction_delay")]
    pub eviction_delay_seconds: u64,

    /// Wrong guesses tolerated per code; 0 disables the lockout
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self {
            code_ttl_seconds: default_code_ttl(),
            eviction_delay_seconds: default_eviction_delay(),
            max_attempts: default_max_attempts(),
        }
    }
}

impl VerificationConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let code_ttl_seconds = std::env::var("VERIFICATION_CODE_TTL")
            .unwrap_or_else(|_| "900".to_string())
            .parse()
            .unwrap_or(900);
        let eviction_delay_seconds = std::env::var("VERIFICATION_EVICTION_DELAY")
            .unwrap_or_else(|_| "960".to_string())
            .parse()
            .unwrap_or(960);
        let max_attempts = std::env::var("VERIFICATION_MAX_ATTEMPTS")
            .unwrap_or_else(|_| "5".to_string())
            .parse()
            .unwrap_or(5);

        Self {
            code_ttl_seconds,
            eviction_delay_seconds,
            max_attempts,
        }
        .normalized()
    }

    /// Clamp the eviction delay so it never precedes logical expiry
    pub fn normalized(mut self) -> Self {
        if self.eviction_delay_seconds < self.code_ttl_seconds {
            self.eviction_delay_seconds = self.code_ttl_seconds;
        }
        self
    }

    /// Code lifetime in whole minutes, as shown to users
    pub fn ttl_minutes(&self) -> u64 {
        self.code_ttl_seconds / 60
    }
}

fn default_code_ttl() -> u64 {
    15 * 60
}

fn default_eviction_delay() -> u64 {
    16 * 60
}

fn default_max_attempts() -> u32 {
    5
}
