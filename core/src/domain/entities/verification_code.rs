//! Verification code entity for email confirmation.

use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Length of the verification code
pub const CODE_LENGTH: usize = 6;

/// Smallest code ever issued
pub const CODE_MIN: u32 = 100_000;

/// Largest code ever issued
pub const CODE_MAX: u32 = 999_999;

/// Default expiration time for verification codes (15 minutes)
pub const DEFAULT_EXPIRATION_MINUTES: i64 = 15;

/// Default delay before an unused code is evicted (16 minutes)
pub const DEFAULT_EVICTION_MINUTES: i64 = 16;

/// A freshly issued verification code, as handed to the email dispatcher
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationCode {
    /// Subject the code was issued for (the email address)
    pub subject: String,

    /// The 6-digit verification code
    pub code: String,

    /// Wall-clock time after which the code is no longer accepted
    pub expires_at: DateTime<Utc>,
}

impl VerificationCode {
    /// Creates a new verification code with a random 6-digit code
    ///
    /// # Arguments
    ///
    /// * `subject` - The subject key the code proves control of
    /// * `ttl` - Lifetime of the code
    pub fn generate(subject: impl Into<String>, ttl: Duration) -> Self {
        Self {
            subject: subject.into(),
            code: Self::generate_code(),
            expires_at: Utc::now() + ttl,
        }
    }

    /// Generates a uniformly random code in `[CODE_MIN, CODE_MAX]`
    pub fn generate_code() -> String {
        let mut rng = rand::thread_rng();
        rng.gen_range(CODE_MIN..=CODE_MAX).to_string()
    }

    /// Checks if the verification code has expired by wall clock
    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }
}
