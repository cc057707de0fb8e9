//! Configuration for the authentication service

use tpcm_shared::config::{AuthConfig, VerificationConfig};

/// Configuration for the authentication service
#[derive(Debug, Clone)]
pub struct AuthServiceConfig {
    /// Minimum accepted password length
    pub min_password_length: usize,
    /// bcrypt cost factor for new password hashes
    pub bcrypt_cost: u32,
    /// Code lifetime quoted in the verification email
    pub code_ttl_minutes: u64,
}

impl Default for AuthServiceConfig {
    fn default() -> Self {
        Self {
            min_password_length: 8,
            bcrypt_cost: 10,
            code_ttl_minutes: 15,
        }
    }
}

impl AuthServiceConfig {
    /// Build from the shared auth and verification settings
    pub fn from_shared(auth: &AuthConfig, verification: &VerificationConfig) -> Self {
        Self {
            min_password_length: auth.password.min_length,
            bcrypt_cost: auth.password.bcrypt_cost,
            code_ttl_minutes: verification.ttl_minutes(),
        }
    }
}
