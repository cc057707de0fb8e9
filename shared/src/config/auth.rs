//! Authentication configuration

use serde::{Deserialize, Serialize};

const DEFAULT_JWT_SECRET: &str = "your-secret-key-change-in-production";

/// JWT session token configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// JWT secret key for signing tokens
    pub secret: String,

    /// Session token lifetime in seconds
    pub session_expiry: i64,

    /// JWT issuer claim
    pub issuer: String,

    /// JWT audience claim
    #[serde(default)]
    pub audience: Option<String>,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: String::from(DEFAULT_JWT_SECRET),
            session_expiry: 86400, // 24 hours
            issuer: String::from("tpcm-store"),
            audience: None,
        }
    }
}

impl JwtConfig {
    /// Create a new JWT configuration with secret
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ..Default::default()
        }
    }

    /// Set session expiry in hours
    pub fn with_session_expiry_hours(mut self, hours: i64) -> Self {
        self.session_expiry = hours * 3600;
        self
    }

    /// Check if using default secret (security warning)
    pub fn is_using_default_secret(&self) -> bool {
        self.secret == DEFAULT_JWT_SECRET
    }
}

/// Password policy and hashing configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PasswordConfig {
    /// bcrypt cost factor
    #[serde(default = "default_bcrypt_cost")]
    pub bcrypt_cost: u32,

    /// Minimum accepted password length
    #[serde(default = "default_min_length")]
    pub min_length: usize,
}

impl Default for PasswordConfig {
    fn default() -> Self {
        Self {
            bcrypt_cost: default_bcrypt_cost(),
            min_length: default_min_length(),
        }
    }
}

/// Complete authentication configuration
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct AuthConfig {
    /// JWT configuration
    pub jwt: JwtConfig,

    /// Password configuration
    #[serde(default)]
    pub password: PasswordConfig,
}

impl AuthConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let secret = std::env::var("JWT_SECRET").unwrap_or_else(|_| DEFAULT_JWT_SECRET.to_string());
        let session_expiry = std::env::var("JWT_SESSION_EXPIRY")
            .unwrap_or_else(|_| "86400".to_string())
            .parse()
            .unwrap_or(86400);
        let issuer = std::env::var("JWT_ISSUER").unwrap_or_else(|_| "tpcm-store".to_string());
        let audience = std::env::var("JWT_AUDIENCE").ok();
        let bcrypt_cost = std::env::var("BCRYPT_COST")
            .unwrap_or_else(|_| "10".to_string())
            .parse()
            .unwrap_or(10);

        Self {
            jwt: JwtConfig {
                secret,
                session_expiry,
                issuer,
                audience,
            },
            password: PasswordConfig {
                bcrypt_cost,
                ..Default::default()
            },
        }
    }
}

fn default_bcrypt_cost() -> u32 {
    10
}

fn default_min_length() -> usize {
    8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jwt_defaults() {
        let config = JwtConfig::default();
        assert_eq!(config.session_expiry, 86400);
        assert!(config.is_using_default_secret());
        assert!(!JwtConfig::new("s3cret").is_using_default_secret());
    }

    #[test]
    fn test_session_expiry_hours() {
        let config = JwtConfig::new("k").with_session_expiry_hours(2);
        assert_eq!(config.session_expiry, 7200);
    }

    #[test]
    fn test_password_defaults() {
        let config = PasswordConfig::default();
        assert_eq!(config.bcrypt_cost, 10);
        assert_eq!(config.min_length, 8);
    }
}
