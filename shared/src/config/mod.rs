//! Configuration module with business-specific sub-modules
//!
//! - `auth` - session tokens and password policy
//! - `database` - MySQL pool and subscriber directory backend
//! - `email` - verification email dispatch
//! - `environment` - environment detection and logging configuration
//! - `ledger` - balance ledger client
//! - `server` - HTTP server and CORS configuration
//! - `verification` - verification code lifetime and lockout

pub mod auth;
pub mod database;
pub mod email;
pub mod environment;
pub mod ledger;
pub mod server;
pub mod verification;

use serde::{Deserialize, Serialize};

pub use auth::{AuthConfig, JwtConfig, PasswordConfig};
pub use database::{DatabaseConfig, DirectoryBackend};
pub use email::{EmailConfig, EmailProvider};
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use ledger::LedgerConfig;
pub use server::{CorsConfig, ServerConfig};
pub use verification::VerificationConfig;

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    #[serde(default)]
    pub verification: VerificationConfig,
    #[serde(default)]
    pub ledger: LedgerConfig,
    #[serde(default)]
    pub email: EmailConfig,
    #[serde(default)]
    pub cors: CorsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        let env = Environment::default();
        Self {
            environment: env,
            server: ServerConfig::default(),
            database: DatabaseConfig::default(),
            auth: AuthConfig::default(),
            verification: VerificationConfig::default(),
            ledger: LedgerConfig::default(),
            email: EmailConfig::default(),
            cors: CorsConfig::development(),
            logging: LoggingConfig::for_environment(env),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment
    pub fn from_env() -> Self {
        let environment = Environment::from_env();
        Self {
            environment,
            server: ServerConfig::from_env(),
            database: DatabaseConfig::from_env(),
            auth: AuthConfig::from_env(),
            verification: VerificationConfig::from_env(),
            ledger: LedgerConfig::from_env(),
            email: EmailConfig::from_env(),
            cors: CorsConfig::from_env(),
            logging: LoggingConfig::from_env(environment),
        }
    }

    /// Check settings that must never reach production
    pub fn validate(&self) -> Result<(), String> {
        if self.environment.is_production() && self.auth.jwt.is_using_default_secret() {
            return Err("JWT_SECRET must be set in production".to_string());
        }
        if self.auth.jwt.secret.is_empty() {
            return Err("JWT_SECRET must not be empty".to_string());
        }
        if self.auth.jwt.session_expiry <= 0 {
            return Err("JWT_SESSION_EXPIRY must be positive".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid_outside_production() {
        assert!(AppConfig::default().validate().is_ok());
    }

    #[test]
    fn test_production_rejects_default_secret() {
        let config = AppConfig {
            environment: Environment::Production,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let mut config = config;
        config.auth.jwt = JwtConfig::new("a-real-secret");
        assert!(config.validate().is_ok());
    }
}
