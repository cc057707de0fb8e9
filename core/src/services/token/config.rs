//! Configuration for the token service

use jsonwebtoken::Algorithm;
use tpcm_shared::config::JwtConfig;

use crate::domain::entities::session::{JWT_ISSUER, SESSION_EXPIRY_HOURS};

/// Configuration for the token service
#[derive(Debug, Clone)]
pub struct TokenServiceConfig {
    /// JWT signing secret
    pub jwt_secret: String,
    /// JWT signing algorithm
    pub algorithm: Algorithm,
    /// Session lifetime in seconds
    pub session_expiry_seconds: i64,
    /// Issuer claim written and required
    pub issuer: String,
    /// Audience claim written and required, if any
    pub audience: Option<String>,
}

impl Default for TokenServiceConfig {
    fn default() -> Self {
        Self {
            jwt_secret: "development-secret-please-change-in-production".to_string(),
            algorithm: Algorithm::HS256,
            session_expiry_seconds: SESSION_EXPIRY_HOURS * 3600,
            issuer: JWT_ISSUER.to_string(),
            audience: None,
        }
    }
}

impl From<&JwtConfig> for TokenServiceConfig {
    fn from(config: &JwtConfig) -> Self {
        Self {
            jwt_secret: config.secret.clone(),
            algorithm: Algorithm::HS256,
            session_expiry_seconds: config.session_expiry,
            issuer: config.issuer.clone(),
            audience: config.audience.clone(),
        }
    }
}
