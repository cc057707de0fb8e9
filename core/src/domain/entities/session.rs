//! Session token claims.

use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Session lifetime (24 hours)
pub const SESSION_EXPIRY_HOURS: i64 = 24;

/// JWT issuer
pub const JWT_ISSUER: &str = "tpcm-store";

/// Claims structure for the session JWT.
///
/// Carries only the MSISDN as subject; everything else about the
/// subscriber is looked up again when the session is verified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Subject (msisdn)
    pub sub: String,

    /// Issued at timestamp
    pub iat: i64,

    /// Expiration timestamp
    pub exp: i64,

    /// Issuer
    pub iss: String,

    /// Audience
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aud: Option<String>,

    /// JWT ID
    pub jti: String,
}

impl SessionClaims {
    /// Creates claims for a new session
    ///
    /// # Arguments
    ///
    /// * `msisdn` - The authenticated subscriber
    /// * `lifetime` - How long the session stays valid
    /// * `issuer` - Issuer claim
    /// * `audience` - Optional audience claim
    pub fn new(msisdn: &str, lifetime: Duration, issuer: &str, audience: Option<&str>) -> Self {
        let now = Utc::now();
        Self {
            sub: msisdn.to_string(),
            iat: now.timestamp(),
            exp: (now + lifetime).timestamp(),
            iss: issuer.to_string(),
            aud: audience.map(str::to_string),
            jti: Uuid::new_v4().to_string(),
        }
    }

    /// The MSISDN the session was issued to
    pub fn msisdn(&self) -> &str {
        &self.sub
    }

    /// Checks if the claims have expired
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }
}
