//! Balance ledger client configuration

use serde::{Deserialize, Serialize};

/// Connection settings for the external balance ledger
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LedgerConfig {
    /// Base URL of the ledger application API
    pub base_url: String,

    /// Basic auth user
    pub username: String,

    /// Basic auth password
    pub password: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    /// Channel reported on reservation requests
    #[serde(default = "default_channel")]
    pub channel: String,

    /// Whether partial reservations are allowed (`Y`/`N`)
    #[serde(default = "default_partial_reservation")]
    pub partial_reservation: String,

    /// Sends of a queued compensating cancel before it is dropped
    #[serde(default = "default_max_cancel_attempts")]
    pub max_cancel_attempts: u32,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            base_url: String::from("http://localhost:8080/api/app"),
            username: String::from("admin"),
            password: String::from("admin"),
            timeout_seconds: default_timeout(),
            channel: default_channel(),
            partial_reservation: default_partial_reservation(),
            max_cancel_attempts: default_max_cancel_attempts(),
        }
    }
}

impl LedgerConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let base_url = std::env::var("LEDGER_BASE_URL").unwrap_or(defaults.base_url);
        let username = std::env::var("LEDGER_USERNAME").unwrap_or(defaults.username);
        let password = std::env::var("LEDGER_PASSWORD").unwrap_or(defaults.password);
        let timeout_seconds = std::env::var("LEDGER_TIMEOUT")
            .unwrap_or_else(|_| "30".to_string())
            .parse()
            .unwrap_or(30);
        let channel = std::env::var("LEDGER_CHANNEL").unwrap_or(defaults.channel);
        let max_cancel_attempts = std::env::var("LEDGER_MAX_CANCEL_ATTEMPTS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.max_cancel_attempts);

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            username,
            password,
            timeout_seconds,
            channel,
            partial_reservation: defaults.partial_reservation,
            max_cancel_attempts,
        }
    }

    /// Create a configuration pointed at a specific base URL
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Build an endpoint URL below the base
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

fn default_timeout() -> u64 {
    30
}

fn default_channel() -> String {
    String::from("APP")
}

fn default_partial_reservation() -> String {
    String::from("N")
}

fn default_max_cancel_attempts() -> u32 {
    10
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = LedgerConfig::default();
        assert_eq!(config.channel, "APP");
        assert_eq!(config.partial_reservation, "N");
        assert_eq!(config.timeout_seconds, 30);
        assert_eq!(config.max_cancel_attempts, 10);
    }

    #[test]
    fn test_endpoint_joins_slashes() {
        let config = LedgerConfig::new("http://ledger/api/app/");
        assert_eq!(
            config.endpoint("/transactions/flow/request"),
            "http://ledger/api/app/transactions/flow/request"
        );
    }
}
