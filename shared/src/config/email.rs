//! Email dispatch configuration

use serde::{Deserialize, Serialize};

/// Email provider selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EmailProvider {
    /// Write messages to the log (development)
    #[default]
    Console,
    /// POST messages to an HTTP mail relay
    Relay,
}

impl std::str::FromStr for EmailProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "console" | "log" => Ok(EmailProvider::Console),
            "relay" | "http" => Ok(EmailProvider::Relay),
            _ => Err(format!("Invalid email provider: {}", s)),
        }
    }
}

/// Email dispatch configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EmailConfig {
    /// Provider to use
    #[serde(default)]
    pub provider: EmailProvider,

    /// Relay endpoint URL (relay provider only)
    #[serde(default)]
    pub relay_url: Option<String>,

    /// Relay API key (relay provider only)
    #[serde(default)]
    pub api_key: Option<String>,

    /// Sender address
    pub from_address: String,

    /// Relay timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            provider: EmailProvider::Console,
            relay_url: None,
            api_key: None,
            from_address: String::from("no-reply@tpcm.store"),
            timeout_seconds: default_timeout(),
        }
    }
}

impl EmailConfig {
    /// Create from environment variables.
    /// Falls back to the console provider when no relay URL is configured.
    pub fn from_env() -> Self {
        let relay_url = std::env::var("EMAIL_RELAY_URL").ok().filter(|u| !u.is_empty());
        let provider = match relay_url {
            None => EmailProvider::Console,
            Some(_) => std::env::var("EMAIL_PROVIDER")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(EmailProvider::Relay),
        };

        Self {
            provider,
            relay_url,
            api_key: std::env::var("EMAIL_API_KEY").ok(),
            from_address: std::env::var("EMAIL_FROM")
                .unwrap_or_else(|_| "no-reply@tpcm.store".to_string()),
            timeout_seconds: std::env::var("EMAIL_TIMEOUT")
                .unwrap_or_else(|_| "10".to_string())
                .parse()
                .unwrap_or(10),
        }
    }
}

fn default_timeout() -> u64 {
    10
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_parse() {
        assert_eq!("relay".parse::<EmailProvider>().unwrap(), EmailProvider::Relay);
        assert_eq!("LOG".parse::<EmailProvider>().unwrap(), EmailProvider::Console);
        assert!("smtp".parse::<EmailProvider>().is_err());
    }

    #[test]
    fn test_default_is_console() {
        let config = EmailConfig::default();
        assert_eq!(config.provider, EmailProvider::Console);
        assert!(config.relay_url.is_none());
    }
}
