//! HTTP listener and browser access settings

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// 0 lets actix pick one worker per core
    #[serde(default)]
    pub workers: usize,
    /// Seconds an idle keep-alive connection is held
    #[serde(default = "default_keep_alive")]
    pub keep_alive: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            workers: 0,
            keep_alive: default_keep_alive(),
        }
    }
}

impl ServerConfig {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ..Default::default()
        }
    }

    /// SERVER_HOST, SERVER_PORT (or PORT) and SERVER_WORKERS
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let port = std::env::var("SERVER_PORT")
            .or_else(|_| std::env::var("PORT"))
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(defaults.port);
        let workers = std::env::var("SERVER_WORKERS")
            .ok()
            .and_then(|w| w.parse().ok())
            .unwrap_or(defaults.workers);

        Self {
            host: std::env::var("SERVER_HOST").unwrap_or(defaults.host),
            port,
            workers,
            keep_alive: defaults.keep_alive,
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Origins allowed to call the API from the storefront
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CorsConfig {
    /// `*` accepts any origin
    #[serde(default)]
    pub allowed_origins: Vec<String>,
    #[serde(default)]
    pub allow_credentials: bool,
    /// Preflight cache lifetime in seconds
    #[serde(default = "default_max_age")]
    pub max_age: usize,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: Vec::new(),
            allow_credentials: false,
            max_age: default_max_age(),
        }
    }
}

impl CorsConfig {
    /// Any origin, no credentials
    pub fn development() -> Self {
        Self {
            allowed_origins: vec!["*".to_string()],
            allow_credentials: false,
            max_age: 3600,
        }
    }

    /// Comma-separated CORS_ALLOWED_ORIGINS, falling back to the permissive profile
    pub fn from_env() -> Self {
        match std::env::var("CORS_ALLOWED_ORIGINS") {
            Ok(origins) if !origins.trim().is_empty() => Self {
                allowed_origins: origins
                    .split(',')
                    .map(|o| o.trim().to_string())
                    .filter(|o| !o.is_empty())
                    .collect(),
                ..Default::default()
            },
            _ => Self::development(),
        }
    }

    pub fn allows_any_origin(&self) -> bool {
        self.allowed_origins.iter().any(|o| o == "*")
    }
}

fn default_keep_alive() -> u64 {
    75
}

fn default_max_age() -> usize {
    86400
}
