//! # Infrastructure Layer
//!
//! Concrete collaborators for the TPCM Store core:
//! - **Database**: MySQL store-user repository and subscriber directory (SQLx)
//! - **Ledger**: HTTP client for the balance ledger (reqwest)
//! - **Email**: verification code dispatch (console and HTTP relay providers)
//!
//! ## Features
//!
//! - `mysql`: Enable MySQL database support (default)

// Re-export core types for convenience
pub use tpcm_core::errors::*;

/// Database module - MySQL implementations using SQLx
#[cfg(feature = "mysql")]
pub mod database;

/// Email dispatch module
pub mod email;

/// Balance ledger HTTP client
pub mod ledger;

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// HTTP request error for external services
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Email dispatch error
    #[error("Email service error: {0}")]
    Email(String),
}
