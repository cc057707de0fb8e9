//! Shared utilities and common types for the TPCM Store server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types loaded from the environment
//! - The wire-level error body
//! - Response wrappers
//! - MSISDN/email validation and masking

pub mod config;
pub mod errors;
pub mod types;
pub mod utils;

pub use config::{
    AppConfig, AuthConfig, CorsConfig, DatabaseConfig, DirectoryBackend, EmailConfig,
    EmailProvider, Environment, JwtConfig, LedgerConfig, LogFormat, LoggingConfig,
    PasswordConfig, ServerConfig, VerificationConfig,
};
pub use errors::{error_codes, ApiResult, ErrorResponse};
pub use types::{HealthResponse, HealthStatus, MessageResponse};
pub use utils::{msisdn, validation};
