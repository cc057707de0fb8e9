//! # TPCM Store Core
//!
//! Core business logic and domain layer for the TPCM Store backend.
//! This crate contains domain entities, business services, repository and
//! collaborator interfaces, and the error types the other layers build on.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use repositories::*;
pub use services::*;
