//! Domain-specific error types and error handling.

mod types;

pub use types::{AuthError, TokenError, TransactionError, ValidationError};

use thiserror::Error;

/// Core domain errors (general purpose)
#[derive(Error, Debug, Clone)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("{message}")]
    Conflict { message: String },

    /// An external collaborator was unreachable or rejected the call
    #[error("{service} error: {message}")]
    ExternalService { service: String, message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    // Bridge to specific error types
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    ValidationErr(#[from] ValidationError),

    #[error(transparent)]
    Transaction(#[from] TransactionError),
}

impl DomainError {
    /// Shorthand for an external collaborator failure
    pub fn external(service: impl Into<String>, message: impl Into<String>) -> Self {
        DomainError::ExternalService {
            service: service.into(),
            message: message.into(),
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
