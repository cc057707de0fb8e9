//! Domain-specific error types for authentication, tokens, validation and purchases
//!
//! Display strings are the user-facing messages; the presentation layer maps
//! each variant to an HTTP status and a stable error code.

use thiserror::Error;

/// Authentication-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Unknown msisdn or wrong password; deliberately indistinguishable
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Please verify your email first")]
    EmailNotVerified,

    #[error("Email already verified")]
    EmailAlreadyVerified,

    #[error("User not found")]
    UserNotFound,

    #[error("Phone number not found or not active in TPCM system")]
    SubscriberNotActive,

    #[error("Invalid or expired verification code")]
    InvalidVerificationCode,

    #[error("Verification code expired")]
    VerificationCodeExpired,

    #[error("Too many invalid attempts, please request a new verification code")]
    MaxAttemptsExceeded,

    /// Session token valid but the account or subscriber no longer is
    #[error("Invalid token")]
    SessionInvalid,
}

/// Token-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("No token provided")]
    MissingToken,

    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token")]
    InvalidTokenFormat,

    #[error("Invalid claims")]
    InvalidClaims,

    #[error("Token generation failed")]
    TokenGenerationFailed,
}

/// Input validation errors, raised before any external call
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// One or more required fields were blank
    #[error("{0}")]
    MissingFields(&'static str),

    #[error("Invalid phone number format")]
    InvalidMsisdn,

    #[error("Invalid email format")]
    InvalidEmail,

    #[error("Password must be at least {min} characters")]
    PasswordTooShort { min: usize },

    #[error("Verification code must be 6 digits")]
    InvalidVerificationCodeFormat,

    #[error("Amount must be a positive number")]
    InvalidAmount,
}

/// Purchase transaction errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransactionError {
    #[error("Transaction not found: {transaction_id}")]
    NotFound { transaction_id: String },

    #[error("Cannot {action} transaction {transaction_id} in state {state}")]
    InvalidState {
        transaction_id: String,
        state: String,
        action: String,
    },

    /// The attempt was cancelled before its commit leg ran
    #[error("Transaction {transaction_id} was cancelled")]
    Cancelled { transaction_id: String },

    /// Another step of the same attempt is still running
    #[error("Transaction {transaction_id} is busy")]
    InProgress { transaction_id: String },
}
