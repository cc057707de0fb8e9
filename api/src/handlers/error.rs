//! Mapping from domain errors to HTTP responses
//!
//! Every error leaves the API as `{ error, code, needsVerification?, timestamp }`.

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use thiserror::Error;

use tpcm_core::errors::{AuthError, DomainError, TokenError, TransactionError};
use tpcm_shared::errors::{error_codes, ErrorResponse};

/// Handler error type; lets handlers use `?` on domain results
#[derive(Debug, Error)]
#[error(transparent)]
pub struct ApiError(#[from] pub DomainError);

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        error_parts(&self.0).0
    }

    fn error_response(&self) -> HttpResponse {
        handle_domain_error(&self.0)
    }
}

impl From<AuthError> for ApiError {
    fn from(error: AuthError) -> Self {
        ApiError(error.into())
    }
}

impl From<TokenError> for ApiError {
    fn from(error: TokenError) -> Self {
        ApiError(error.into())
    }
}

/// Convert a domain error into its HTTP response
pub fn handle_domain_error(error: &DomainError) -> HttpResponse {
    let (status, code, message) = error_parts(error);

    if status.is_server_error() {
        tracing::error!(error = %error, status = status.as_u16(), "Request failed");
    } else {
        tracing::debug!(error = %error, status = status.as_u16(), "Request rejected");
    }

    let mut body = ErrorResponse::new(code, message);
    if matches!(error, DomainError::Auth(AuthError::EmailNotVerified)) {
        body = body.needing_verification();
    }
    HttpResponse::build(status).json(body)
}

/// Collapse failed DTO validation into a domain validation error
pub fn validation_error(errors: &validator::ValidationErrors) -> DomainError {
    let message = errors
        .field_errors()
        .into_values()
        .flat_map(|errs| errs.iter())
        .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
        .unwrap_or_else(|| "Invalid request".to_string());
    DomainError::Validation { message }
}

fn error_parts(error: &DomainError) -> (StatusCode, &'static str, String) {
    match error {
        DomainError::Validation { message } => {
            (StatusCode::BAD_REQUEST, error_codes::VALIDATION_ERROR, message.clone())
        }
        DomainError::ValidationErr(e) => {
            (StatusCode::BAD_REQUEST, error_codes::VALIDATION_ERROR, e.to_string())
        }
        DomainError::Conflict { message } => {
            (StatusCode::CONFLICT, error_codes::CONFLICT, message.clone())
        }
        DomainError::Auth(auth_error) => auth_parts(auth_error),
        DomainError::Token(token_error) => token_parts(token_error),
        DomainError::Transaction(tx_error) => transaction_parts(tx_error),
        DomainError::ExternalService { .. } => (
            StatusCode::BAD_GATEWAY,
            error_codes::EXTERNAL_SERVICE_ERROR,
            error.to_string(),
        ),
        DomainError::Internal { .. } => (
            StatusCode::INTERNAL_SERVER_ERROR,
            error_codes::INTERNAL_ERROR,
            "Internal server error".to_string(),
        ),
    }
}

fn auth_parts(error: &AuthError) -> (StatusCode, &'static str, String) {
    let (status, code) = match error {
        AuthError::InvalidCredentials => (StatusCode::UNAUTHORIZED, error_codes::INVALID_CREDENTIALS),
        AuthError::EmailNotVerified => (StatusCode::FORBIDDEN, error_codes::EMAIL_NOT_VERIFIED),
        AuthError::EmailAlreadyVerified => {
            (StatusCode::BAD_REQUEST, error_codes::EMAIL_ALREADY_VERIFIED)
        }
        AuthError::UserNotFound => (StatusCode::NOT_FOUND, error_codes::NOT_FOUND),
        AuthError::SubscriberNotActive => {
            (StatusCode::BAD_REQUEST, error_codes::SUBSCRIBER_NOT_ACTIVE)
        }
        AuthError::InvalidVerificationCode => {
            (StatusCode::BAD_REQUEST, error_codes::VERIFICATION_CODE_INVALID)
        }
        AuthError::VerificationCodeExpired => {
            (StatusCode::BAD_REQUEST, error_codes::VERIFICATION_CODE_EXPIRED)
        }
        AuthError::MaxAttemptsExceeded => {
            (StatusCode::BAD_REQUEST, error_codes::MAX_ATTEMPTS_EXCEEDED)
        }
        AuthError::SessionInvalid => (StatusCode::UNAUTHORIZED, error_codes::TOKEN_INVALID),
    };
    (status, code, error.to_string())
}

fn token_parts(error: &TokenError) -> (StatusCode, &'static str, String) {
    let code = match error {
        TokenError::MissingToken => error_codes::UNAUTHORIZED,
        TokenError::TokenExpired => error_codes::TOKEN_EXPIRED,
        TokenError::InvalidTokenFormat | TokenError::InvalidClaims => error_codes::TOKEN_INVALID,
        TokenError::TokenGenerationFailed => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                error_codes::INTERNAL_ERROR,
                "Internal server error".to_string(),
            )
        }
    };
    (StatusCode::UNAUTHORIZED, code, error.to_string())
}

fn transaction_parts(error: &TransactionError) -> (StatusCode, &'static str, String) {
    let status = match error {
        TransactionError::NotFound { .. } => StatusCode::NOT_FOUND,
        TransactionError::InvalidState { .. }
        | TransactionError::Cancelled { .. }
        | TransactionError::InProgress { .. } => StatusCode::CONFLICT,
    };
    let code = if status == StatusCode::NOT_FOUND {
        error_codes::NOT_FOUND
    } else {
        error_codes::TRANSACTION_STATE
    };
    (status, code, error.to_string())
}
