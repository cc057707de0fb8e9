use actix_web::{web, HttpResponse};
use validator::Validate;

use tpcm_core::repositories::{StoreUserRepository, SubscriberDirectory};
use tpcm_core::services::auth::EmailDispatchTrait;
use tpcm_shared::types::MessageResponse;

use super::AuthState;
use crate::dto::{ResendCodeRequest, VerifyEmailRequest};
use crate::handlers::{validation_error, ApiError};

/// Handler for POST /api/auth/verify-email
///
/// `200` on success, `400` for a wrong, expired or exhausted code and `404`
/// when the code was right but no account holds the email.
pub async fn verify_email<U, D, E>(
    state: web::Data<AuthState<U, D, E>>,
    request: web::Json<VerifyEmailRequest>,
) -> Result<HttpResponse, ApiError>
where
    U: StoreUserRepository + 'static,
    D: SubscriberDirectory + 'static,
    E: EmailDispatchTrait + 'static,
{
    request.validate().map_err(|e| validation_error(&e))?;

    state
        .auth_service
        .verify_email(&request.email, &request.code)
        .await?;

    Ok(HttpResponse::Ok().json(MessageResponse::success("Email verified successfully!")))
}

/// Handler for POST /api/auth/resend-code
///
/// Issuing a new code replaces the previous one.
pub async fn resend_code<U, D, E>(
    state: web::Data<AuthState<U, D, E>>,
    request: web::Json<ResendCodeRequest>,
) -> Result<HttpResponse, ApiError>
where
    U: StoreUserRepository + 'static,
    D: SubscriberDirectory + 'static,
    E: EmailDispatchTrait + 'static,
{
    request.validate().map_err(|e| validation_error(&e))?;

    state.auth_service.resend_code(&request.email).await?;

    Ok(HttpResponse::Ok().json(MessageResponse::success("Verification code sent!")))
}
