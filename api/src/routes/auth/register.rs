use actix_web::{web, HttpResponse};
use validator::Validate;

use tpcm_core::repositories::{StoreUserRepository, SubscriberDirectory};
use tpcm_core::services::auth::EmailDispatchTrait;
use tpcm_shared::types::MessageResponse;
use tpcm_shared::utils::msisdn::mask_msisdn;

use super::AuthState;
use crate::dto::RegisterRequest;
use crate::handlers::{validation_error, ApiError};

pub const REGISTERED_MESSAGE: &str =
    "Registration successful! Please check your email for verification code.";

/// Handler for POST /api/auth/register
///
/// # Request Body
///
/// ```json
/// {
///     "msisdn": "+40712345678",
///     "email": "ana@example.com",
///     "password": "secret123"
/// }
/// ```
///
/// # Responses
///
/// - `201` `{ "success": true, "message": "..." }`
/// - `400` invalid input or subscriber not active
/// - `409` phone number or email already registered
/// - `502` subscriber directory unavailable
pub async fn register<U, D, E>(
    state: web::Data<AuthState<U, D, E>>,
    request: web::Json<RegisterRequest>,
) -> Result<HttpResponse, ApiError>
where
    U: StoreUserRepository + 'static,
    D: SubscriberDirectory + 'static,
    E: EmailDispatchTrait + 'static,
{
    request.validate().map_err(|e| validation_error(&e))?;

    tracing::info!(msisdn = %mask_msisdn(&request.msisdn), "Registration request");

    let result = state
        .auth_service
        .register(&request.msisdn, &request.email, &request.password)
        .await?;

    if !result.email_sent {
        tracing::warn!(
            msisdn = %mask_msisdn(&result.user.msisdn),
            "Registered without a delivered verification email"
        );
    }

    Ok(HttpResponse::Created().json(MessageResponse::success(REGISTERED_MESSAGE)))
}
