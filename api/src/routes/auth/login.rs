use actix_web::{web, HttpResponse};
use validator::Validate;

use tpcm_core::repositories::{StoreUserRepository, SubscriberDirectory};
use tpcm_core::services::auth::EmailDispatchTrait;

use super::AuthState;
use crate::dto::{LoginRequest, LoginResponse};
use crate::handlers::{validation_error, ApiError};

/// Handler for POST /api/auth/login
///
/// `401` hides whether the phone number or the password was wrong. An
/// account with an unconfirmed email gets `403` with `needsVerification`.
pub async fn login<U, D, E>(
    state: web::Data<AuthState<U, D, E>>,
    request: web::Json<LoginRequest>,
) -> Result<HttpResponse, ApiError>
where
    U: StoreUserRepository + 'static,
    D: SubscriberDirectory + 'static,
    E: EmailDispatchTrait + 'static,
{
    request.validate().map_err(|e| validation_error(&e))?;

    let result = state
        .auth_service
        .login(&request.msisdn, &request.password)
        .await?;

    Ok(HttpResponse::Ok().json(LoginResponse {
        success: true,
        token: result.token,
        user: result.user,
    }))
}
