use actix_web::{web, HttpRequest, HttpResponse};

use tpcm_core::errors::TokenError;
use tpcm_core::repositories::{StoreUserRepository, SubscriberDirectory};
use tpcm_core::services::auth::EmailDispatchTrait;

use super::AuthState;
use crate::dto::SessionResponse;
use crate::handlers::ApiError;
use crate::middleware::extract_bearer_token;

/// Handler for GET /api/auth/verify
///
/// Expects `Authorization: Bearer <token>`. The subscriber is looked up
/// again on every call, so the response reflects the current directory
/// status rather than the state at login.
pub async fn verify_session<U, D, E>(
    req: HttpRequest,
    state: web::Data<AuthState<U, D, E>>,
) -> Result<HttpResponse, ApiError>
where
    U: StoreUserRepository + 'static,
    D: SubscriberDirectory + 'static,
    E: EmailDispatchTrait + 'static,
{
    let token = extract_bearer_token(&req).ok_or(TokenError::MissingToken)?;
    let user = state.auth_service.verify_session(&token).await?;

    Ok(HttpResponse::Ok().json(SessionResponse { valid: true, user }))
}
