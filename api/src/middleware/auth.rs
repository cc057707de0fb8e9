//! Session authentication middleware for protecting API endpoints.
//!
//! The middleware reads the bearer token from the Authorization header and
//! asks a [`SessionVerifier`] to validate it. Verification re-checks the
//! subscriber directory on every request, so a suspended subscriber loses
//! access immediately even while holding an unexpired token. The resulting
//! [`AuthContext`] is stored in the request extensions for handlers.

use actix_web::{
    dev::{Payload, Service, ServiceRequest, ServiceResponse, Transform},
    http::header::AUTHORIZATION,
    Error, FromRequest, HttpMessage, HttpRequest,
};
use async_trait::async_trait;
use futures_util::future::LocalBoxFuture;
use std::{
    future::{ready, Ready},
    rc::Rc,
    sync::Arc,
    task::{Context, Poll},
};

use tpcm_core::domain::value_objects::SessionUser;
use tpcm_core::errors::{DomainResult, TokenError};
use tpcm_core::repositories::{StoreUserRepository, SubscriberDirectory};
use tpcm_core::services::auth::{AuthService, EmailDispatchTrait};

use crate::handlers::ApiError;

/// Anything that can turn a session token into an authenticated user
#[async_trait]
pub trait SessionVerifier: Send + Sync {
    async fn authenticate(&self, token: &str) -> DomainResult<SessionUser>;
}

#[async_trait]
impl<U, D, E> SessionVerifier for AuthService<U, D, E>
where
    U: StoreUserRepository + 'static,
    D: SubscriberDirectory + 'static,
    E: EmailDispatchTrait + 'static,
{
    async fn authenticate(&self, token: &str) -> DomainResult<SessionUser> {
        self.verify_session(token).await
    }
}

/// Authenticated user injected into requests
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub user: SessionUser,
}

impl AuthContext {
    pub fn msisdn(&self) -> &str {
        &self.user.msisdn
    }
}

impl FromRequest for AuthContext {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(
            req.extensions()
                .get::<AuthContext>()
                .cloned()
                .ok_or_else(|| TokenError::MissingToken.into()),
        )
    }
}

/// Session authentication middleware factory
#[derive(Clone)]
pub struct SessionAuth {
    verifier: Arc<dyn SessionVerifier>,
}

impl SessionAuth {
    pub fn new(verifier: Arc<dyn SessionVerifier>) -> Self {
        Self { verifier }
    }
}

impl<S, B> Transform<S, ServiceRequest> for SessionAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = SessionAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(SessionAuthMiddleware {
            service: Rc::new(service),
            verifier: Arc::clone(&self.verifier),
        }))
    }
}

/// Session authentication middleware service
pub struct SessionAuthMiddleware<S> {
    service: Rc<S>,
    verifier: Arc<dyn SessionVerifier>,
}

impl<S, B> Service<ServiceRequest> for SessionAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let verifier = Arc::clone(&self.verifier);

        Box::pin(async move {
            let token = extract_bearer_token(req.request())
                .ok_or_else(|| ApiError::from(TokenError::MissingToken))?;

            let user = verifier
                .authenticate(&token)
                .await
                .map_err(ApiError::from)?;

            req.extensions_mut().insert(AuthContext { user });
            service.call(req).await
        })
    }
}

/// Extracts the bearer token from the Authorization header
pub fn extract_bearer_token(req: &HttpRequest) -> Option<String> {
    req.headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
}
