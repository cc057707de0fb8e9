//! Authentication route handlers
//!
//! - Registration gated by the subscriber directory
//! - Email verification and code resend
//! - Password login
//! - Session verification

pub mod login;
pub mod register;
pub mod session;
pub mod verify_email;

use std::sync::Arc;

use tpcm_core::repositories::{StoreUserRepository, SubscriberDirectory};
use tpcm_core::services::auth::{AuthService, EmailDispatchTrait};

/// Shared state for the authentication routes
pub struct AuthState<U, D, E>
where
    U: StoreUserRepository,
    D: SubscriberDirectory,
    E: EmailDispatchTrait,
{
    pub auth_service: Arc<AuthService<U, D, E>>,
}

impl<U, D, E> AuthState<U, D, E>
where
    U: StoreUserRepository,
    D: SubscriberDirectory,
    E: EmailDispatchTrait,
{
    pub fn new(auth_service: Arc<AuthService<U, D, E>>) -> Self {
        Self { auth_service }
    }
}
