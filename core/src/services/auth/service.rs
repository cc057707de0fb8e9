//! Main authentication service implementation

use std::sync::Arc;

use tpcm_shared::utils::msisdn::{is_valid_msisdn, mask_msisdn};
use tpcm_shared::utils::validation::{
    is_valid_email, is_valid_password, is_valid_verification_code, mask_email, not_empty,
};

use crate::domain::entities::{StoreUser, SubscriberSnapshot};
use crate::domain::value_objects::{LoginResult, RegistrationResult, SessionUser};
use crate::errors::{AuthError, DomainError, DomainResult, ValidationError};
use crate::repositories::{StoreUserRepository, SubscriberDirectory};
use crate::services::token::TokenService;
use crate::services::verification::VerificationCodeStore;

use super::config::AuthServiceConfig;
use super::password::PasswordHasher;
use super::traits::EmailDispatchTrait;

/// Authentication service for registration, email confirmation, login and
/// session checks
pub struct AuthService<U, D, E>
where
    U: StoreUserRepository,
    D: SubscriberDirectory,
    E: EmailDispatchTrait,
{
    /// Store user repository
    user_repository: Arc<U>,
    /// External subscriber directory
    directory: Arc<D>,
    /// Email dispatch for verification codes
    email_service: Arc<E>,
    /// Pending verification codes
    code_store: Arc<VerificationCodeStore>,
    /// Session token issuer/verifier
    token_service: Arc<TokenService>,
    password_hasher: PasswordHasher,
    config: AuthServiceConfig,
}

impl<U, D, E> AuthService<U, D, E>
where
    U: StoreUserRepository,
    D: SubscriberDirectory,
    E: EmailDispatchTrait,
{
    /// Create a new authentication service
    ///
    /// # Arguments
    ///
    /// * `user_repository` - Repository for store users
    /// * `directory` - Subscriber directory
    /// * `email_service` - Email dispatch for verification codes
    /// * `code_store` - Verification code store
    /// * `token_service` - Session token service
    /// * `config` - Service configuration
    pub fn new(
        user_repository: Arc<U>,
        directory: Arc<D>,
        email_service: Arc<E>,
        code_store: Arc<VerificationCodeStore>,
        token_service: Arc<TokenService>,
        config: AuthServiceConfig,
    ) -> Self {
        Self {
            user_repository,
            directory,
            email_service,
            code_store,
            token_service,
            password_hasher: PasswordHasher::new(config.bcrypt_cost),
            config,
        }
    }

    /// Register a new store user
    ///
    /// This method:
    /// 1. Validates the input locally
    /// 2. Checks the subscriber is known and active in the directory
    /// 3. Rejects an MSISDN or email that is already registered
    /// 4. Stores the user, unverified, with a bcrypt password hash
    /// 5. Issues a verification code and emails it
    ///
    /// A failed email dispatch is logged and reported in the result; the
    /// user can ask for a new code.
    ///
    /// # Returns
    ///
    /// * `Ok(RegistrationResult)` - The created user
    /// * `Err(DomainError)` - Validation, directory, conflict or storage failure
    pub async fn register(
        &self,
        msisdn: &str,
        email: &str,
        password: &str,
    ) -> DomainResult<RegistrationResult> {
        let msisdn = msisdn.trim();
        let email = email.trim();

        if !not_empty(msisdn) || !not_empty(email) || password.is_empty() {
            return Err(ValidationError::MissingFields("Phone number, email, and password are required").into());
        }
        if !is_valid_msisdn(msisdn) {
            return Err(ValidationError::InvalidMsisdn.into());
        }
        if !is_valid_email(email) {
            return Err(ValidationError::InvalidEmail.into());
        }
        if !is_valid_password(password, self.config.min_password_length) {
            return Err(ValidationError::PasswordTooShort {
                min: self.config.min_password_length,
            }
            .into());
        }

        self.require_active_subscriber(msisdn).await?;

        if self
            .user_repository
            .exists_by_msisdn_or_email(msisdn, email)
            .await?
        {
            tracing::info!(
                msisdn = %mask_msisdn(msisdn),
                event = "registration_conflict",
                "Registration rejected, user already exists"
            );
            return Err(DomainError::Conflict {
                message: "User already exists with this phone or email".to_string(),
            });
        }

        let password_hash = self.password_hasher.hash(password).await?;
        let user = self
            .user_repository
            .create(StoreUser::new(
                msisdn.to_string(),
                email.to_string(),
                password_hash,
            ))
            .await?;

        tracing::info!(
            msisdn = %mask_msisdn(msisdn),
            email = %mask_email(email),
            event = "user_registered",
            "Store user registered"
        );

        let email_sent = self.send_code(email).await;
        Ok(RegistrationResult { user, email_sent })
    }

    /// Confirm an email address with a verification code
    ///
    /// The code is checked first; the user lookup only happens for a code
    /// that was accepted.
    pub async fn verify_email(&self, email: &str, code: &str) -> DomainResult<()> {
        let email = email.trim();
        let code = code.trim();

        if !not_empty(email) || !not_empty(code) {
            return Err(ValidationError::MissingFields("Email and code are required").into());
        }
        if !is_valid_verification_code(code) {
            return Err(ValidationError::InvalidVerificationCodeFormat.into());
        }

        self.code_store.check(email, code).await.into_result()?;

        if !self.user_repository.mark_email_verified(email).await? {
            return Err(AuthError::UserNotFound.into());
        }

        tracing::info!(
            email = %mask_email(email),
            event = "email_verified",
            "Email verified"
        );
        Ok(())
    }

    /// Issue and send a new code for a user who has not verified yet
    ///
    /// # Returns
    ///
    /// * `Ok(bool)` - Whether the email was handed off successfully
    /// * `Err(DomainError)` - Unknown email or already verified
    pub async fn resend_code(&self, email: &str) -> DomainResult<bool> {
        let email = email.trim();
        if !not_empty(email) {
            return Err(ValidationError::MissingFields("Email is required").into());
        }

        let user = self
            .user_repository
            .find_by_email(email)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        if user.email_verified {
            return Err(AuthError::EmailAlreadyVerified.into());
        }

        Ok(self.send_code(email).await)
    }

    /// Authenticate with MSISDN and password
    ///
    /// This method:
    /// 1. Looks the user up and checks the password; both failures look the same
    /// 2. Refuses users who have not verified their email
    /// 3. Re-validates the subscriber against the directory
    /// 4. Issues a session token carrying only the MSISDN
    pub async fn login(&self, msisdn: &str, password: &str) -> DomainResult<LoginResult> {
        let msisdn = msisdn.trim();
        if !not_empty(msisdn) || password.is_empty() {
            return Err(ValidationError::MissingFields("Phone number and password are required").into());
        }

        let Some(user) = self.user_repository.find_by_msisdn(msisdn).await? else {
            tracing::info!(
                msisdn = %mask_msisdn(msisdn),
                event = "login_failed",
                "Login failed"
            );
            return Err(AuthError::InvalidCredentials.into());
        };

        if !self
            .password_hasher
            .verify(password, &user.password_hash)
            .await?
        {
            tracing::info!(
                msisdn = %mask_msisdn(msisdn),
                event = "login_failed",
                "Login failed"
            );
            return Err(AuthError::InvalidCredentials.into());
        }

        if !user.can_login() {
            return Err(AuthError::EmailNotVerified.into());
        }

        let subscriber = self.require_active_subscriber(msisdn).await?;
        let token = self.token_service.issue(msisdn)?;

        tracing::info!(
            msisdn = %mask_msisdn(msisdn),
            event = "login_succeeded",
            "User logged in"
        );

        Ok(LoginResult {
            token,
            user: SessionUser::from_parts(&user, &subscriber),
        })
    }

    /// Validate a session token and re-check the account behind it
    ///
    /// Fails closed: anything short of a valid token, an existing user and
    /// an active subscriber is reported as unauthorized, including lookup
    /// errors.
    pub async fn verify_session(&self, token: &str) -> DomainResult<SessionUser> {
        let claims = self.token_service.verify(token)?;
        let msisdn = claims.msisdn();

        let user = match self.user_repository.find_by_msisdn(msisdn).await {
            Ok(Some(user)) => user,
            Ok(None) => {
                tracing::info!(
                    msisdn = %mask_msisdn(msisdn),
                    event = "session_rejected",
                    reason = "user_not_found",
                    "Session rejected"
                );
                return Err(AuthError::SessionInvalid.into());
            }
            Err(e) => {
                tracing::warn!(error = %e, event = "session_rejected", reason = "user_lookup_failed", "Session rejected");
                return Err(AuthError::SessionInvalid.into());
            }
        };

        let subscriber = match self.directory.find_by_msisdn(msisdn).await {
            Ok(Some(subscriber)) if subscriber.is_active() => subscriber,
            Ok(_) => {
                tracing::info!(
                    msisdn = %mask_msisdn(msisdn),
                    event = "session_rejected",
                    reason = "subscriber_not_active",
                    "Session rejected"
                );
                return Err(AuthError::SessionInvalid.into());
            }
            Err(e) => {
                tracing::warn!(error = %e, event = "session_rejected", reason = "directory_failed", "Session rejected");
                return Err(AuthError::SessionInvalid.into());
            }
        };

        Ok(SessionUser::from_parts(&user, &subscriber))
    }

    /// Look the subscriber up and require an active status
    async fn require_active_subscriber(&self, msisdn: &str) -> DomainResult<SubscriberSnapshot> {
        match self.directory.find_by_msisdn(msisdn).await? {
            Some(subscriber) if subscriber.is_active() => Ok(subscriber),
            found => {
                tracing::info!(
                    msisdn = %mask_msisdn(msisdn),
                    known = found.is_some(),
                    event = "subscriber_not_active",
                    "Subscriber not found or not active"
                );
                Err(AuthError::SubscriberNotActive.into())
            }
        }
    }

    /// Issue a code for `email` and dispatch it; returns whether dispatch succeeded
    async fn send_code(&self, email: &str) -> bool {
        let issued = self.code_store.issue(email).await;
        match self
            .email_service
            .send_verification_code(email, &issued.code, self.config.code_ttl_minutes)
            .await
        {
            Ok(message_id) => {
                tracing::info!(
                    email = %mask_email(email),
                    message_id = %message_id,
                    event = "verification_email_sent",
                    "Verification email sent"
                );
                true
            }
            Err(e) => {
                tracing::error!(
                    email = %mask_email(email),
                    error = %e,
                    event = "verification_email_failed",
                    "Failed to send verification email"
                );
                false
            }
        }
    }
}
