//! Unit tests for authentication service

use std::sync::Arc;

use crate::errors::{AuthError, DomainError, TokenError, ValidationError};
use crate::repositories::{
    InMemoryStoreUserRepository, InMemorySubscriberDirectory, StoreUserRepository,
};
use crate::services::auth::{AuthService, AuthServiceConfig};
use crate::services::token::{TokenService, TokenServiceConfig};
use crate::services::verification::{VerificationCodeStore, VerificationStoreConfig};

use super::mocks::{active_subscriber, MockEmailService};

const MSISDN: &str = "+40712345678";
const EMAIL: &str = "a@b.com";
const PASSWORD: &str = "password1";

type TestAuthService =
    AuthService<InMemoryStoreUserRepository, InMemorySubscriberDirectory, MockEmailService>;

struct Fixture {
    service: TestAuthService,
    users: Arc<InMemoryStoreUserRepository>,
    directory: Arc<InMemorySubscriberDirectory>,
    email: Arc<MockEmailService>,
    tokens: Arc<TokenService>,
}

fn fixture_with_email(email: MockEmailService) -> Fixture {
    let users = Arc::new(InMemoryStoreUserRepository::new());
    let directory = Arc::new(InMemorySubscriberDirectory::with_subscribers([
        active_subscriber(MSISDN),
    ]));
    let email = Arc::new(email);
    let tokens = Arc::new(TokenService::new(TokenServiceConfig {
        jwt_secret: "test-secret".to_string(),
        ..Default::default()
    }));
    let store = Arc::new(VerificationCodeStore::new(VerificationStoreConfig::default()));
    let config = AuthServiceConfig {
        bcrypt_cost: 4,
        ..Default::default()
    };

    let service = AuthService::new(
        users.clone(),
        directory.clone(),
        email.clone(),
        store,
        tokens.clone(),
        config,
    );

    Fixture {
        service,
        users,
        directory,
        email,
        tokens,
    }
}

fn fixture() -> Fixture {
    fixture_with_email(MockEmailService::new())
}

async fn registered_and_verified(f: &Fixture) {
    f.service.register(MSISDN, EMAIL, PASSWORD).await.unwrap();
    let code = f.email.last_code(EMAIL).unwrap();
    f.service.verify_email(EMAIL, &code).await.unwrap();
}

#[tokio::test]
async fn test_register_creates_unverified_user_and_sends_code() {
    let f = fixture();

    let result = f.service.register(MSISDN, EMAIL, PASSWORD).await.unwrap();
    assert!(result.email_sent);
    assert!(!result.user.email_verified);
    assert_ne!(result.user.password_hash, PASSWORD);

    let stored = f.users.find_by_msisdn(MSISDN).await.unwrap().unwrap();
    assert!(!stored.email_verified);

    let code = f.email.last_code(EMAIL).unwrap();
    assert_eq!(code.len(), 6);
}

#[tokio::test]
async fn test_register_validation_precedes_directory() {
    let f = fixture();

    let cases = [
        ("", EMAIL, PASSWORD),
        ("12345", EMAIL, PASSWORD),
        (MSISDN, "not-an-email", PASSWORD),
        (MSISDN, EMAIL, "short"),
    ];
    for (msisdn, email, password) in cases {
        let err = f.service.register(msisdn, email, password).await.unwrap_err();
        assert!(matches!(err, DomainError::ValidationErr(_)), "{:?}", err);
    }

    assert_eq!(f.directory.lookup_count(), 0);
}

#[tokio::test]
async fn test_register_password_too_short_message() {
    let f = fixture();
    let err = f.service.register(MSISDN, EMAIL, "1234567").await.unwrap_err();
    assert_eq!(
        err.to_string(),
        ValidationError::PasswordTooShort { min: 8 }.to_string()
    );
}

#[tokio::test]
async fn test_register_unknown_or_inactive_subscriber() {
    let f = fixture();

    let err = f
        .service
        .register("+40799999999", EMAIL, PASSWORD)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Auth(AuthError::SubscriberNotActive)));

    f.directory.set_status(MSISDN, "SUSPENDED").await;
    let err = f.service.register(MSISDN, EMAIL, PASSWORD).await.unwrap_err();
    assert!(matches!(err, DomainError::Auth(AuthError::SubscriberNotActive)));

    assert!(f.users.is_empty().await);
    assert_eq!(f.email.count(), 0);
}

#[tokio::test]
async fn test_register_directory_failure_propagates() {
    let f = fixture();
    f.directory.set_unavailable(true);

    let err = f.service.register(MSISDN, EMAIL, PASSWORD).await.unwrap_err();
    assert!(matches!(err, DomainError::ExternalService { .. }));
}

#[tokio::test]
async fn test_register_conflict() {
    let f = fixture();
    f.service.register(MSISDN, EMAIL, PASSWORD).await.unwrap();

    let err = f.service.register(MSISDN, "other@b.com", PASSWORD).await.unwrap_err();
    assert!(matches!(err, DomainError::Conflict { .. }));
}

#[tokio::test]
async fn test_register_succeeds_when_email_fails() {
    let f = fixture_with_email(MockEmailService::failing());

    let result = f.service.register(MSISDN, EMAIL, PASSWORD).await.unwrap();
    assert!(!result.email_sent);
    assert!(f.users.find_by_msisdn(MSISDN).await.unwrap().is_some());
}

#[tokio::test]
async fn test_verify_email_flips_flag_and_consumes_code() {
    let f = fixture();
    f.service.register(MSISDN, EMAIL, PASSWORD).await.unwrap();
    let code = f.email.last_code(EMAIL).unwrap();

    f.service.verify_email(EMAIL, &code).await.unwrap();
    assert!(f.users.find_by_email(EMAIL).await.unwrap().unwrap().email_verified);

    let err = f.service.verify_email(EMAIL, &code).await.unwrap_err();
    assert!(matches!(err, DomainError::Auth(AuthError::InvalidVerificationCode)));
}

#[tokio::test]
async fn test_verify_email_wrong_code() {
    let f = fixture();
    f.service.register(MSISDN, EMAIL, PASSWORD).await.unwrap();
    let code = f.email.last_code(EMAIL).unwrap();
    let wrong = if code == "999999" { "100000" } else { "999999" };

    let err = f.service.verify_email(EMAIL, wrong).await.unwrap_err();
    assert!(matches!(err, DomainError::Auth(AuthError::InvalidVerificationCode)));

    // The right code still works after a wrong guess
    f.service.verify_email(EMAIL, &code).await.unwrap();
}

#[tokio::test]
async fn test_verify_email_malformed_code() {
    let f = fixture();
    f.service.register(MSISDN, EMAIL, PASSWORD).await.unwrap();
    let code = f.email.last_code(EMAIL).unwrap();

    for malformed in ["12ab", "12345", "1234567"] {
        let err = f.service.verify_email(EMAIL, malformed).await.unwrap_err();
        assert!(matches!(
            err,
            DomainError::ValidationErr(ValidationError::InvalidVerificationCodeFormat)
        ));
    }

    // Rejected before the store, so the issued code is untouched
    f.service.verify_email(EMAIL, &code).await.unwrap();
}

#[tokio::test]
async fn test_resend_code() {
    let f = fixture();
    f.service.register(MSISDN, EMAIL, PASSWORD).await.unwrap();
    assert_eq!(f.email.count(), 1);

    assert!(f.service.resend_code(EMAIL).await.unwrap());
    assert_eq!(f.email.count(), 2);

    let code = f.email.last_code(EMAIL).unwrap();
    f.service.verify_email(EMAIL, &code).await.unwrap();

    let err = f.service.resend_code(EMAIL).await.unwrap_err();
    assert!(matches!(err, DomainError::Auth(AuthError::EmailAlreadyVerified)));

    let err = f.service.resend_code("unknown@b.com").await.unwrap_err();
    assert!(matches!(err, DomainError::Auth(AuthError::UserNotFound)));
}

#[tokio::test]
async fn test_login_requires_verified_email() {
    let f = fixture();
    f.service.register(MSISDN, EMAIL, PASSWORD).await.unwrap();

    let err = f.service.login(MSISDN, PASSWORD).await.unwrap_err();
    assert!(matches!(err, DomainError::Auth(AuthError::EmailNotVerified)));
}

#[tokio::test]
async fn test_login_bad_credentials_are_indistinguishable() {
    let f = fixture();
    registered_and_verified(&f).await;

    let wrong_password = f.service.login(MSISDN, "wrong-password").await.unwrap_err();
    let unknown_user = f.service.login("+40700000000", PASSWORD).await.unwrap_err();

    assert!(matches!(wrong_password, DomainError::Auth(AuthError::InvalidCredentials)));
    assert!(matches!(unknown_user, DomainError::Auth(AuthError::InvalidCredentials)));
    assert_eq!(wrong_password.to_string(), unknown_user.to_string());
}

#[tokio::test]
async fn test_login_success_populates_subscriber_fields() {
    let f = fixture();
    registered_and_verified(&f).await;

    let result = f.service.login(MSISDN, PASSWORD).await.unwrap();
    assert_eq!(result.user.msisdn, MSISDN);
    assert_eq!(result.user.email, EMAIL);
    assert!(result.user.email_verified);
    assert_eq!(result.user.subscriber_id, 101);
    assert_eq!(result.user.customer_id, 55);
    assert_eq!(result.user.customer_name, "Ana Popescu");
    assert_eq!(result.user.status, "ACTIVE");

    let claims = f.tokens.verify(&result.token).unwrap();
    assert_eq!(claims.msisdn(), MSISDN);
}

#[tokio::test]
async fn test_login_revalidates_subscriber() {
    let f = fixture();
    registered_and_verified(&f).await;

    f.directory.set_status(MSISDN, "SUSPENDED").await;
    let err = f.service.login(MSISDN, PASSWORD).await.unwrap_err();
    assert!(matches!(err, DomainError::Auth(AuthError::SubscriberNotActive)));
}

#[tokio::test]
async fn test_verify_session_rechecks_directory_every_call() {
    let f = fixture();
    registered_and_verified(&f).await;
    let token = f.service.login(MSISDN, PASSWORD).await.unwrap().token;

    let before = f.directory.lookup_count();
    f.service.verify_session(&token).await.unwrap();
    f.service.verify_session(&token).await.unwrap();
    assert_eq!(f.directory.lookup_count(), before + 2);
}

#[tokio::test]
async fn test_verify_session_inactive_subscriber_is_unauthorized() {
    let f = fixture();
    registered_and_verified(&f).await;
    let token = f.service.login(MSISDN, PASSWORD).await.unwrap().token;

    f.directory.set_status(MSISDN, "INACTIVE").await;
    let err = f.service.verify_session(&token).await.unwrap_err();
    assert!(matches!(err, DomainError::Auth(AuthError::SessionInvalid)));

    f.directory.remove(MSISDN).await;
    let err = f.service.verify_session(&token).await.unwrap_err();
    assert!(matches!(err, DomainError::Auth(AuthError::SessionInvalid)));
}

#[tokio::test]
async fn test_verify_session_fails_closed_on_directory_error() {
    let f = fixture();
    registered_and_verified(&f).await;
    let token = f.service.login(MSISDN, PASSWORD).await.unwrap().token;

    f.directory.set_unavailable(true);
    let err = f.service.verify_session(&token).await.unwrap_err();
    assert!(matches!(err, DomainError::Auth(AuthError::SessionInvalid)));
}

#[tokio::test]
async fn test_verify_session_rejects_bad_tokens() {
    let f = fixture();
    let err = f.service.verify_session("garbage").await.unwrap_err();
    assert!(matches!(err, DomainError::Token(TokenError::InvalidTokenFormat)));

    // Signed token for a user that never registered
    let token = f.tokens.issue(MSISDN).unwrap();
    let err = f.service.verify_session(&token).await.unwrap_err();
    assert!(matches!(err, DomainError::Auth(AuthError::SessionInvalid)));
}
