//! Unit tests for token service

use chrono::Duration;

use crate::domain::entities::SessionClaims;
use crate::errors::{DomainError, TokenError};
use crate::services::token::{TokenService, TokenServiceConfig};

fn service() -> TokenService {
    TokenService::new(TokenServiceConfig {
        jwt_secret: "test-secret".to_string(),
        ..Default::default()
    })
}

#[test]
fn test_issue_and_verify() {
    let service = service();
    let token = service.issue("+40712345678").unwrap();

    let claims = service.verify(&token).unwrap();
    assert_eq!(claims.msisdn(), "+40712345678");
    assert_eq!(claims.exp - claims.iat, 24 * 3600);
    assert_eq!(claims.iss, "tpcm-store");
}

#[test]
fn test_expired_token_rejected() {
    let service = service();
    let claims = SessionClaims::new("+40712345678", Duration::seconds(-60), "tpcm-store", None);
    let token = service.encode_jwt(&claims).unwrap();

    match service.verify(&token) {
        Err(DomainError::Token(TokenError::TokenExpired)) => {}
        other => panic!("Expected TokenExpired, got {:?}", other),
    }
}

#[test]
fn test_wrong_secret_rejected() {
    let token = service().issue("+40712345678").unwrap();
    let other = TokenService::new(TokenServiceConfig {
        jwt_secret: "another-secret".to_string(),
        ..Default::default()
    });

    match other.verify(&token) {
        Err(DomainError::Token(TokenError::InvalidTokenFormat)) => {}
        other => panic!("Expected InvalidTokenFormat, got {:?}", other),
    }
}

#[test]
fn test_garbage_token_rejected() {
    assert!(matches!(
        service().verify("not-a-jwt"),
        Err(DomainError::Token(TokenError::InvalidTokenFormat))
    ));
}

#[test]
fn test_wrong_issuer_rejected() {
    let service = service();
    let claims = SessionClaims::new("+40712345678", Duration::hours(1), "someone-else", None);
    let token = service.encode_jwt(&claims).unwrap();

    assert!(matches!(
        service.verify(&token),
        Err(DomainError::Token(TokenError::InvalidClaims))
    ));
}

#[test]
fn test_audience_enforced_when_configured() {
    let service = TokenService::new(TokenServiceConfig {
        jwt_secret: "test-secret".to_string(),
        audience: Some("tpcm-store-api".to_string()),
        ..Default::default()
    });
    let token = service.issue("+40712345678").unwrap();
    assert_eq!(service.verify(&token).unwrap().aud.as_deref(), Some("tpcm-store-api"));

    let claims = SessionClaims::new("+40712345678", Duration::hours(1), "tpcm-store", None);
    let without_aud = service.encode_jwt(&claims).unwrap();
    assert!(service.verify(&without_aud).is_err());
}
