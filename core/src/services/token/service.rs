//! Session token service implementation

use chrono::Duration;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};

use crate::domain::entities::SessionClaims;
use crate::errors::{DomainError, TokenError};

use super::config::TokenServiceConfig;

/// Issues and verifies stateless session JWTs.
///
/// A token proves only that it was issued here and has not expired; the
/// caller still has to re-check the subscriber before trusting it.
pub struct TokenService {
    config: TokenServiceConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenService {
    /// Creates a new token service instance
    ///
    /// # Arguments
    ///
    /// * `config` - Token service configuration
    pub fn new(config: TokenServiceConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.jwt_secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_bytes());

        let mut validation = Validation::new(config.algorithm);
        validation.set_issuer(&[config.issuer.as_str()]);
        match config.audience.as_deref() {
            Some(audience) => validation.set_audience(&[audience]),
            None => validation.validate_aud = false,
        }
        validation.validate_exp = true;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub", "iss"]);

        Self {
            config,
            encoding_key,
            decoding_key,
            validation,
        }
    }

    /// Session lifetime in seconds
    pub fn session_expiry_seconds(&self) -> i64 {
        self.config.session_expiry_seconds
    }

    /// Issues a session token for `msisdn`
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - Signed JWT
    /// * `Err(DomainError)` - Signing failed
    pub fn issue(&self, msisdn: &str) -> Result<String, DomainError> {
        let claims = SessionClaims::new(
            msisdn,
            Duration::seconds(self.config.session_expiry_seconds),
            &self.config.issuer,
            self.config.audience.as_deref(),
        );
        self.encode_jwt(&claims)
    }

    /// Encodes claims into a JWT
    pub(crate) fn encode_jwt(&self, claims: &SessionClaims) -> Result<String, DomainError> {
        let header = Header::new(self.config.algorithm);
        encode(&header, claims, &self.encoding_key)
            .map_err(|_| DomainError::Token(TokenError::TokenGenerationFailed))
    }

    /// Verifies signature and expiry of a session token
    ///
    /// # Returns
    ///
    /// * `Ok(SessionClaims)` - The decoded claims if valid
    /// * `Err(TokenError)` - Token is invalid, expired, or malformed
    pub fn verify(&self, token: &str) -> Result<SessionClaims, DomainError> {
        let token_data = decode::<SessionClaims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => DomainError::Token(TokenError::TokenExpired),
                ErrorKind::InvalidIssuer | ErrorKind::InvalidAudience | ErrorKind::MissingRequiredClaim(_) => {
                    DomainError::Token(TokenError::InvalidClaims)
                }
                _ => DomainError::Token(TokenError::InvalidTokenFormat),
            })?;

        if token_data.claims.sub.trim().is_empty() {
            return Err(DomainError::Token(TokenError::InvalidClaims));
        }

        Ok(token_data.claims)
    }
}
