//! Store user entity: a subscriber's credentials for the store front.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Registered store account, keyed by MSISDN and email
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreUser {
    /// Database identifier, assigned on insert
    pub id: Option<u64>,

    /// Subscriber phone number
    pub msisdn: String,

    /// Email address the verification code is sent to
    pub email: String,

    /// bcrypt hash of the password
    #[serde(skip_serializing)]
    pub password_hash: String,

    /// Whether the email address has been confirmed
    pub email_verified: bool,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl StoreUser {
    /// Creates a new, unverified store user
    pub fn new(msisdn: String, email: String, password_hash: String) -> Self {
        let now = Utc::now();
        Self {
            id: None,
            msisdn,
            email,
            password_hash,
            email_verified: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Marks the email address as confirmed
    pub fn verify_email(&mut self) {
        self.email_verified = true;
        self.updated_at = Utc::now();
    }

    /// Whether the account may log in
    pub fn can_login(&self) -> bool {
        self.email_verified
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user_is_unverified() {
        let user = StoreUser::new("+40712345678".into(), "a@b.com".into(), "hash".into());
        assert!(!user.email_verified);
        assert!(!user.can_login());
        assert!(user.id.is_none());
    }

    #[test]
    fn test_verify_email() {
        let mut user = StoreUser::new("+40712345678".into(), "a@b.com".into(), "hash".into());
        let before = user.updated_at;
        user.verify_email();
        assert!(user.email_verified);
        assert!(user.can_login());
        assert!(user.updated_at >= before);
    }

    #[test]
    fn test_password_hash_never_serialized() {
        let user = StoreUser::new("+40712345678".into(), "a@b.com".into(), "secret-hash".into());
        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("secret-hash"));
    }
}
