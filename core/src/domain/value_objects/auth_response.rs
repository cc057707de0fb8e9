//! Authentication response value objects for API responses.

use serde::{Deserialize, Serialize};

use crate::domain::entities::{StoreUser, SubscriberSnapshot};

/// Authenticated user view: the store account joined with a fresh
/// subscriber snapshot
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    pub msisdn: String,
    pub email: String,
    pub email_verified: bool,
    #[serde(rename = "subscriberID")]
    pub subscriber_id: i64,
    #[serde(rename = "customerID")]
    pub customer_id: i64,
    pub customer_name: String,
    pub status: String,
    pub subscription_type: String,
}

impl SessionUser {
    /// Combines a store user with the subscriber snapshot it maps to
    pub fn from_parts(user: &StoreUser, subscriber: &SubscriberSnapshot) -> Self {
        Self {
            msisdn: user.msisdn.clone(),
            email: user.email.clone(),
            email_verified: user.email_verified,
            subscriber_id: subscriber.subscriber_id,
            customer_id: subscriber.customer_id,
            customer_name: subscriber.customer_name.clone(),
            status: subscriber.status.clone(),
            subscription_type: subscriber.subscription_type.clone(),
        }
    }
}

/// Result of a successful login
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoginResult {
    /// Signed session token
    pub token: String,

    /// Authenticated user
    pub user: SessionUser,
}

/// Result of a registration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationResult {
    /// The newly created, unverified user
    pub user: StoreUser,

    /// Whether the verification email was handed off successfully
    pub email_sent: bool,
}
