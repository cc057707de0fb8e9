//! Subscriber snapshot read from the external subscriber directory.

use serde::{Deserialize, Serialize};

/// Status value the directory uses for subscribers in good standing
pub const ACTIVE_STATUS: &str = "ACTIVE";

/// Point-in-time view of a subscriber and its customer.
///
/// Always fetched fresh; never cached across trust decisions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriberSnapshot {
    pub subscriber_id: i64,
    pub msisdn: String,
    pub status: String,
    pub subscription_type: String,
    pub customer_id: i64,
    pub customer_name: String,
}

impl SubscriberSnapshot {
    /// Whether the subscriber is currently active
    pub fn is_active(&self) -> bool {
        self.status.eq_ignore_ascii_case(ACTIVE_STATUS)
    }
}
