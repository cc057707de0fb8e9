//! Transaction coordinator configuration

use std::time::Duration;

use tpcm_shared::LedgerConfig;

/// Default sales channel sent with every reservation
pub const DEFAULT_CHANNEL: &str = "APP";

/// Reservations are all-or-nothing by default
pub const DEFAULT_PARTIAL_RESERVATION: &str = "N";

/// Sends of a queued compensating cancel before it is given up
pub const DEFAULT_MAX_CANCEL_ATTEMPTS: u32 = 10;

/// Fixed fields the coordinator adds to every reservation request, and the
/// outbox retry limit
#[derive(Debug, Clone)]
pub struct CoordinatorConfig {
    pub channel: String,
    pub partial_reservation: String,
    pub max_cancel_attempts: u32,
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self {
            channel: DEFAULT_CHANNEL.to_string(),
            partial_reservation: DEFAULT_PARTIAL_RESERVATION.to_string(),
            max_cancel_attempts: DEFAULT_MAX_CANCEL_ATTEMPTS,
        }
    }
}

impl From<&LedgerConfig> for CoordinatorConfig {
    fn from(config: &LedgerConfig) -> Self {
        Self {
            channel: config.channel.clone(),
            partial_reservation: config.partial_reservation.clone(),
            max_cancel_attempts: config.max_cancel_attempts,
        }
    }
}

/// Purchase registry housekeeping limits
#[derive(Debug, Clone)]
pub struct PurchaseServiceConfig {
    /// How long terminal attempts stay queryable (repeat cancels stay no-ops)
    pub retention: Duration,
    /// A reservation left in REQUESTED this long is released
    pub abandon_after: Duration,
}

impl Default for PurchaseServiceConfig {
    fn default() -> Self {
        Self {
            retention: Duration::from_secs(30 * 60),
            abandon_after: Duration::from_secs(15 * 60),
        }
    }
}
