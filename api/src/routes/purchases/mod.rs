//! Purchase route handlers
//!
//! All routes run behind the session middleware and act on the
//! authenticated subscriber's MSISDN only.

pub mod flow;
pub mod status;

use std::sync::Arc;

use tpcm_core::services::transaction::{LedgerClient, PurchaseService};

/// Shared state for the purchase routes
pub struct PurchaseState<L: LedgerClient + 'static> {
    pub purchase_service: Arc<PurchaseService<L>>,
}

impl<L: LedgerClient + 'static> PurchaseState<L> {
    pub fn new(purchase_service: Arc<PurchaseService<L>>) -> Self {
        Self { purchase_service }
    }
}
