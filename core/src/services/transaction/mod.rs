//! Purchase transactions against the balance ledger
//!
//! [`TransactionCoordinator`] runs the request/commit/cancel protocol for a
//! single transaction. [`PurchaseService`] keeps the live attempts behind the
//! step-by-step HTTP flow and the one-shot purchase.

pub mod config;
pub mod coordinator;
pub mod purchase;
pub mod traits;
pub mod types;

#[cfg(test)]
mod tests;

pub use config::{CoordinatorConfig, PurchaseServiceConfig};
pub use coordinator::TransactionCoordinator;
pub use purchase::{PurchaseService, SweepReport};
pub use traits::{LedgerClient, LedgerError};
pub use types::{
    CancelAck, CancelOutcome, CancelStatus, CommitReceipt, LedgerBalance, PendingCancellation,
    PurchaseReceipt, Reservation, ReservationRequest,
};
