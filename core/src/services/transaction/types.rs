//! Ledger payloads and coordinator outcomes

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::entities::{Transaction, TransactionState};

/// Reservation request as sent to the balance ledger
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationRequest {
    pub msisdn: String,
    pub amount: f64,
    pub third_party_id: i64,
    pub partial_reservation: String,
    pub channel: String,
}

/// Ledger answer to a reservation request
#[derive(Debug, Clone, PartialEq)]
pub struct Reservation {
    pub transaction_id: String,
    /// Full ledger response body
    pub payload: Value,
}

/// Ledger answer to a commit
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitReceipt {
    pub transaction_id: String,
    pub amount: f64,
    pub payload: Value,
}

/// Ledger acknowledgement of a cancel
#[derive(Debug, Clone, PartialEq)]
pub struct CancelAck {
    pub transaction_id: String,
    pub payload: Value,
}

/// Advisory balance read; never used as an authorization gate
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerBalance {
    pub msisdn: String,
    pub available_balance: Option<f64>,
    pub payload: Value,
}

/// A compensating cancel the ledger did not acknowledge
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingCancellation {
    pub transaction_id: String,
    pub msisdn: String,
    pub reason: String,
    pub attempts: u32,
    pub last_error: String,
    pub recorded_at: DateTime<Utc>,
}

/// Result of a successful one-shot purchase
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PurchaseReceipt {
    pub transaction: Transaction,
    pub receipt: CommitReceipt,
}

/// What a cancel call did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelStatus {
    /// The ledger released the reservation
    Cancelled,
    /// Nothing to do; the transaction had already finished
    AlreadyTerminal(TransactionState),
    /// A step or sweep is in flight; the cancel applies at the next boundary
    CancellationRequested,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CancelOutcome {
    pub transaction_id: String,
    pub status: CancelStatus,
    pub state: TransactionState,
}

impl CancelOutcome {
    pub fn is_pending(&self) -> bool {
        self.status == CancelStatus::CancellationRequested
    }
}
