//! Purchase transaction entity and its state machine.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::TransactionError;

/// Lifecycle state of a purchase transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionState {
    /// Funds reserved on the ledger, not yet charged
    Requested,
    /// Charge finalized
    Committed,
    /// Reservation released
    Cancelled,
}

impl TransactionState {
    /// Whether no further transition is possible
    pub fn is_terminal(&self) -> bool {
        !matches!(self, TransactionState::Requested)
    }
}

impl std::fmt::Display for TransactionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionState::Requested => write!(f, "REQUESTED"),
            TransactionState::Committed => write!(f, "COMMITTED"),
            TransactionState::Cancelled => write!(f, "CANCELLED"),
        }
    }
}

/// A purchase attempt tracked by the coordinator.
///
/// Only constructed once the ledger has accepted the reservation, so there is
/// no representation of the pre-request state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub transaction_id: String,
    pub msisdn: String,
    pub amount: f64,
    pub third_party_id: i64,
    pub state: TransactionState,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Transaction {
    /// Creates a transaction for a reservation the ledger has accepted
    pub fn requested(
        transaction_id: impl Into<String>,
        msisdn: impl Into<String>,
        amount: f64,
        third_party_id: i64,
    ) -> Self {
        let now = Utc::now();
        Self {
            transaction_id: transaction_id.into(),
            msisdn: msisdn.into(),
            amount,
            third_party_id,
            state: TransactionState::Requested,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether the transaction reached a terminal state
    pub fn is_terminal(&self) -> bool {
        self.state.is_terminal()
    }

    /// Fails unless the transaction may still be committed
    pub fn ensure_committable(&self) -> Result<(), TransactionError> {
        if self.state == TransactionState::Requested {
            Ok(())
        } else {
            Err(TransactionError::InvalidState {
                transaction_id: self.transaction_id.clone(),
                state: self.state.to_string(),
                action: "commit".to_string(),
            })
        }
    }

    /// REQUESTED -> COMMITTED
    pub fn mark_committed(&mut self) -> Result<(), TransactionError> {
        self.ensure_committable()?;
        self.state = TransactionState::Committed;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// REQUESTED -> CANCELLED. Returns `false` when the transaction was
    /// already terminal and nothing changed.
    pub fn mark_cancelled(&mut self) -> bool {
        if self.is_terminal() {
            return false;
        }
        self.state = TransactionState::Cancelled;
        self.updated_at = Utc::now();
        true
    }
}
