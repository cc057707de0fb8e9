//! Balance ledger collaborator

use async_trait::async_trait;
use thiserror::Error;

use crate::errors::DomainError;

use super::types::{CancelAck, CommitReceipt, LedgerBalance, Reservation, ReservationRequest};

/// Why a ledger call did not succeed
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// The ledger answered and refused
    #[error("ledger rejected the call ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("ledger unreachable: {0}")]
    Unreachable(String),

    /// No answer in time; treated the same as a refusal
    #[error("ledger timed out: {0}")]
    Timeout(String),

    #[error("invalid ledger response: {0}")]
    InvalidResponse(String),
}

impl LedgerError {
    /// Whether the same call can succeed later without anything changing
    ///
    /// A 4xx refusal is final (the reservation is unknown or already closed);
    /// network failures, timeouts and 5xx answers are not.
    pub fn is_transient(&self) -> bool {
        match self {
            LedgerError::Unreachable(_) | LedgerError::Timeout(_) => true,
            LedgerError::Rejected { status, .. } => *status >= 500,
            LedgerError::InvalidResponse(_) => false,
        }
    }
}

impl From<LedgerError> for DomainError {
    fn from(err: LedgerError) -> Self {
        DomainError::external("ledger", err.to_string())
    }
}

/// Balance ledger, the authority over reservations and charges
#[async_trait]
pub trait LedgerClient: Send + Sync {
    /// Place a reservation
    async fn request_transaction(
        &self,
        request: &ReservationRequest,
    ) -> Result<Reservation, LedgerError>;

    /// Finalize a reserved charge
    async fn commit_transaction(
        &self,
        transaction_id: &str,
        amount: f64,
    ) -> Result<CommitReceipt, LedgerError>;

    /// Release a reservation
    async fn cancel_transaction(&self, transaction_id: &str) -> Result<CancelAck, LedgerError>;

    async fn get_balance(&self, msisdn: &str) -> Result<LedgerBalance, LedgerError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_recoverable_failures_are_transient() {
        assert!(LedgerError::Timeout("cancel".to_string()).is_transient());
        assert!(LedgerError::Unreachable("refused".to_string()).is_transient());
        assert!(LedgerError::Rejected {
            status: 503,
            message: "busy".to_string()
        }
        .is_transient());

        assert!(!LedgerError::Rejected {
            status: 404,
            message: "Transaction not found".to_string()
        }
        .is_transient());
        assert!(!LedgerError::InvalidResponse("missing id".to_string()).is_transient());
    }
}
