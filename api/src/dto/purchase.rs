use serde::{Deserialize, Serialize};
use validator::Validate;

use tpcm_core::domain::entities::{Transaction, TransactionState};
use tpcm_core::services::transaction::{CancelOutcome, CancelStatus, CommitReceipt, PurchaseReceipt};

/// Third party the purchase dialog charges for when none is given
pub const DEFAULT_THIRD_PARTY_ID: i64 = 1;

fn default_third_party_id() -> i64 {
    DEFAULT_THIRD_PARTY_ID
}

/// Body of `POST /api/purchases` and `POST /api/purchases/request`
///
/// The MSISDN is never taken from the body; it comes from the session.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseRequest {
    pub amount: f64,

    #[serde(default = "default_third_party_id")]
    #[validate(range(min = 1, message = "Invalid third party id"))]
    pub third_party_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CommitRequest {
    #[validate(length(min = 1, max = 64, message = "Transaction id is required"))]
    pub transaction_id: String,

    pub amount: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CancelRequest {
    #[validate(length(min = 1, max = 64, message = "Transaction id is required"))]
    pub transaction_id: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionResponse {
    pub success: bool,
    pub transaction_id: String,
    pub transaction: Transaction,
}

impl From<Transaction> for TransactionResponse {
    fn from(transaction: Transaction) -> Self {
        Self {
            success: true,
            transaction_id: transaction.transaction_id.clone(),
            transaction,
        }
    }
}

/// A committed purchase with the ledger's receipt
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptResponse {
    pub success: bool,
    pub transaction_id: String,
    pub transaction: Transaction,
    pub receipt: CommitReceipt,
}

impl ReceiptResponse {
    pub fn new(transaction: Transaction, receipt: CommitReceipt) -> Self {
        Self {
            success: true,
            transaction_id: transaction.transaction_id.clone(),
            transaction,
            receipt,
        }
    }
}

impl From<PurchaseReceipt> for ReceiptResponse {
    fn from(purchase: PurchaseReceipt) -> Self {
        Self::new(purchase.transaction, purchase.receipt)
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CancelResponse {
    pub transaction_id: String,
    /// `cancelled`, `already_terminal` or `cancellation_requested`
    pub status: &'static str,
    pub state: TransactionState,
}

impl From<CancelOutcome> for CancelResponse {
    fn from(outcome: CancelOutcome) -> Self {
        let status = match outcome.status {
            CancelStatus::Cancelled => "cancelled",
            CancelStatus::AlreadyTerminal(_) => "already_terminal",
            CancelStatus::CancellationRequested => "cancellation_requested",
        };
        Self {
            transaction_id: outcome.transaction_id,
            status,
            state: outcome.state,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_third_party_defaults_to_one() {
        let request: PurchaseRequest = serde_json::from_str(r#"{"amount": 4.5}"#).unwrap();
        assert_eq!(request.third_party_id, 1);
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_cancel_response_status_names() {
        let pending = CancelResponse::from(CancelOutcome {
            transaction_id: "T1".to_string(),
            status: CancelStatus::CancellationRequested,
            state: TransactionState::Requested,
        });
        let body = serde_json::to_value(pending).unwrap();
        assert_eq!(body["status"], "cancellation_requested");
        assert_eq!(body["state"], "REQUESTED");
        assert_eq!(body["transactionId"], "T1");

        let done = CancelResponse::from(CancelOutcome {
            transaction_id: "T2".to_string(),
            status: CancelStatus::AlreadyTerminal(TransactionState::Committed),
            state: TransactionState::Committed,
        });
        assert_eq!(done.status, "already_terminal");
    }
}
