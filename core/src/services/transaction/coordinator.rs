//! Two-phase purchase protocol against the balance ledger

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;

use tpcm_shared::utils::msisdn::{is_valid_msisdn, mask_msisdn};
use tpcm_shared::utils::validation::is_valid_amount;

use crate::domain::entities::Transaction;
use crate::errors::{DomainResult, TransactionError, ValidationError};

use super::config::CoordinatorConfig;
use super::traits::LedgerClient;
use super::types::{
    CancelOutcome, CancelStatus, CommitReceipt, LedgerBalance, PendingCancellation,
    PurchaseReceipt, ReservationRequest,
};

/// Drives request -> commit -> cancel for purchase attempts.
///
/// A failed commit is always followed by one compensating cancel before the
/// failure is returned. A compensating cancel that fails transiently is kept
/// in an outbox for [`retry_pending_cancellations`]; it is never
/// reported to the caller, who sees the commit failure.
///
/// [`retry_pending_cancellations`]: TransactionCoordinator::retry_pending_cancellations
pub struct TransactionCoordinator<L: LedgerClient> {
    ledger: Arc<L>,
    config: CoordinatorConfig,
    outbox: Mutex<Vec<PendingCancellation>>,
}

impl<L: LedgerClient> TransactionCoordinator<L> {
    pub fn new(ledger: Arc<L>, config: CoordinatorConfig) -> Self {
        Self {
            ledger,
            config,
            outbox: Mutex::new(Vec::new()),
        }
    }

    /// Place a reservation; the returned transaction is REQUESTED
    ///
    /// Input is validated before the ledger is contacted. No retry happens
    /// here: a failure means the attempt never entered REQUESTED.
    pub async fn request(
        &self,
        msisdn: &str,
        amount: f64,
        third_party_id: i64,
    ) -> DomainResult<Transaction> {
        let msisdn = msisdn.trim();
        if !is_valid_msisdn(msisdn) {
            return Err(ValidationError::InvalidMsisdn.into());
        }
        if !is_valid_amount(amount) {
            return Err(ValidationError::InvalidAmount.into());
        }

        let request = ReservationRequest {
            msisdn: msisdn.to_string(),
            amount,
            third_party_id,
            partial_reservation: self.config.partial_reservation.clone(),
            channel: self.config.channel.clone(),
        };

        let reservation = self
            .ledger
            .request_transaction(&request)
            .await
            .map_err(|e| {
                tracing::warn!(
                    msisdn = %mask_msisdn(msisdn),
                    amount = amount,
                    error = %e,
                    event = "transaction_request_failed",
                    "Ledger refused reservation"
                );
                e
            })?;

        tracing::info!(
            transaction_id = %reservation.transaction_id,
            msisdn = %mask_msisdn(msisdn),
            amount = amount,
            event = "transaction_requested",
            "Reservation placed"
        );

        Ok(Transaction::requested(
            reservation.transaction_id,
            msisdn,
            amount,
            third_party_id,
        ))
    }

    /// Finalize the charge for a REQUESTED transaction
    ///
    /// On ledger failure (including timeouts) the reservation is released
    /// with one compensating cancel, the transaction ends CANCELLED and the
    /// commit error is returned.
    pub async fn commit(
        &self,
        transaction: &mut Transaction,
        amount: f64,
    ) -> DomainResult<CommitReceipt> {
        if !is_valid_amount(amount) {
            return Err(ValidationError::InvalidAmount.into());
        }
        transaction.ensure_committable()?;

        match self
            .ledger
            .commit_transaction(&transaction.transaction_id, amount)
            .await
        {
            Ok(receipt) => {
                transaction.mark_committed()?;
                tracing::info!(
                    transaction_id = %transaction.transaction_id,
                    amount = amount,
                    event = "transaction_committed",
                    "Transaction committed"
                );
                Ok(receipt)
            }
            Err(e) => {
                tracing::warn!(
                    transaction_id = %transaction.transaction_id,
                    error = %e,
                    event = "transaction_commit_failed",
                    "Commit failed, releasing reservation"
                );
                self.release(transaction, "commit_failed").await;
                Err(e.into())
            }
        }
    }

    /// Explicit user cancel
    ///
    /// A terminal transaction is left alone and reported as such without a
    /// ledger call. A ledger failure is returned and the transaction stays
    /// REQUESTED so the cancel can be repeated.
    pub async fn cancel(&self, transaction: &mut Transaction) -> DomainResult<CancelOutcome> {
        if transaction.is_terminal() {
            return Ok(CancelOutcome {
                transaction_id: transaction.transaction_id.clone(),
                status: CancelStatus::AlreadyTerminal(transaction.state),
                state: transaction.state,
            });
        }

        self.ledger
            .cancel_transaction(&transaction.transaction_id)
            .await
            .map_err(|e| {
                tracing::warn!(
                    transaction_id = %transaction.transaction_id,
                    error = %e,
                    event = "transaction_cancel_failed",
                    "Ledger refused cancel"
                );
                e
            })?;

        transaction.mark_cancelled();
        tracing::info!(
            transaction_id = %transaction.transaction_id,
            event = "transaction_cancelled",
            "Transaction cancelled"
        );

        Ok(CancelOutcome {
            transaction_id: transaction.transaction_id.clone(),
            status: CancelStatus::Cancelled,
            state: transaction.state,
        })
    }

    /// Reserve then commit, observing `token` between the two legs
    ///
    /// A cancellation raised while the reservation call is in flight is acted
    /// on once it returns: the reservation is released and commit is never
    /// called. Once commit has been sent it runs to completion.
    pub async fn purchase(
        &self,
        msisdn: &str,
        amount: f64,
        third_party_id: i64,
        token: &CancellationToken,
    ) -> DomainResult<PurchaseReceipt> {
        let mut transaction = self.request(msisdn, amount, third_party_id).await?;

        if token.is_cancelled() {
            tracing::info!(
                transaction_id = %transaction.transaction_id,
                event = "purchase_cancelled",
                "Purchase cancelled before commit"
            );
            self.release(&mut transaction, "cancelled_by_user").await;
            return Err(TransactionError::Cancelled {
                transaction_id: transaction.transaction_id,
            }
            .into());
        }

        let receipt = self.commit(&mut transaction, amount).await?;
        Ok(PurchaseReceipt {
            transaction,
            receipt,
        })
    }

    /// Advisory balance read
    pub async fn balance(&self, msisdn: &str) -> DomainResult<LedgerBalance> {
        let msisdn = msisdn.trim();
        if !is_valid_msisdn(msisdn) {
            return Err(ValidationError::InvalidMsisdn.into());
        }
        Ok(self.ledger.get_balance(msisdn).await?)
    }

    /// Best-effort release of a REQUESTED transaction
    ///
    /// The transaction ends CANCELLED locally whatever the ledger answers. A
    /// transient failure goes to the outbox; a refusal is only logged.
    pub(crate) async fn release(&self, transaction: &mut Transaction, reason: &str) {
        if transaction.is_terminal() {
            return;
        }

        match self
            .ledger
            .cancel_transaction(&transaction.transaction_id)
            .await
        {
            Ok(_) => {
                tracing::info!(
                    transaction_id = %transaction.transaction_id,
                    reason = reason,
                    event = "transaction_released",
                    "Reservation released"
                );
            }
            Err(e) if !e.is_transient() => {
                tracing::warn!(
                    transaction_id = %transaction.transaction_id,
                    reason = reason,
                    error = %e,
                    event = "compensating_cancel_refused",
                    "Ledger refused compensating cancel, not retrying"
                );
            }
            Err(e) => {
                tracing::error!(
                    transaction_id = %transaction.transaction_id,
                    reason = reason,
                    error = %e,
                    event = "compensating_cancel_failed",
                    "Compensating cancel failed, queued for retry"
                );
                self.outbox.lock().await.push(PendingCancellation {
                    transaction_id: transaction.transaction_id.clone(),
                    msisdn: transaction.msisdn.clone(),
                    reason: reason.to_string(),
                    attempts: 1,
                    last_error: e.to_string(),
                    recorded_at: Utc::now(),
                });
            }
        }

        transaction.mark_cancelled();
    }

    /// Re-send every queued compensating cancel once
    ///
    /// An entry leaves the queue when the ledger acknowledges it, refuses it
    /// with a non-transient error, or reaches `max_cancel_attempts` sends.
    ///
    /// # Returns
    ///
    /// Number of cancels the ledger acknowledged
    pub async fn retry_pending_cancellations(&self) -> usize {
        let pending = std::mem::take(&mut *self.outbox.lock().await);
        if pending.is_empty() {
            return 0;
        }

        let mut resolved = 0;
        let mut still_pending = Vec::new();
        for mut entry in pending {
            match self.ledger.cancel_transaction(&entry.transaction_id).await {
                Ok(_) => {
                    resolved += 1;
                    tracing::info!(
                        transaction_id = %entry.transaction_id,
                        attempts = entry.attempts + 1,
                        event = "compensating_cancel_resolved",
                        "Queued cancel acknowledged"
                    );
                }
                Err(e) => {
                    entry.attempts += 1;
                    entry.last_error = e.to_string();
                    if e.is_transient() && entry.attempts < self.config.max_cancel_attempts {
                        still_pending.push(entry);
                    } else {
                        tracing::warn!(
                            transaction_id = %entry.transaction_id,
                            attempts = entry.attempts,
                            error = %e,
                            event = "compensating_cancel_abandoned",
                            "Queued cancel dropped; ledger reservation timeout applies"
                        );
                    }
                }
            }
        }

        if !still_pending.is_empty() {
            tracing::warn!(
                remaining = still_pending.len(),
                event = "compensating_cancel_pending",
                "Queued cancels still unacknowledged"
            );
            self.outbox.lock().await.extend(still_pending);
        }
        resolved
    }

    /// Snapshot of the outbox
    pub async fn pending_cancellations(&self) -> Vec<PendingCancellation> {
        self.outbox.lock().await.clone()
    }
}
