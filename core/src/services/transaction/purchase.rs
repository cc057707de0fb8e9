//! Registry of live purchase attempts for the step-by-step purchase flow

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::{Mutex, RwLock};
use tokio_util::sync::CancellationToken;

use crate::domain::entities::{Transaction, TransactionState};
use crate::errors::{DomainError, DomainResult, TransactionError};

use super::config::PurchaseServiceConfig;
use super::coordinator::TransactionCoordinator;
use super::traits::LedgerClient;
use super::types::{
    CancelOutcome, CancelStatus, CommitReceipt, LedgerBalance, PendingCancellation,
    PurchaseReceipt,
};

/// One purchase attempt: its transaction and the signal used to cancel it
/// while a step is in flight
struct PurchaseAttempt {
    msisdn: String,
    transaction: Mutex<Transaction>,
    cancel: CancellationToken,
}

impl PurchaseAttempt {
    fn new(transaction: Transaction) -> Self {
        Self {
            msisdn: transaction.msisdn.clone(),
            transaction: Mutex::new(transaction),
            cancel: CancellationToken::new(),
        }
    }
}

/// What a housekeeping sweep did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepReport {
    /// Abandoned reservations released
    pub released: usize,
    /// Terminal attempts dropped after retention
    pub evicted: usize,
}

/// Purchase attempts keyed by transaction id and bound to the MSISDN that
/// created them
pub struct PurchaseService<L: LedgerClient + 'static> {
    coordinator: Arc<TransactionCoordinator<L>>,
    attempts: RwLock<HashMap<String, Arc<PurchaseAttempt>>>,
    config: PurchaseServiceConfig,
}

impl<L: LedgerClient + 'static> PurchaseService<L> {
    pub fn new(coordinator: Arc<TransactionCoordinator<L>>, config: PurchaseServiceConfig) -> Self {
        Self {
            coordinator,
            attempts: RwLock::new(HashMap::new()),
            config,
        }
    }

    pub fn coordinator(&self) -> &Arc<TransactionCoordinator<L>> {
        &self.coordinator
    }

    /// First leg: reserve funds and register the attempt
    pub async fn request(
        &self,
        msisdn: &str,
        amount: f64,
        third_party_id: i64,
    ) -> DomainResult<Transaction> {
        self.sweep().await;

        let transaction = self
            .coordinator
            .request(msisdn, amount, third_party_id)
            .await?;
        self.remember(transaction.clone()).await;
        Ok(transaction)
    }

    /// Second leg
    ///
    /// If a cancel arrived since the request, the reservation is released
    /// instead and the attempt reports `Cancelled`. A concurrent step on the
    /// same attempt is refused with `InProgress`.
    pub async fn commit(
        &self,
        msisdn: &str,
        transaction_id: &str,
        amount: f64,
    ) -> DomainResult<(Transaction, CommitReceipt)> {
        let attempt = self.attempt(msisdn, transaction_id).await?;
        let Ok(mut transaction) = attempt.transaction.try_lock() else {
            return Err(TransactionError::InProgress {
                transaction_id: transaction_id.to_string(),
            }
            .into());
        };

        if attempt.cancel.is_cancelled() {
            self.coordinator
                .release(&mut transaction, "cancelled_by_user")
                .await;
            return Err(TransactionError::Cancelled {
                transaction_id: transaction_id.to_string(),
            }
            .into());
        }

        let receipt = self.coordinator.commit(&mut transaction, amount).await?;
        if attempt.cancel.is_cancelled() {
            tracing::info!(
                transaction_id = %transaction_id,
                event = "cancel_after_commit_ignored",
                "Cancel arrived while commit was in flight; commit stands"
            );
        }
        Ok((transaction.clone(), receipt))
    }

    /// User cancel
    ///
    /// Runs immediately when no step or sweep is in flight. Otherwise the
    /// attempt's cancellation signal is raised and honored at the next step
    /// boundary; the `Requested` state reported then is the last one seen.
    pub async fn cancel(&self, msisdn: &str, transaction_id: &str) -> DomainResult<CancelOutcome> {
        let attempt = self.attempt(msisdn, transaction_id).await?;
        let outcome = match attempt.transaction.try_lock() {
            Ok(mut transaction) => {
                attempt.cancel.cancel();
                self.coordinator.cancel(&mut transaction).await?
            }
            Err(_) => {
                attempt.cancel.cancel();
                tracing::info!(
                    transaction_id = %transaction_id,
                    event = "cancellation_requested",
                    "Step or sweep in flight, cancellation deferred"
                );
                CancelOutcome {
                    transaction_id: transaction_id.to_string(),
                    status: CancelStatus::CancellationRequested,
                    state: TransactionState::Requested,
                }
            }
        };
        Ok(outcome)
    }

    /// Current view of an attempt; waits for an in-flight step to finish
    pub async fn get(&self, msisdn: &str, transaction_id: &str) -> DomainResult<Transaction> {
        let attempt = self.attempt(msisdn, transaction_id).await?;
        let transaction = attempt.transaction.lock().await;
        Ok(transaction.clone())
    }

    pub async fn balance(&self, msisdn: &str) -> DomainResult<LedgerBalance> {
        self.coordinator.balance(msisdn).await
    }

    /// Request and commit in one call
    ///
    /// The protocol runs on its own task. Dropping the returned future (the
    /// client went away) raises the cancellation signal; the task then
    /// releases the reservation at the next boundary instead of committing.
    pub async fn purchase(
        &self,
        msisdn: &str,
        amount: f64,
        third_party_id: i64,
    ) -> DomainResult<PurchaseReceipt> {
        self.sweep().await;

        let token = CancellationToken::new();
        let guard = token.clone().drop_guard();
        let coordinator = Arc::clone(&self.coordinator);
        let owned_msisdn = msisdn.to_string();

        let handle = tokio::spawn(async move {
            coordinator
                .purchase(&owned_msisdn, amount, third_party_id, &token)
                .await
        });

        let result = handle.await.map_err(|e| DomainError::Internal {
            message: format!("purchase task failed: {}", e),
        })?;
        guard.disarm();

        let receipt = result?;
        self.remember(receipt.transaction.clone()).await;
        Ok(receipt)
    }

    /// Release abandoned reservations and forget old terminal attempts
    ///
    /// Attempts with a step in flight are skipped.
    pub async fn sweep(&self) -> SweepReport {
        let now = Utc::now();
        let snapshot: Vec<(String, Arc<PurchaseAttempt>)> = self
            .attempts
            .read()
            .await
            .iter()
            .map(|(id, attempt)| (id.clone(), Arc::clone(attempt)))
            .collect();

        let mut report = SweepReport::default();
        let mut expired = Vec::new();
        for (id, attempt) in snapshot {
            let Ok(mut transaction) = attempt.transaction.try_lock() else {
                continue;
            };
            if transaction.is_terminal() {
                if age(now, transaction.updated_at) >= self.config.retention {
                    expired.push(id);
                }
            } else if age(now, transaction.created_at) >= self.config.abandon_after {
                self.coordinator
                    .release(&mut transaction, "abandoned")
                    .await;
                report.released += 1;
            }
        }

        if !expired.is_empty() {
            let mut attempts = self.attempts.write().await;
            for id in &expired {
                attempts.remove(id);
            }
            report.evicted = expired.len();
        }

        if report != SweepReport::default() {
            tracing::info!(
                released = report.released,
                evicted = report.evicted,
                event = "purchase_sweep",
                "Purchase registry swept"
            );
        }
        report
    }

    /// Retry queued compensating cancels
    pub async fn retry_pending_cancellations(&self) -> usize {
        self.coordinator.retry_pending_cancellations().await
    }

    pub async fn pending_cancellations(&self) -> Vec<PendingCancellation> {
        self.coordinator.pending_cancellations().await
    }

    /// Number of attempts held
    pub async fn len(&self) -> usize {
        self.attempts.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.attempts.read().await.is_empty()
    }

    async fn remember(&self, transaction: Transaction) {
        let id = transaction.transaction_id.clone();
        self.attempts
            .write()
            .await
            .insert(id, Arc::new(PurchaseAttempt::new(transaction)));
    }

    /// Attempts owned by someone else are reported as not found
    async fn attempt(&self, msisdn: &str, transaction_id: &str) -> DomainResult<Arc<PurchaseAttempt>> {
        let attempts = self.attempts.read().await;
        match attempts.get(transaction_id) {
            Some(attempt) if attempt.msisdn == msisdn.trim() => Ok(Arc::clone(attempt)),
            _ => Err(TransactionError::NotFound {
                transaction_id: transaction_id.to_string(),
            }
            .into()),
        }
    }
}

fn age(now: DateTime<Utc>, since: DateTime<Utc>) -> Duration {
    (now - since).to_std().unwrap_or_default()
}
