//! In-memory, time-bound, single-use verification code store

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use chrono::Utc;
use constant_time_eq::constant_time_eq;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::Instant;

use tpcm_shared::utils::validation::mask_email;

use crate::domain::entities::VerificationCode;

use super::config::VerificationStoreConfig;
use super::types::VerifyOutcome;

type EntryMap = HashMap<String, CodeEntry>;

/// One pending code together with the timer that will evict it.
///
/// The entry and its eviction handle are created, replaced and dropped as a
/// unit; the timer only removes the entry carrying its own generation.
struct CodeEntry {
    code: String,
    expires_at: Instant,
    generation: u64,
    failed_attempts: u32,
    eviction: JoinHandle<()>,
}

impl CodeEntry {
    fn discard(self) {
        self.eviction.abort();
    }
}

/// Verification code store keyed by subject (the email address).
///
/// At most one code is pending per subject. Issuing a new code replaces the
/// previous one and cancels its eviction timer. Checks are atomic per store:
/// the expiry test, comparison and removal happen under one lock, so a code
/// can never be accepted twice.
pub struct VerificationCodeStore {
    entries: Arc<Mutex<EntryMap>>,
    next_generation: AtomicU64,
    config: VerificationStoreConfig,
}

impl VerificationCodeStore {
    /// Create a new store
    ///
    /// Must be used from within a Tokio runtime: issuing a code spawns its
    /// eviction timer.
    pub fn new(config: VerificationStoreConfig) -> Self {
        Self {
            entries: Arc::new(Mutex::new(HashMap::new())),
            next_generation: AtomicU64::new(1),
            config,
        }
    }

    /// Store configuration
    pub fn config(&self) -> &VerificationStoreConfig {
        &self.config
    }

    /// Issue a fresh code for `subject`
    ///
    /// This method:
    /// 1. Generates a random 6-digit code
    /// 2. Replaces any pending code for the subject, cancelling its timer
    /// 3. Schedules eviction of the new entry after the eviction delay
    ///
    /// # Returns
    ///
    /// The issued code with its wall-clock expiry
    pub async fn issue(&self, subject: &str) -> VerificationCode {
        let code = VerificationCode::generate_code();
        let generation = self.next_generation.fetch_add(1, Ordering::Relaxed);
        let now = Instant::now();

        let mut entries = self.entries.lock().await;
        // Spawned while holding the lock so the timer cannot observe the map
        // before this entry is in place.
        let eviction = spawn_eviction(
            Arc::downgrade(&self.entries),
            subject.to_string(),
            generation,
            now + self.config.eviction_delay,
        );
        let previous = entries.insert(
            subject.to_string(),
            CodeEntry {
                code: code.clone(),
                expires_at: now + self.config.code_ttl,
                generation,
                failed_attempts: 0,
                eviction,
            },
        );
        drop(entries);

        let replaced = previous.is_some();
        if let Some(previous) = previous {
            previous.discard();
        }

        tracing::info!(
            subject = %mask_email(subject),
            generation = generation,
            replaced = replaced,
            event = "verification_code_issued",
            "Verification code issued"
        );

        let ttl = chrono::Duration::from_std(self.config.code_ttl)
            .unwrap_or_else(|_| chrono::Duration::minutes(15));
        VerificationCode {
            subject: subject.to_string(),
            code,
            expires_at: Utc::now() + ttl,
        }
    }

    /// Check a candidate code and report exactly what happened
    ///
    /// A match consumes the entry. A mismatch keeps it (until the attempt
    /// lockout, if enabled, is reached). An expired entry is evicted.
    pub async fn check(&self, subject: &str, candidate: &str) -> VerifyOutcome {
        let mut entries = self.entries.lock().await;

        let Some(entry) = entries.get_mut(subject) else {
            return VerifyOutcome::Missing;
        };

        if Instant::now() > entry.expires_at {
            if let Some(entry) = entries.remove(subject) {
                entry.discard();
            }
            tracing::info!(
                subject = %mask_email(subject),
                event = "verification_code_expired",
                "Verification code expired"
            );
            return VerifyOutcome::Expired;
        }

        if constant_time_eq(entry.code.as_bytes(), candidate.as_bytes()) {
            if let Some(entry) = entries.remove(subject) {
                entry.discard();
            }
            tracing::info!(
                subject = %mask_email(subject),
                event = "verification_code_verified",
                "Verification code verified"
            );
            return VerifyOutcome::Verified;
        }

        entry.failed_attempts += 1;
        let max_attempts = self.config.max_attempts;
        if max_attempts == 0 {
            return VerifyOutcome::Mismatch { remaining: None };
        }

        if entry.failed_attempts >= max_attempts {
            if let Some(entry) = entries.remove(subject) {
                entry.discard();
            }
            tracing::warn!(
                subject = %mask_email(subject),
                max_attempts = max_attempts,
                event = "verification_code_exhausted",
                "Verification code discarded after too many invalid attempts"
            );
            return VerifyOutcome::Exhausted;
        }

        let remaining = max_attempts - entry.failed_attempts;
        tracing::debug!(
            subject = %mask_email(subject),
            remaining = remaining,
            event = "verification_code_mismatch",
            "Invalid verification code"
        );
        VerifyOutcome::Mismatch {
            remaining: Some(remaining),
        }
    }

    /// Check a candidate code; `true` only when it matched and was consumed
    pub async fn verify(&self, subject: &str, candidate: &str) -> bool {
        self.check(subject, candidate).await.is_verified()
    }

    /// Drop any pending code for `subject`
    pub async fn invalidate(&self, subject: &str) -> bool {
        let removed = self.entries.lock().await.remove(subject);
        match removed {
            Some(entry) => {
                entry.discard();
                true
            }
            None => false,
        }
    }

    /// Whether an entry is held for `subject`, expired or not
    pub async fn contains(&self, subject: &str) -> bool {
        self.entries.lock().await.contains_key(subject)
    }

    /// Number of entries currently held
    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    /// Whether the store holds no entries
    pub async fn is_empty(&self) -> bool {
        self.entries.lock().await.is_empty()
    }
}

impl Drop for VerificationCodeStore {
    fn drop(&mut self) {
        if let Ok(mut entries) = self.entries.try_lock() {
            for (_, entry) in entries.drain() {
                entry.discard();
            }
        }
    }
}

fn spawn_eviction(
    entries: Weak<Mutex<EntryMap>>,
    subject: String,
    generation: u64,
    deadline: Instant,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        tokio::time::sleep_until(deadline).await;
        let Some(entries) = entries.upgrade() else {
            return;
        };
        let mut entries = entries.lock().await;
        let current = entries.get(&subject).map(|e| e.generation);
        if current == Some(generation) {
            entries.remove(&subject);
            tracing::debug!(
                subject = %mask_email(&subject),
                generation = generation,
                event = "verification_code_evicted",
                "Unused verification code evicted"
            );
        }
    })
}
