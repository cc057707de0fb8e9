//! Integration test: registration through purchase using the public core API

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::json;

use tpcm_core::domain::entities::{SubscriberSnapshot, TransactionState};
use tpcm_core::errors::{AuthError, DomainError};
use tpcm_core::repositories::{InMemoryStoreUserRepository, InMemorySubscriberDirectory};
use tpcm_core::services::auth::{AuthService, AuthServiceConfig, EmailDispatchTrait};
use tpcm_core::services::token::{TokenService, TokenServiceConfig};
use tpcm_core::services::transaction::{
    CancelAck, CommitReceipt, CoordinatorConfig, LedgerBalance, LedgerClient, LedgerError,
    PurchaseService, PurchaseServiceConfig, Reservation, ReservationRequest,
    TransactionCoordinator,
};
use tpcm_core::services::verification::{VerificationCodeStore, VerificationStoreConfig};

#[derive(Default)]
struct Inbox {
    codes: Mutex<HashMap<String, String>>,
}

#[async_trait]
impl EmailDispatchTrait for Inbox {
    async fn send_verification_code(
        &self,
        email: &str,
        code: &str,
        _ttl_minutes: u64,
    ) -> Result<String, String> {
        self.codes
            .lock()
            .unwrap()
            .insert(email.to_string(), code.to_string());
        Ok("queued".to_string())
    }
}

#[derive(Default)]
struct Ledger {
    issued: AtomicUsize,
    cancels: AtomicUsize,
}

#[async_trait]
impl LedgerClient for Ledger {
    async fn request_transaction(
        &self,
        _request: &ReservationRequest,
    ) -> Result<Reservation, LedgerError> {
        let id = format!("T{}", self.issued.fetch_add(1, Ordering::SeqCst) + 1);
        Ok(Reservation {
            payload: json!({ "transactionId": id }),
            transaction_id: id,
        })
    }

    async fn commit_transaction(
        &self,
        transaction_id: &str,
        amount: f64,
    ) -> Result<CommitReceipt, LedgerError> {
        Ok(CommitReceipt {
            transaction_id: transaction_id.to_string(),
            amount,
            payload: json!({ "status": "COMMITTED" }),
        })
    }

    async fn cancel_transaction(&self, transaction_id: &str) -> Result<CancelAck, LedgerError> {
        self.cancels.fetch_add(1, Ordering::SeqCst);
        Ok(CancelAck {
            transaction_id: transaction_id.to_string(),
            payload: json!({}),
        })
    }

    async fn get_balance(&self, msisdn: &str) -> Result<LedgerBalance, LedgerError> {
        Ok(LedgerBalance {
            msisdn: msisdn.to_string(),
            available_balance: Some(100.0),
            payload: json!({ "availableBalance": 100.0 }),
        })
    }
}

#[tokio::test]
async fn test_register_verify_login_purchase() {
    let msisdn = "+40712345678";
    let email = "a@b.com";

    let directory = Arc::new(InMemorySubscriberDirectory::with_subscribers([
        SubscriberSnapshot {
            subscriber_id: 7,
            msisdn: msisdn.to_string(),
            status: "ACTIVE".to_string(),
            subscription_type: "POSTPAID".to_string(),
            customer_id: 3,
            customer_name: "Ion Ionescu".to_string(),
        },
    ]));
    let inbox = Arc::new(Inbox::default());
    let auth = AuthService::new(
        Arc::new(InMemoryStoreUserRepository::new()),
        directory,
        inbox.clone(),
        Arc::new(VerificationCodeStore::new(VerificationStoreConfig::default())),
        Arc::new(TokenService::new(TokenServiceConfig::default())),
        AuthServiceConfig {
            bcrypt_cost: 4,
            ..Default::default()
        },
    );

    let registered = auth.register(msisdn, email, "password1").await.unwrap();
    assert!(!registered.user.email_verified);

    let err = auth.login(msisdn, "password1").await.unwrap_err();
    assert!(matches!(err, DomainError::Auth(AuthError::EmailNotVerified)));

    let code = inbox.codes.lock().unwrap().get(email).cloned().unwrap();
    auth.verify_email(email, &code).await.unwrap();

    let login = auth.login(msisdn, "password1").await.unwrap();
    assert_eq!(login.user.subscriber_id, 7);
    assert_eq!(login.user.customer_name, "Ion Ionescu");

    let session = auth.verify_session(&login.token).await.unwrap();
    assert_eq!(session.msisdn, msisdn);

    let ledger = Arc::new(Ledger::default());
    let purchases = PurchaseService::new(
        Arc::new(TransactionCoordinator::new(
            ledger.clone(),
            CoordinatorConfig::default(),
        )),
        PurchaseServiceConfig::default(),
    );

    let tx = purchases.request(&session.msisdn, 9.99, 1).await.unwrap();
    assert_eq!(tx.transaction_id, "T1");

    let (tx, receipt) = purchases.commit(&session.msisdn, "T1", 9.99).await.unwrap();
    assert_eq!(tx.state, TransactionState::Committed);
    assert_eq!(receipt.transaction_id, "T1");
    assert_eq!(ledger.cancels.load(Ordering::SeqCst), 0);
}
