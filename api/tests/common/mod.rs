//! Shared fixtures for the HTTP tests: in-memory repositories, a capturing
//! inbox and a scripted ledger wired into the real application factory.

#![allow(dead_code, unused_macros)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use actix_web::web;
use async_trait::async_trait;
use serde_json::json;

use tpcm_api::routes::{AuthState, PurchaseState};
use tpcm_core::domain::entities::SubscriberSnapshot;
use tpcm_core::repositories::{InMemoryStoreUserRepository, InMemorySubscriberDirectory};
use tpcm_core::services::auth::{AuthService, AuthServiceConfig, EmailDispatchTrait};
use tpcm_core::services::token::{TokenService, TokenServiceConfig};
use tpcm_core::services::transaction::{
    CancelAck, CommitReceipt, CoordinatorConfig, LedgerBalance, LedgerClient, LedgerError,
    PurchaseService, PurchaseServiceConfig, Reservation, ReservationRequest,
    TransactionCoordinator,
};
use tpcm_core::services::verification::{VerificationCodeStore, VerificationStoreConfig};

pub const MSISDN: &str = "+40712345678";
pub const EMAIL: &str = "ana@example.com";
pub const PASSWORD: &str = "secret123";

/// Keeps the last code sent to each address
#[derive(Default)]
pub struct Inbox {
    codes: Mutex<HashMap<String, String>>,
}

impl Inbox {
    pub fn code_for(&self, email: &str) -> String {
        self.codes
            .lock()
            .unwrap()
            .get(email)
            .cloned()
            .expect("no code sent")
    }
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
        Ok("test-message".to_string())
    }
}

/// Issues T1, T2, ... and counts every leg
#[derive(Default)]
pub struct ScriptedLedger {
    issued: AtomicUsize,
    pub commits: AtomicUsize,
    pub cancels: AtomicUsize,
    pub fail_commit: AtomicBool,
}

impl ScriptedLedger {
    pub fn commits(&self) -> usize {
        self.commits.load(Ordering::SeqCst)
    }

    pub fn cancels(&self) -> usize {
        self.cancels.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LedgerClient for ScriptedLedger {
    async fn request_transaction(
        &self,
        request: &ReservationRequest,
    ) -> Result<Reservation, LedgerError> {
        let id = format!("T{}", self.issued.fetch_add(1, Ordering::SeqCst) + 1);
        Ok(Reservation {
            payload: json!({ "transactionId": id, "msisdn": request.msisdn }),
            transaction_id: id,
        })
    }

    async fn commit_transaction(
        &self,
        transaction_id: &str,
        amount: f64,
    ) -> Result<CommitReceipt, LedgerError> {
        self.commits.fetch_add(1, Ordering::SeqCst);
        if self.fail_commit.load(Ordering::SeqCst) {
            return Err(LedgerError::Timeout("commit".to_string()));
        }
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
            payload: json!({ "status": "CANCELLED" }),
        })
    }

    async fn get_balance(&self, msisdn: &str) -> Result<LedgerBalance, LedgerError> {
        Ok(LedgerBalance {
            msisdn: msisdn.to_string(),
            available_balance: Some(20.0),
            payload: json!({ "availableBalance": 20.0 }),
        })
    }
}

pub type TestAuthState = AuthState<InMemoryStoreUserRepository, InMemorySubscriberDirectory, Inbox>;

pub struct Fixture {
    pub directory: Arc<InMemorySubscriberDirectory>,
    pub inbox: Arc<Inbox>,
    pub ledger: Arc<ScriptedLedger>,
    pub auth_state: web::Data<TestAuthState>,
    pub purchase_state: web::Data<PurchaseState<ScriptedLedger>>,
}

pub fn active_subscriber(msisdn: &str) -> SubscriberSnapshot {
    SubscriberSnapshot {
        subscriber_id: 101,
        msisdn: msisdn.to_string(),
        status: "ACTIVE".to_string(),
        subscription_type: "PREPAID".to_string(),
        customer_id: 55,
        customer_name: "Ana Popescu".to_string(),
    }
}

pub fn fixture() -> Fixture {
    let directory = Arc::new(InMemorySubscriberDirectory::with_subscribers([
        active_subscriber(MSISDN),
    ]));
    let inbox = Arc::new(Inbox::default());
    let ledger = Arc::new(ScriptedLedger::default());

    let auth_service = AuthService::new(
        Arc::new(InMemoryStoreUserRepository::new()),
        Arc::clone(&directory),
        Arc::clone(&inbox),
        Arc::new(VerificationCodeStore::new(VerificationStoreConfig::default())),
        Arc::new(TokenService::new(TokenServiceConfig {
            jwt_secret: "test-secret".to_string(),
            ..Default::default()
        })),
        AuthServiceConfig {
            bcrypt_cost: 4,
            ..Default::default()
        },
    );

    let coordinator = Arc::new(TransactionCoordinator::new(
        Arc::clone(&ledger),
        CoordinatorConfig::default(),
    ));
    let purchase_service = PurchaseService::new(coordinator, PurchaseServiceConfig::default());

    Fixture {
        directory,
        inbox,
        ledger,
        auth_state: web::Data::new(AuthState::new(Arc::new(auth_service))),
        purchase_state: web::Data::new(PurchaseState::new(Arc::new(purchase_service))),
    }
}

/// Builds the service under test from a [`Fixture`]
macro_rules! init_app {
    ($fixture:expr) => {
        actix_web::test::init_service(tpcm_api::create_app(
            $fixture.auth_state.clone(),
            $fixture.purchase_state.clone(),
            &tpcm_shared::config::CorsConfig::development(),
        ))
        .await
    };
}

/// Sends a `TestRequest` and returns the status with the JSON body
macro_rules! send {
    ($app:expr, $req:expr) => {{
        // Service errors are rendered the way the actix server renders them
        let (status, bytes) =
            match actix_web::test::try_call_service(&$app, $req.to_request()).await {
                Ok(resp) => (resp.status(), actix_web::test::read_body(resp).await),
                Err(err) => {
                    let resp = err.error_response();
                    let status = resp.status();
                    let bytes = actix_web::body::to_bytes(resp.into_body())
                        .await
                        .unwrap_or_default();
                    (status, bytes)
                }
            };
        let body: serde_json::Value = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }};
}

/// Registers, verifies and logs in the default user; evaluates to the token
macro_rules! login_verified {
    ($app:expr, $fixture:expr) => {{
        use actix_web::test::TestRequest;
        use serde_json::json;

        let (status, _) = send!(
            $app,
            TestRequest::post().uri("/api/auth/register").set_json(json!({
                "msisdn": common::MSISDN,
                "email": common::EMAIL,
                "password": common::PASSWORD,
            }))
        );
        assert_eq!(status, actix_web::http::StatusCode::CREATED);

        let code = $fixture.inbox.code_for(common::EMAIL);
        let (status, _) = send!(
            $app,
            TestRequest::post()
                .uri("/api/auth/verify-email")
                .set_json(json!({ "email": common::EMAIL, "code": code }))
        );
        assert_eq!(status, actix_web::http::StatusCode::OK);

        let (status, body) = send!(
            $app,
            TestRequest::post()
                .uri("/api/auth/login")
                .set_json(json!({ "msisdn": common::MSISDN, "password": common::PASSWORD }))
        );
        assert_eq!(status, actix_web::http::StatusCode::OK);
        body["token"].as_str().unwrap().to_string()
    }};
}
