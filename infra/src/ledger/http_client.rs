//! reqwest-based balance ledger client

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::Serialize;
use serde_json::{json, Value};

use tpcm_core::services::transaction::{
    CancelAck, CommitReceipt, LedgerBalance, LedgerClient, LedgerError, Reservation,
    ReservationRequest,
};
use tpcm_shared::utils::msisdn::mask_msisdn;
use tpcm_shared::LedgerConfig;

use crate::InfrastructureError;

const REQUEST_PATH: &str = "transactions/flow/request";
const COMMIT_PATH: &str = "transactions/flow/commit";
const CANCEL_PATH: &str = "transactions/flow/cancel";
const BALANCE_PATH: &str = "transactions/flow/balance";

/// Ledger client over HTTP
///
/// Timeouts are enforced here; a request that times out is reported as
/// [`LedgerError::Timeout`] and is not retried.
pub struct HttpLedgerClient {
    client: Client,
    config: LedgerConfig,
}

impl HttpLedgerClient {
    /// Create a new client
    pub fn new(config: LedgerConfig) -> Result<Self, InfrastructureError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        tracing::info!(
            base_url = %config.base_url,
            timeout_seconds = config.timeout_seconds,
            "Ledger client initialized"
        );

        Ok(Self { client, config })
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        builder.basic_auth(&self.config.username, Some(&self.config.password))
    }

    async fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Value, LedgerError> {
        let url = self.config.endpoint(path);
        let response = self
            .authorized(self.client.post(&url))
            .json(body)
            .send()
            .await
            .map_err(send_error)?;
        read_response(response).await
    }

    async fn get(&self, path: &str) -> Result<Value, LedgerError> {
        let url = self.config.endpoint(path);
        let response = self
            .authorized(self.client.get(&url))
            .send()
            .await
            .map_err(send_error)?;
        read_response(response).await
    }
}

fn send_error(e: reqwest::Error) -> LedgerError {
    if e.is_timeout() {
        LedgerError::Timeout(e.to_string())
    } else {
        LedgerError::Unreachable(e.to_string())
    }
}

async fn read_response(response: reqwest::Response) -> Result<Value, LedgerError> {
    let status = response.status();
    let body = response.text().await.map_err(send_error)?;

    if !status.is_success() {
        return Err(LedgerError::Rejected {
            status: status.as_u16(),
            message: rejection_message(status, &body),
        });
    }

    if body.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(&body).map_err(|e| LedgerError::InvalidResponse(e.to_string()))
}

/// Prefer the ledger's own message field over the raw body
fn rejection_message(status: StatusCode, body: &str) -> String {
    let parsed: Option<Value> = serde_json::from_str(body).ok();
    parsed
        .as_ref()
        .and_then(|v| v.get("message").or_else(|| v.get("error")))
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| {
            if body.trim().is_empty() {
                status.canonical_reason().unwrap_or("error").to_string()
            } else {
                body.trim().to_string()
            }
        })
}

/// The ledger reports transaction ids as strings or numbers
fn transaction_id(payload: &Value) -> Option<String> {
    match payload.get("transactionId")? {
        Value::String(id) if !id.is_empty() => Some(id.clone()),
        Value::Number(id) => Some(id.to_string()),
        _ => None,
    }
}

#[async_trait]
impl LedgerClient for HttpLedgerClient {
    async fn request_transaction(
        &self,
        request: &ReservationRequest,
    ) -> Result<Reservation, LedgerError> {
        let payload = self.post(REQUEST_PATH, request).await?;

        let transaction_id = transaction_id(&payload).ok_or_else(|| {
            LedgerError::InvalidResponse("missing transactionId".to_string())
        })?;

        tracing::debug!(
            transaction_id = %transaction_id,
            msisdn = %mask_msisdn(&request.msisdn),
            "Ledger reservation accepted"
        );
        Ok(Reservation {
            transaction_id,
            payload,
        })
    }

    async fn commit_transaction(
        &self,
        transaction_id: &str,
        amount: f64,
    ) -> Result<CommitReceipt, LedgerError> {
        let body = json!({ "transactionId": transaction_id, "amount": amount });
        let payload = self.post(COMMIT_PATH, &body).await?;
        Ok(CommitReceipt {
            transaction_id: transaction_id.to_string(),
            amount,
            payload,
        })
    }

    async fn cancel_transaction(&self, transaction_id: &str) -> Result<CancelAck, LedgerError> {
        let body = json!({ "transactionId": transaction_id });
        let payload = self.post(CANCEL_PATH, &body).await?;
        Ok(CancelAck {
            transaction_id: transaction_id.to_string(),
            payload,
        })
    }

    async fn get_balance(&self, msisdn: &str) -> Result<LedgerBalance, LedgerError> {
        let payload = self.get(&format!("{}/{}", BALANCE_PATH, msisdn)).await?;
        let available_balance = payload.get("availableBalance").and_then(Value::as_f64);
        Ok(LedgerBalance {
            msisdn: msisdn.to_string(),
            available_balance,
            payload,
        })
    }
}
