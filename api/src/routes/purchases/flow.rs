//! Request, commit and cancel legs of a purchase

use actix_web::{web, HttpResponse};
use validator::Validate;

use tpcm_core::services::transaction::LedgerClient;
use tpcm_shared::utils::msisdn::mask_msisdn;

use super::PurchaseState;
use crate::dto::{
    CancelRequest, CancelResponse, CommitRequest, PurchaseRequest, ReceiptResponse,
    TransactionResponse,
};
use crate::handlers::{validation_error, ApiError};
use crate::middleware::AuthContext;

/// Handler for POST /api/purchases
///
/// Reserves and commits in one call. If the client disconnects before the
/// answer, the reservation is released instead of committed.
///
/// # Request Body
///
/// ```json
/// { "amount": 9.99, "thirdPartyId": 1 }
/// ```
pub async fn purchase<L: LedgerClient + 'static>(
    auth: AuthContext,
    state: web::Data<PurchaseState<L>>,
    request: web::Json<PurchaseRequest>,
) -> Result<HttpResponse, ApiError> {
    request.validate().map_err(|e| validation_error(&e))?;

    tracing::info!(
        msisdn = %mask_msisdn(auth.msisdn()),
        amount = request.amount,
        "Purchase request"
    );

    let purchase = state
        .purchase_service
        .purchase(auth.msisdn(), request.amount, request.third_party_id)
        .await?;

    Ok(HttpResponse::Ok().json(ReceiptResponse::from(purchase)))
}

/// Handler for POST /api/purchases/request
pub async fn request_transaction<L: LedgerClient + 'static>(
    auth: AuthContext,
    state: web::Data<PurchaseState<L>>,
    request: web::Json<PurchaseRequest>,
) -> Result<HttpResponse, ApiError> {
    request.validate().map_err(|e| validation_error(&e))?;

    let transaction = state
        .purchase_service
        .request(auth.msisdn(), request.amount, request.third_party_id)
        .await?;

    Ok(HttpResponse::Ok().json(TransactionResponse::from(transaction)))
}

/// Handler for POST /api/purchases/commit
///
/// `409` when the attempt was cancelled in the meantime; the reservation is
/// released in that case.
pub async fn commit_transaction<L: LedgerClient + 'static>(
    auth: AuthContext,
    state: web::Data<PurchaseState<L>>,
    request: web::Json<CommitRequest>,
) -> Result<HttpResponse, ApiError> {
    request.validate().map_err(|e| validation_error(&e))?;

    let (transaction, receipt) = state
        .purchase_service
        .commit(auth.msisdn(), &request.transaction_id, request.amount)
        .await?;

    Ok(HttpResponse::Ok().json(ReceiptResponse::new(transaction, receipt)))
}

/// Handler for POST /api/purchases/cancel
///
/// `200` once the reservation is released or was already final. `202` when
/// a step or a sweep holds the attempt: the cancellation is recorded and
/// takes effect at the next step boundary, and the reported state may
/// already be stale.
pub async fn cancel_transaction<L: LedgerClient + 'static>(
    auth: AuthContext,
    state: web::Data<PurchaseState<L>>,
    request: web::Json<CancelRequest>,
) -> Result<HttpResponse, ApiError> {
    request.validate().map_err(|e| validation_error(&e))?;

    let outcome = state
        .purchase_service
        .cancel(auth.msisdn(), &request.transaction_id)
        .await?;

    let mut response = if outcome.is_pending() {
        HttpResponse::Accepted()
    } else {
        HttpResponse::Ok()
    };
    Ok(response.json(CancelResponse::from(outcome)))
}
