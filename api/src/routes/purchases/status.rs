use actix_web::{web, HttpResponse};

use tpcm_core::services::transaction::LedgerClient;

use super::PurchaseState;
use crate::dto::TransactionResponse;
use crate::handlers::ApiError;
use crate::middleware::AuthContext;

/// Handler for GET /api/purchases/balance
///
/// Informational only; purchases never check it first.
pub async fn balance<L: LedgerClient + 'static>(
    auth: AuthContext,
    state: web::Data<PurchaseState<L>>,
) -> Result<HttpResponse, ApiError> {
    let balance = state.purchase_service.balance(auth.msisdn()).await?;
    Ok(HttpResponse::Ok().json(balance))
}

/// Handler for GET /api/purchases/{transaction_id}
pub async fn get_transaction<L: LedgerClient + 'static>(
    auth: AuthContext,
    state: web::Data<PurchaseState<L>>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let transaction = state
        .purchase_service
        .get(auth.msisdn(), &path.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(TransactionResponse::from(transaction)))
}
