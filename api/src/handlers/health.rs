//! Health check and API index

use actix_web::HttpResponse;
use serde_json::json;

use tpcm_shared::types::HealthResponse;

pub const SERVICE_NAME: &str = "tpcm-store-api";

/// GET /health
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse::healthy(SERVICE_NAME, env!("CARGO_PKG_VERSION")))
}

/// GET /api
pub async fn api_info() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "message": "TPCM Store API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "health": "/health",
            "auth": {
                "register": { "path": "/api/auth/register", "method": "POST" },
                "verify_email": { "path": "/api/auth/verify-email", "method": "POST" },
                "login": { "path": "/api/auth/login", "method": "POST" },
                "resend_code": { "path": "/api/auth/resend-code", "method": "POST" },
                "verify": {
                    "path": "/api/auth/verify",
                    "method": "GET",
                    "auth": "Bearer token"
                }
            },
            "purchases": {
                "purchase": { "path": "/api/purchases", "method": "POST" },
                "request": { "path": "/api/purchases/request", "method": "POST" },
                "commit": { "path": "/api/purchases/commit", "method": "POST" },
                "cancel": { "path": "/api/purchases/cancel", "method": "POST" },
                "balance": { "path": "/api/purchases/balance", "method": "GET" },
                "status": { "path": "/api/purchases/{transactionId}", "method": "GET" },
                "auth": "Bearer token"
            }
        }
    }))
}

/// Fallback for unmatched routes
pub async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(tpcm_shared::errors::ErrorResponse::new(
        tpcm_shared::errors::error_codes::NOT_FOUND,
        "The requested resource was not found",
    ))
}
