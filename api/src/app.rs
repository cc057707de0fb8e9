//! Application factory
//!
//! Builds the actix-web application from already-constructed services so the
//! binary and the HTTP tests share the same routing.

use std::sync::Arc;

use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    web, App,
};
use tracing_actix_web::TracingLogger;

use tpcm_core::errors::DomainError;
use tpcm_core::repositories::{StoreUserRepository, SubscriberDirectory};
use tpcm_core::services::auth::EmailDispatchTrait;
use tpcm_core::services::transaction::LedgerClient;
use tpcm_shared::config::CorsConfig;

use crate::handlers::health::{api_info, health_check, not_found};
use crate::handlers::ApiError;
use crate::middleware::{create_cors, SessionAuth, SessionVerifier};
use crate::routes::auth::{login, register, session, verify_email};
use crate::routes::purchases::{flow, status};
use crate::routes::{AuthState, PurchaseState};

/// Create and configure the application with all dependencies
pub fn create_app<U, D, E, L>(
    auth_state: web::Data<AuthState<U, D, E>>,
    purchase_state: web::Data<PurchaseState<L>>,
    cors: &CorsConfig,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
>
where
    U: StoreUserRepository + 'static,
    D: SubscriberDirectory + 'static,
    E: EmailDispatchTrait + 'static,
    L: LedgerClient + 'static,
{
    let verifier: Arc<dyn SessionVerifier> = auth_state.auth_service.clone();

    App::new()
        .app_data(auth_state)
        .app_data(purchase_state)
        .app_data(json_config())
        .wrap(create_cors(cors))
        .wrap(TracingLogger::default())
        .route("/health", web::get().to(health_check))
        .service(
            web::scope("/api")
                .route("", web::get().to(api_info))
                .service(
                    web::scope("/auth")
                        .route("/register", web::post().to(register::register::<U, D, E>))
                        .route(
                            "/verify-email",
                            web::post().to(verify_email::verify_email::<U, D, E>),
                        )
                        .route("/login", web::post().to(login::login::<U, D, E>))
                        .route(
                            "/resend-code",
                            web::post().to(verify_email::resend_code::<U, D, E>),
                        )
                        .route("/verify", web::get().to(session::verify_session::<U, D, E>)),
                )
                .service(
                    web::scope("/purchases")
                        .wrap(SessionAuth::new(verifier))
                        .route("", web::post().to(flow::purchase::<L>))
                        .route("/request", web::post().to(flow::request_transaction::<L>))
                        .route("/commit", web::post().to(flow::commit_transaction::<L>))
                        .route("/cancel", web::post().to(flow::cancel_transaction::<L>))
                        .route("/balance", web::get().to(status::balance::<L>))
                        .route(
                            "/{transaction_id}",
                            web::get().to(status::get_transaction::<L>),
                        ),
                ),
        )
        .default_service(web::route().to(not_found))
}

/// Malformed JSON bodies get the same error shape as everything else
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        ApiError(DomainError::Validation {
            message: format!("Invalid request body: {}", err),
        })
        .into()
    })
}
