use std::sync::Arc;
use std::time::Duration;

use actix_web::{web, HttpServer};
use anyhow::Context;

use tpcm_api::create_app;
use tpcm_api::routes::{AuthState, PurchaseState};
use tpcm_api::telemetry::init_tracing;
use tpcm_core::services::auth::{AuthService, AuthServiceConfig};
use tpcm_core::services::token::{TokenService, TokenServiceConfig};
use tpcm_core::services::transaction::{
    CoordinatorConfig, LedgerClient, PurchaseService, PurchaseServiceConfig,
    TransactionCoordinator,
};
use tpcm_core::services::verification::{VerificationCodeStore, VerificationStoreConfig};
use tpcm_infra::database::{ConfiguredDirectory, DatabasePool, MySqlStoreUserRepository};
use tpcm_infra::email::{create_email_service, EmailServiceAdapter};
use tpcm_infra::ledger::HttpLedgerClient;
use tpcm_shared::config::{AppConfig, Environment};

/// How often abandoned reservations are released and failed cancels retried
const MAINTENANCE_INTERVAL: Duration = Duration::from_secs(60);

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::from_filename(Environment::from_env().env_file()).ok();
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env();
    init_tracing(&config.logging);
    config
        .validate()
        .map_err(|e| anyhow::anyhow!(e))
        .context("invalid configuration")?;

    tracing::info!(
        environment = %config.environment,
        bind_address = %config.server.bind_address(),
        "Starting TPCM Store API"
    );

    let database = DatabasePool::new(&config.database)
        .await
        .context("invalid database configuration")?;
    database.ping().await.context("failed to connect to MySQL")?;
    let pool = database.pool().clone();

    let user_repository = Arc::new(MySqlStoreUserRepository::new(pool.clone()));
    let directory = Arc::new(ConfiguredDirectory::new(
        config.database.directory_backend,
        pool,
    ));
    tracing::info!(backend = directory.backend_name(), "Subscriber directory ready");

    let email_service = Arc::new(EmailServiceAdapter::new(create_email_service(&config.email)));
    tracing::info!(provider = email_service.provider_name(), "Email dispatch ready");

    let code_store = Arc::new(VerificationCodeStore::new(VerificationStoreConfig::from(
        &config.verification,
    )));
    let token_service = Arc::new(TokenService::new(TokenServiceConfig::from(&config.auth.jwt)));

    let auth_service = Arc::new(AuthService::new(
        user_repository,
        directory,
        email_service,
        code_store,
        token_service,
        AuthServiceConfig::from_shared(&config.auth, &config.verification),
    ));

    let ledger = Arc::new(
        HttpLedgerClient::new(config.ledger.clone()).context("failed to build ledger client")?,
    );
    let coordinator = Arc::new(TransactionCoordinator::new(
        ledger,
        CoordinatorConfig::from(&config.ledger),
    ));
    let purchase_service = Arc::new(PurchaseService::new(
        coordinator,
        PurchaseServiceConfig::default(),
    ));

    spawn_maintenance(Arc::clone(&purchase_service));

    let auth_state = web::Data::new(AuthState::new(auth_service));
    let purchase_state = web::Data::new(PurchaseState::new(purchase_service));
    let cors = config.cors.clone();

    let mut server = HttpServer::new(move || {
        create_app(auth_state.clone(), purchase_state.clone(), &cors)
    })
    .keep_alive(Duration::from_secs(config.server.keep_alive));
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server
        .bind(config.server.bind_address())
        .with_context(|| format!("failed to bind {}", config.server.bind_address()))?
        .run()
        .await?;

    database.close().await;
    tracing::info!("Server stopped");
    Ok(())
}

/// Periodic sweep of the purchase registry and the compensation outbox
fn spawn_maintenance<L: LedgerClient + 'static>(purchase_service: Arc<PurchaseService<L>>) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(MAINTENANCE_INTERVAL);
        interval.tick().await;
        loop {
            interval.tick().await;

            purchase_service.sweep().await;

            let resolved = purchase_service.retry_pending_cancellations().await;
            if resolved > 0 {
                tracing::info!(
                    resolved,
                    event = "pending_cancellations_retried",
                    "Pending cancellations resolved"
                );
            }
        }
    });
}
