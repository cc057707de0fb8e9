//! CORS configuration for the storefront web client.

use actix_cors::Cors;
use actix_web::http::{header, Method};

use tpcm_shared::config::CorsConfig;

/// Builds the CORS middleware from configuration
///
/// A `*` entry opens the API to any origin, which is what the development
/// defaults do. Otherwise only the listed origins are allowed.
pub fn create_cors(config: &CorsConfig) -> Cors {
    let mut cors = Cors::default()
        .allowed_methods(vec![Method::GET, Method::POST, Method::OPTIONS])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::CONTENT_TYPE,
            header::ORIGIN,
        ])
        .max_age(config.max_age);

    if config.allows_any_origin() {
        tracing::info!("Configuring permissive CORS");
        cors = cors.allow_any_origin();
    } else {
        for origin in &config.allowed_origins {
            tracing::info!(origin = %origin, "Adding allowed origin");
            cors = cors.allowed_origin(origin);
        }
    }

    if config.allow_credentials {
        cors = cors.supports_credentials();
    }

    cors
}
