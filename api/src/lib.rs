//! # TPCM Store API
//!
//! actix-web presentation layer: request DTOs, route handlers, session
//! middleware and the mapping from domain errors to HTTP responses.

pub mod app;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod telemetry;

pub use app::create_app;
