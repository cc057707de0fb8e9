//! Balance ledger client
//!
//! HTTP implementation of the core [`LedgerClient`] trait against the TPCM
//! application API (`/transactions/flow/*`, HTTP basic auth).
//!
//! [`LedgerClient`]: tpcm_core::services::transaction::LedgerClient

pub mod http_client;

pub use http_client::HttpLedgerClient;
