//! Database module - MySQL implementations using SQLx
//!
//! This module provides:
//! - Connection pool management
//! - The store-user repository
//! - The subscriber directory over the Subscriber/Customer tables
//! - Backend selection between that directory and an in-memory one

pub mod connection;
pub mod directory;
pub mod mysql;

// Re-export commonly used types
pub use connection::DatabasePool;
pub use directory::ConfiguredDirectory;
pub use mysql::{MySqlStoreUserRepository, MySqlSubscriberDirectory};
