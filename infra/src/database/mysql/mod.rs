//! MySQL-specific database implementations
//!
//! This module contains MySQL implementations of the core repository traits
//! using SQLx for database operations.

pub mod store_user_repository_impl;
pub mod subscriber_directory_impl;

// Re-export the MySQL implementations
pub use store_user_repository_impl::MySqlStoreUserRepository;
pub use subscriber_directory_impl::MySqlSubscriberDirectory;
