pub mod auth;
pub mod purchase;

pub use auth::*;
pub use purchase::*;
