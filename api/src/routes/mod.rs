pub mod auth;
pub mod purchases;

pub use auth::AuthState;
pub use purchases::PurchaseState;
