//! Domain entities representing core business objects.

pub mod session;
pub mod store_user;
pub mod subscriber;
pub mod transaction;
pub mod verification_code;

pub use session::{SessionClaims, JWT_ISSUER, SESSION_EXPIRY_HOURS};
pub use store_user::StoreUser;
pub use subscriber::{SubscriberSnapshot, ACTIVE_STATUS};
pub use transaction::{Transaction, TransactionState};
pub use verification_code::{
    VerificationCode, CODE_LENGTH, CODE_MAX, CODE_MIN, DEFAULT_EVICTION_MINUTES,
    DEFAULT_EXPIRATION_MINUTES,
};
