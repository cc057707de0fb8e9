//! Business services containing domain logic and use cases.

pub mod auth;
pub mod token;
pub mod transaction;
pub mod verification;

pub use auth::{AuthService, AuthServiceConfig, EmailDispatchTrait, PasswordHasher};
pub use token::{TokenService, TokenServiceConfig};
pub use transaction::{
    CancelAck, CancelOutcome, CancelStatus, CommitReceipt, CoordinatorConfig, LedgerBalance,
    LedgerClient, LedgerError, PendingCancellation, PurchaseReceipt, PurchaseService,
    PurchaseServiceConfig, Reservation, ReservationRequest, SweepReport, TransactionCoordinator,
};
pub use verification::{VerificationCodeStore, VerificationStoreConfig, VerifyOutcome};
