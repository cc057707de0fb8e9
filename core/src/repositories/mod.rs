pub mod subscriber;
pub mod user;

pub use subscriber::{InMemorySubscriberDirectory, SubscriberDirectory};
pub use user::{InMemoryStoreUserRepository, StoreUserRepository};
