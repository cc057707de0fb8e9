use crate::domain::entities::SubscriberSnapshot;
use crate::errors::DomainError;
use crate::repositories::subscriber::{InMemorySubscriberDirectory, SubscriberDirectory};

fn active(msisdn: &str) -> SubscriberSnapshot {
    SubscriberSnapshot {
        subscriber_id: 1,
        msisdn: msisdn.to_string(),
        status: "ACTIVE".to_string(),
        subscription_type: "PREPAID".to_string(),
        customer_id: 2,
        customer_name: "Test Customer".to_string(),
    }
}

#[tokio::test]
async fn test_lookup_returns_fresh_status() {
    let directory = InMemorySubscriberDirectory::with_subscribers([active("+40712345678")]);

    let first = directory.find_by_msisdn("+40712345678").await.unwrap().unwrap();
    assert!(first.is_active());

    assert!(directory.set_status("+40712345678", "SUSPENDED").await);
    let second = directory.find_by_msisdn("+40712345678").await.unwrap().unwrap();
    assert!(!second.is_active());

    assert_eq!(directory.lookup_count(), 2);
}

#[tokio::test]
async fn test_unknown_and_removed() {
    let directory = InMemorySubscriberDirectory::new();
    assert!(directory.find_by_msisdn("+40700000000").await.unwrap().is_none());
    assert!(!directory.set_status("+40700000000", "ACTIVE").await);

    directory.upsert(active("+40700000000")).await;
    assert!(directory.remove("+40700000000").await);
    assert!(directory.find_by_msisdn("+40700000000").await.unwrap().is_none());
}

#[tokio::test]
async fn test_unavailable_directory_errors() {
    let directory = InMemorySubscriberDirectory::with_subscribers([active("+40712345678")]);
    directory.set_unavailable(true);
    let result = directory.find_by_msisdn("+40712345678").await;
    assert!(matches!(result, Err(DomainError::ExternalService { .. })));
}
