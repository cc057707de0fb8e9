//! Unit tests for the in-memory store user repository

use crate::domain::entities::StoreUser;
use crate::errors::DomainError;
use crate::repositories::user::{InMemoryStoreUserRepository, StoreUserRepository};

fn user(msisdn: &str, email: &str) -> StoreUser {
    StoreUser::new(msisdn.to_string(), email.to_string(), "hash".to_string())
}

#[tokio::test]
async fn test_create_assigns_id_and_finds() {
    let repo = InMemoryStoreUserRepository::new();

    let created = repo.create(user("+40712345678", "a@b.com")).await.unwrap();
    assert_eq!(created.id, Some(1));

    let by_msisdn = repo.find_by_msisdn("+40712345678").await.unwrap();
    assert_eq!(by_msisdn.unwrap().email, "a@b.com");

    let by_email = repo.find_by_email("a@b.com").await.unwrap();
    assert_eq!(by_email.unwrap().msisdn, "+40712345678");
}

#[tokio::test]
async fn test_duplicate_msisdn_or_email_conflicts() {
    let repo = InMemoryStoreUserRepository::new();
    repo.create(user("+40712345678", "a@b.com")).await.unwrap();

    let same_msisdn = repo.create(user("+40712345678", "other@b.com")).await;
    assert!(matches!(same_msisdn, Err(DomainError::Conflict { .. })));

    let same_email = repo.create(user("+40799999999", "a@b.com")).await;
    assert!(matches!(same_email, Err(DomainError::Conflict { .. })));

    assert_eq!(repo.len().await, 1);
}

#[tokio::test]
async fn test_exists_by_msisdn_or_email() {
    let repo = InMemoryStoreUserRepository::new();
    repo.create(user("+40712345678", "a@b.com")).await.unwrap();

    assert!(repo.exists_by_msisdn_or_email("+40712345678", "x@y.z").await.unwrap());
    assert!(repo.exists_by_msisdn_or_email("+40700000000", "a@b.com").await.unwrap());
    assert!(!repo.exists_by_msisdn_or_email("+40700000000", "x@y.z").await.unwrap());
}

#[tokio::test]
async fn test_mark_email_verified() {
    let repo = InMemoryStoreUserRepository::new();
    repo.create(user("+40712345678", "a@b.com")).await.unwrap();

    assert!(repo.mark_email_verified("a@b.com").await.unwrap());
    assert!(repo.find_by_email("a@b.com").await.unwrap().unwrap().email_verified);

    assert!(!repo.mark_email_verified("missing@b.com").await.unwrap());
}
