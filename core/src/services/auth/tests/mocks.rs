//! Mock implementations for testing authentication service

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::domain::entities::SubscriberSnapshot;
use crate::services::auth::EmailDispatchTrait;

/// Email dispatcher that records the last code sent to each address
pub struct MockEmailService {
    pub sent: Arc<Mutex<HashMap<String, String>>>,
    pub send_count: AtomicUsize,
    pub should_fail: AtomicBool,
}

impl MockEmailService {
    pub fn new() -> Self {
        Self {
            sent: Arc::new(Mutex::new(HashMap::new())),
            send_count: AtomicUsize::new(0),
            should_fail: AtomicBool::new(false),
        }
    }

    pub fn failing() -> Self {
        let service = Self::new();
        service.should_fail.store(true, Ordering::SeqCst);
        service
    }

    pub fn last_code(&self, email: &str) -> Option<String> {
        self.sent.lock().unwrap().get(email).cloned()
    }

    pub fn count(&self) -> usize {
        self.send_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl EmailDispatchTrait for MockEmailService {
    async fn send_verification_code(
        &self,
        email: &str,
        code: &str,
        _ttl_minutes: u64,
    ) -> Result<String, String> {
        self.send_count.fetch_add(1, Ordering::SeqCst);
        if self.should_fail.load(Ordering::SeqCst) {
            return Err("mock email failure".to_string());
        }
        self.sent
            .lock()
            .unwrap()
            .insert(email.to_string(), code.to_string());
        Ok(format!("mock-email-{}", self.count()))
    }
}

pub fn active_subscriber(msisdn: &str) -> SubscriberSnapshot {
    SubscriberSnapshot {
        subscriber_id: 101,
        msisdn: msisdn.to_string(),
        status: "ACTIVE".to_string(),
        subscription_type: "PREPAID".to_string(),
        customer_id: 55,
        customer_name: "Ana Popescu".to_string(),
    }
}
