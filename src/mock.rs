//! Mock implementations for testing
//!
//! Provides mock mail transport and throttle-store doubles for unit testing
//! without real collaborators.

use crate::dispatch::{MailTransport, NotificationPayload};
use crate::error::{StoreError, TransportError};
use crate::throttle::ThrottleStore;
use std::sync::Mutex;
use std::time::Duration;

/// Mock transport recording every payload handed to it
#[derive(Debug, Default)]
pub struct MockTransport {
    sent: Mutex<Vec<NotificationPayload>>,
    failure: Option<String>,
}

impl MockTransport {
    /// Create a transport that accepts everything
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a transport that rejects every send with the given message
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            failure: Some(message.into()),
        }
    }

    /// Payloads delivered so far
    pub fn sent(&self) -> Vec<NotificationPayload> {
        self.sent.lock().map(|s| s.clone()).unwrap_or_default()
    }

    /// Number of payloads delivered so far
    pub fn sent_count(&self) -> usize {
        self.sent.lock().map(|s| s.len()).unwrap_or(0)
    }
}

impl MailTransport for MockTransport {
    fn send(&self, payload: &NotificationPayload) -> Result<(), TransportError> {
        if let Some(message) = &self.failure {
            return Err(TransportError::SendFailed(message.clone()));
        }
        if let Ok(mut sent) = self.sent.lock() {
            sent.push(payload.clone());
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "mock"
    }
}

/// Throttle store that is always unavailable
///
/// Used to verify the engine fails open on cache outages.
#[derive(Debug, Default)]
pub struct FailingStore;

impl ThrottleStore for FailingStore {
    fn exists(&self, _key: &str) -> Result<bool, StoreError> {
        Err(StoreError::Unavailable("mock outage".to_string()))
    }

    fn add_if_absent(&self, _key: &str, _ttl: Duration) -> Result<bool, StoreError> {
        Err(StoreError::Unavailable("mock outage".to_string()))
    }
}
