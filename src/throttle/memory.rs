//! In-process throttle store
//!
//! Mutex-guarded TTL map suitable for single-process hosts. Hosts with
//! multiple processes should provide a shared backend through the
//! [`ThrottleStore`](super::ThrottleStore) trait instead.

use super::ThrottleStore;
use crate::error::StoreError;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// In-memory TTL store keyed by fingerprint
///
/// Entries hold their expiry deadline; expired entries are dropped lazily on
/// access, so no sweeper task is needed.
#[derive(Debug, Default)]
pub struct MemoryThrottleStore {
    entries: Mutex<HashMap<String, Instant>>,
}

impl MemoryThrottleStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries currently held, including not-yet-pruned expired ones
    pub fn len(&self) -> usize {
        self.entries.lock().map(|e| e.len()).unwrap_or(0)
    }

    /// True if no entries are held
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop all expired entries
    pub fn purge_expired(&self) {
        if let Ok(mut entries) = self.entries.lock() {
            let now = Instant::now();
            entries.retain(|_, deadline| *deadline > now);
        }
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, Instant>>, StoreError> {
        self.entries
            .lock()
            .map_err(|_| StoreError::OperationFailed("throttle store lock poisoned".to_string()))
    }
}

impl ThrottleStore for MemoryThrottleStore {
    fn exists(&self, key: &str) -> Result<bool, StoreError> {
        let mut entries = self.lock()?;
        match entries.get(key) {
            Some(deadline) if *deadline > Instant::now() => Ok(true),
            Some(_) => {
                entries.remove(key);
                Ok(false)
            }
            None => Ok(false),
        }
    }

    fn add_if_absent(&self, key: &str, ttl: Duration) -> Result<bool, StoreError> {
        let mut entries = self.lock()?;
        let now = Instant::now();
        match entries.get(key) {
            Some(deadline) if *deadline > now => Ok(false),
            _ => {
                entries.insert(key.to_string(), now + ttl);
                Ok(true)
            }
        }
    }
}
