//! Throttling
//!
//! Time-windowed dedup of repeated faults. The store is an abstraction over
//! a TTL-keyed cache backend; the gate applies the ordered throttle-exemption
//! logic and fails open when the backend is unavailable.

mod memory;

pub use memory::MemoryThrottleStore;

use crate::config::{in_deny_list, ThrottleConfig};
use crate::error::StoreError;
use crate::fault::{fingerprint, Fault};
use std::sync::Arc;
use std::time::Duration;

/// TTL-keyed cache backend consumed by the throttle gate
///
/// `add_if_absent` must be atomic at the store level so concurrent
/// invocations racing on the same fingerprint elect at most one "first
/// occurrence" winner per window. A store without that guarantee degrades to
/// at-least-one extra notification under race, never unbounded.
pub trait ThrottleStore: Send + Sync {
    /// True if a live (unexpired) entry is present
    fn exists(&self, key: &str) -> Result<bool, StoreError>;

    /// Atomically create the entry only if absent; returns true if created
    fn add_if_absent(&self, key: &str, ttl: Duration) -> Result<bool, StoreError>;
}

/// Stateful throttle check over a fingerprint cache
///
/// Identical faults pass at most once per window, the window sliding from
/// first-occurrence time. Store outages count as "not throttled": a transient
/// cache failure must never silently suppress all notifications.
pub struct ThrottleGate {
    config: ThrottleConfig,
    store: Arc<dyn ThrottleStore>,
}

impl ThrottleGate {
    /// Create a gate over the given store
    pub fn new(config: ThrottleConfig, store: Arc<dyn ThrottleStore>) -> Self {
        Self { config, store }
    }

    /// Decide whether this fault should be suppressed as a repeat
    ///
    /// `exempt` carries the caller-supplied throttle-exemption verdict and is
    /// checked after the configured skip list, before touching the store.
    pub fn should_throttle(&self, fault: &Fault, exempt: bool) -> bool {
        if !self.config.enabled {
            return false;
        }
        if in_deny_list(&self.config.skip, &fault.type_name) {
            return false;
        }
        if exempt {
            return false;
        }

        let key = fingerprint(fault);
        match self.store.exists(&key) {
            Ok(true) => return true,
            Ok(false) => {}
            // Fail open; a best-effort registration below may still succeed.
            Err(e) => log::warn!("Throttle store read failed, not throttling: {}", e),
        }
        // First occurrence within the window; register it and let it through.
        if let Err(e) = self.store.add_if_absent(&key, self.config.window) {
            log::warn!("Throttle store write failed for {}: {}", key, e);
        }
        false
    }

    /// The configured dedup window
    pub fn window(&self) -> Duration {
        self.config.window
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TypeMatcher;
    use crate::mock::FailingStore;

    fn gate(enabled: bool, skip: Vec<TypeMatcher>) -> ThrottleGate {
        let config = ThrottleConfig {
            enabled,
            window: Duration::from_secs(300),
            skip,
        };
        ThrottleGate::new(config, Arc::new(MemoryThrottleStore::new()))
    }

    #[test]
    fn test_disabled_gate_never_throttles() {
        let gate = gate(false, Vec::new());
        let fault = Fault::exception("App\\Boom", "x");
        assert!(!gate.should_throttle(&fault, false));
        assert!(!gate.should_throttle(&fault, false));
    }

    #[test]
    fn test_first_passes_repeat_throttled() {
        let gate = gate(true, Vec::new());
        let fault = Fault::exception("App\\Boom", "x");
        assert!(!gate.should_throttle(&fault, false));
        assert!(gate.should_throttle(&fault, false));
    }

    #[test]
    fn test_distinct_faults_not_throttled() {
        let gate = gate(true, Vec::new());
        assert!(!gate.should_throttle(&Fault::exception("App\\Boom", "x"), false));
        assert!(!gate.should_throttle(&Fault::exception("App\\Boom", "y"), false));
    }

    #[test]
    fn test_skip_list_exempts_type() {
        let gate = gate(true, vec![TypeMatcher::parse("App\\Fulfillment\\*")]);
        let fault = Fault::exception("App\\Fulfillment\\Timeout", "slow");
        assert!(!gate.should_throttle(&fault, false));
        assert!(!gate.should_throttle(&fault, false));
    }

    #[test]
    fn test_exempt_flag_bypasses_store() {
        let gate = gate(true, Vec::new());
        let fault = Fault::exception("App\\Boom", "x");
        assert!(!gate.should_throttle(&fault, true));
        // Exempt calls never registered the fingerprint, so a later
        // non-exempt call is still a first occurrence.
        assert!(!gate.should_throttle(&fault, false));
        assert!(gate.should_throttle(&fault, false));
    }

    #[test]
    fn test_fails_open_on_store_error() {
        let config = ThrottleConfig {
            enabled: true,
            window: Duration::from_secs(300),
            skip: Vec::new(),
        };
        let gate = ThrottleGate::new(config, Arc::new(FailingStore));
        let fault = Fault::exception("App\\Boom", "x");
        assert!(!gate.should_throttle(&fault, false));
        assert!(!gate.should_throttle(&fault, false));
    }
}
