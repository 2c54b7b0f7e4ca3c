//! faultmail - fault email notification engine
//!
//! This library notifies a responsible team by email when a host application
//! raises exceptions or runtime-level faults, and throttles repeats of the
//! same fault inside a sliding time window.
//!
//! # Modules
//!
//! - [`config`]: Configuration system
//! - [`dispatch`]: Payload assembly and mail transport seam
//! - [`engine`]: Ordered eligibility checks
//! - [`error`]: Error types
//! - [`fault`]: Fault model, taxonomy, and fingerprinting
//! - [`notifier`]: Combined handle-one-fault entry point
//! - [`throttle`]: Fingerprint cache and throttle gate

pub mod config;
pub mod dispatch;
pub mod engine;
pub mod error;
pub mod fault;
pub mod notifier;
pub mod throttle;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

pub use config::{ConfigFile, NotifierConfig, ThrottleConfig, TypeMatcher};
pub use dispatch::{Dispatcher, MailTransport, NotificationPayload, PayloadFormat};
pub use engine::{EligibilityEngine, SkipReason, SuppressionPolicy};
pub use error::{NotifyError, Result};
pub use fault::{classify, fingerprint, Fault, FaultCategory, FaultKind};
pub use notifier::{FaultNotifier, Outcome};
pub use throttle::{MemoryThrottleStore, ThrottleGate, ThrottleStore};
