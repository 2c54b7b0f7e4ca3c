//! Eligibility engine
//!
//! Orchestrates the ordered sequence of skip checks deciding whether a fault
//! should be notified: global toggle, category allow-list, the internal
//! misconfiguration guard, type deny-lists, the caller-supplied policy, and
//! finally the throttle gate. The first matching check wins; the ordering is
//! observable through [`SkipReason`] and pinned by tests.

use crate::config::{in_deny_list, NotifierConfig};
use crate::fault::{classify, Fault, FaultKind};
use crate::throttle::{ThrottleGate, ThrottleStore};
use std::fmt;
use std::sync::Arc;

/// Why a fault was not notified
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Emailing is globally disabled
    EmailDisabled,
    /// The fault's category is not in the allow-list
    CategoryNotEnabled,
    /// The engine's own misconfiguration signal; always self-suppressed so
    /// the engine never emails about its own configuration in a loop
    ConfigurationFault,
    /// The fault's type matches a skip-email or skip-log entry
    TypeDenied,
    /// The caller-supplied policy suppressed it
    PolicyDenied,
    /// A repeat within the throttle window
    Throttled,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmailDisabled => write!(f, "email disabled"),
            Self::CategoryNotEnabled => write!(f, "category not enabled"),
            Self::ConfigurationFault => write!(f, "internal configuration fault"),
            Self::TypeDenied => write!(f, "type in deny list"),
            Self::PolicyDenied => write!(f, "suppressed by policy"),
            Self::Throttled => write!(f, "throttled"),
        }
    }
}

/// Caller-supplied suppression hooks
///
/// Both hooks default to "do not suppress". Implement this when skipping
/// requires more than a type-name match.
pub trait SuppressionPolicy: Send + Sync {
    /// Extra suppression check, evaluated after the deny-lists
    fn skip_email(&self, _fault: &Fault) -> bool {
        false
    }

    /// Extra throttle exemption, evaluated before the fingerprint cache
    fn skip_throttle(&self, _fault: &Fault) -> bool {
        false
    }
}

/// The default policy: suppresses nothing
pub struct DefaultPolicy;

impl SuppressionPolicy for DefaultPolicy {}

/// Ordered skip-check chain over one configuration snapshot
pub struct EligibilityEngine {
    config: NotifierConfig,
    gate: ThrottleGate,
    policy: Box<dyn SuppressionPolicy>,
}

impl EligibilityEngine {
    /// Create an engine with the default (non-suppressing) policy
    pub fn new(config: NotifierConfig, store: Arc<dyn ThrottleStore>) -> Self {
        let gate = ThrottleGate::new(config.throttle.clone(), store);
        Self {
            config,
            gate,
            policy: Box::new(DefaultPolicy),
        }
    }

    /// Replace the suppression policy
    pub fn with_policy(mut self, policy: Box<dyn SuppressionPolicy>) -> Self {
        self.policy = policy;
        self
    }

    /// The configuration snapshot this engine was built from
    pub fn config(&self) -> &NotifierConfig {
        &self.config
    }

    /// Run the skip chain; `None` means the fault is eligible
    ///
    /// Throttling is stateful: an eligible first occurrence registers its
    /// fingerprint, so calling this twice for the same fault consumes the
    /// window slot.
    pub fn check(&self, fault: &Fault) -> Option<SkipReason> {
        if !self.config.email_enabled {
            return Some(SkipReason::EmailDisabled);
        }
        if !self.config.category_enabled(classify(fault)) {
            return Some(SkipReason::CategoryNotEnabled);
        }
        if fault.kind == FaultKind::ConfigurationError {
            return Some(SkipReason::ConfigurationFault);
        }
        // Whatever the host refuses to log it must also refuse to email.
        if in_deny_list(&self.config.skip_log, &fault.type_name)
            || in_deny_list(&self.config.skip_email, &fault.type_name)
        {
            return Some(SkipReason::TypeDenied);
        }
        if self.policy.skip_email(fault) {
            return Some(SkipReason::PolicyDenied);
        }
        if self
            .gate
            .should_throttle(fault, self.policy.skip_throttle(fault))
        {
            return Some(SkipReason::Throttled);
        }
        None
    }

    /// True if none of the skip checks suppressed the fault
    pub fn should_notify(&self, fault: &Fault) -> bool {
        self.check(fault).is_none()
    }
}
