//! Fault notifier facade
//!
//! Combined entry point the host's interception hooks call once per fault:
//! runs the eligibility chain and, when the fault passes, dispatches the
//! notification. Designed to be safe to call from inside an error handler:
//! it never panics and never propagates collaborator errors back into the
//! host's fault-handling path.

use crate::config::NotifierConfig;
use crate::dispatch::{Dispatcher, MailTransport};
use crate::engine::{EligibilityEngine, SkipReason, SuppressionPolicy};
use crate::fault::Fault;
use crate::throttle::ThrottleStore;
use std::sync::Arc;

/// Result of handling one fault
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The notification was handed to the transport successfully
    Sent,
    /// A skip check suppressed the fault
    Suppressed(SkipReason),
    /// The fault was eligible but the transport failed; logged, not retried
    Failed,
}

impl Outcome {
    /// True if a notification went out
    pub fn is_sent(&self) -> bool {
        matches!(self, Self::Sent)
    }
}

/// Combined eligibility + dispatch pipeline over one configuration snapshot
pub struct FaultNotifier {
    engine: EligibilityEngine,
    dispatcher: Dispatcher,
}

impl FaultNotifier {
    /// Create a notifier from a configuration snapshot and collaborators
    pub fn new(
        config: NotifierConfig,
        store: Arc<dyn ThrottleStore>,
        transport: Box<dyn MailTransport>,
    ) -> Self {
        let engine = EligibilityEngine::new(config.clone(), store);
        let dispatcher = Dispatcher::new(config, transport);
        Self { engine, dispatcher }
    }

    /// Replace the suppression policy
    pub fn with_policy(mut self, policy: Box<dyn SuppressionPolicy>) -> Self {
        self.engine = self.engine.with_policy(policy);
        self
    }

    /// Run the full pipeline for one intercepted fault
    ///
    /// The outcome is informational; callers log it but must not alter their
    /// own fault handling based on it.
    pub fn handle(&self, fault: &Fault) -> Outcome {
        match self.engine.check(fault) {
            Some(reason) => {
                log::debug!("Skipping notification for {}: {}", fault.type_name, reason);
                Outcome::Suppressed(reason)
            }
            None => match self.dispatcher.dispatch(fault) {
                Ok(()) => {
                    log::debug!(
                        "Notified {} via {}",
                        fault.type_name,
                        self.dispatcher.transport_name()
                    );
                    Outcome::Sent
                }
                Err(e) => {
                    log::warn!(
                        "Failed to send notification for {} via {}: {}",
                        fault.type_name,
                        self.dispatcher.transport_name(),
                        e
                    );
                    Outcome::Failed
                }
            },
        }
    }

    /// The configuration snapshot the pipeline was built from
    pub fn config(&self) -> &NotifierConfig {
        self.engine.config()
    }
}
