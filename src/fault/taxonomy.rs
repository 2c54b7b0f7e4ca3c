//! Fault taxonomy
//!
//! Maps a fault instance to exactly one severity category. Classification is
//! a pure, total function over the closed `FaultKind` set: unmatched input
//! always falls through to `Exception`.

use super::types::{Fault, FaultKind};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Fault severity categories eligible for notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FaultCategory {
    /// Generic raised exceptions, including uncategorized application errors
    Exception,
    /// Fatal runtime errors
    FatalError,
    /// Runtime warnings
    Warning,
    /// Runtime notices
    Notice,
    /// Runtime strict notices
    Strict,
    /// Runtime deprecation notices
    Deprecated,
}

impl FaultCategory {
    /// All categories, in classification-rule order
    pub const ALL: [FaultCategory; 6] = [
        FaultCategory::FatalError,
        FaultCategory::Warning,
        FaultCategory::Notice,
        FaultCategory::Strict,
        FaultCategory::Deprecated,
        FaultCategory::Exception,
    ];
}

impl fmt::Display for FaultCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exception => write!(f, "exception"),
            Self::FatalError => write!(f, "error"),
            Self::Warning => write!(f, "warning"),
            Self::Notice => write!(f, "notice"),
            Self::Strict => write!(f, "strict"),
            Self::Deprecated => write!(f, "deprecated"),
        }
    }
}

/// Classify a fault into exactly one category
///
/// Rule order: fatal error, warning, notice, strict, deprecated; everything
/// else is `Exception`. The engine's internal configuration-error signal also
/// classifies as `Exception` and is suppressed separately by the eligibility
/// chain.
pub fn classify(fault: &Fault) -> FaultCategory {
    match fault.kind {
        FaultKind::FatalError => FaultCategory::FatalError,
        FaultKind::Warning => FaultCategory::Warning,
        FaultKind::Notice => FaultCategory::Notice,
        FaultKind::Strict => FaultCategory::Strict,
        FaultKind::Deprecated => FaultCategory::Deprecated,
        FaultKind::ConfigurationError | FaultKind::Exception => FaultCategory::Exception,
    }
}
