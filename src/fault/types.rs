//! Fault domain types
//!
//! Defines the immutable value describing one raised runtime condition and
//! the closed set of wrapper kinds the interception layer can tag it with.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Default code carried by runtime-level fault wrappers
pub const RUNTIME_FAULT_CODE: i64 = 500;

/// Closed set of fault wrapper kinds
///
/// Set once by the interception layer that wraps the native runtime signal;
/// classification never inspects type hierarchies, only this tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FaultKind {
    /// Fatal runtime error wrapper
    FatalError,
    /// Runtime warning wrapper
    Warning,
    /// Runtime notice wrapper
    Notice,
    /// Runtime strict-notice wrapper
    Strict,
    /// Runtime deprecation wrapper
    Deprecated,
    /// The engine's own misconfiguration signal; reserved, never notified
    ConfigurationError,
    /// Generic raised exception, including uncategorized application errors
    Exception,
}

impl fmt::Display for FaultKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FatalError => write!(f, "fatal_error"),
            Self::Warning => write!(f, "warning"),
            Self::Notice => write!(f, "notice"),
            Self::Strict => write!(f, "strict"),
            Self::Deprecated => write!(f, "deprecated"),
            Self::ConfigurationError => write!(f, "configuration_error"),
            Self::Exception => write!(f, "exception"),
        }
    }
}

/// One raised runtime condition
///
/// Created at the moment a fault is intercepted, never mutated, discarded
/// after the notification pipeline finishes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fault {
    /// Wrapper kind tagged by the interception layer
    pub kind: FaultKind,
    /// Fully-qualified type identifier, used for deny-list matching
    /// and fingerprinting
    pub type_name: String,
    /// Fault message
    pub message: String,
    /// Fault code
    pub code: i64,
    /// Source file, informational only
    pub file: Option<String>,
    /// Source line, informational only
    pub line: Option<u32>,
}

impl Fault {
    /// Create a generic exception fault with code 0
    pub fn exception(type_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: FaultKind::Exception,
            type_name: type_name.into(),
            message: message.into(),
            code: 0,
            file: None,
            line: None,
        }
    }

    /// Create a runtime-level fault wrapper with the default runtime code
    ///
    /// Used by interception glue for fatal errors, warnings, notices,
    /// strict notices, and deprecations.
    pub fn runtime(
        kind: FaultKind,
        type_name: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            type_name: type_name.into(),
            message: message.into(),
            code: RUNTIME_FAULT_CODE,
            file: None,
            line: None,
        }
    }

    /// Create the engine's internal misconfiguration signal
    pub fn configuration(message: impl Into<String>) -> Self {
        Self {
            kind: FaultKind::ConfigurationError,
            type_name: "faultmail::ConfigurationError".to_string(),
            message: message.into(),
            code: 0,
            file: None,
            line: None,
        }
    }

    /// Set the fault code
    pub fn with_code(mut self, code: i64) -> Self {
        self.code = code;
        self
    }

    /// Set the source location
    pub fn with_location(mut self, file: impl Into<String>, line: u32) -> Self {
        self.file = Some(file.into());
        self.line = Some(line);
        self
    }
}

impl fmt::Display for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.kind, self.type_name, self.message)?;
        if let (Some(file), Some(line)) = (&self.file, self.line) {
            write!(f, " ({}:{})", file, line)?;
        }
        Ok(())
    }
}
