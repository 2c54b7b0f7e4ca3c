//! Unified error types for faultmail
//!
//! This module defines all error types used throughout the engine.
//! Uses thiserror for ergonomic error definitions.

use thiserror::Error;

/// Top-level engine error type
#[derive(Error, Debug)]
pub enum NotifyError {
    /// Error from configuration parsing/validation
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Error from the throttle store backend
    #[error("Throttle store error: {0}")]
    Store(#[from] StoreError),

    /// Error from the mail transport
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// IO error (file operations)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors from configuration parsing and validation
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Config file not found
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    /// Failed to parse config file
    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    /// Invalid config value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Missing required config field
    #[error("Missing required configuration field: {0}")]
    MissingField(String),

    /// TOML parsing error
    #[error("TOML parse error: {0}")]
    TomlError(#[from] toml::de::Error),
}

/// Errors from the throttle store backend
///
/// The eligibility engine treats every variant as transient and fails open:
/// a broken cache must never suppress notifications or crash the host.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Backend unreachable or not responding
    #[error("Throttle store unavailable: {0}")]
    Unavailable(String),

    /// Backend rejected the operation
    #[error("Throttle store operation failed: {0}")]
    OperationFailed(String),
}

/// Errors from the mail transport collaborator
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// Transport rejected or could not deliver the message
    #[error("Mail send failed: {0}")]
    SendFailed(String),

    /// Transport is not configured or reachable
    #[error("Mail transport unavailable: {0}")]
    Unavailable(String),
}

/// Result type alias using NotifyError
pub type Result<T> = std::result::Result<T, NotifyError>;
