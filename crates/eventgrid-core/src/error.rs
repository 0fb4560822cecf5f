//! Core error types for eventgrid-core.
//!
//! Layout failures are precondition violations surfaced straight to the
//! caller; configuration failures carry the offending path or key.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for eventgrid-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Layout-related errors
    #[error("Layout error: {0}")]
    Layout(#[from] LayoutError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors raised while laying out events.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    /// An event ends before it starts
    #[error("Invalid interval: start ({start}) must not be greater than end ({end})")]
    InvalidInterval { start: i64, end: i64 },

    /// Overflow policy configured with zero columns
    #[error("Invalid max column count {0}: at least one column is required")]
    InvalidMaxColumns(usize),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Key does not exist in the configuration
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
