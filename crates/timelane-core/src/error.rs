//! Core error types for timelane-core.
//!
//! This module defines the error hierarchy using thiserror. Errors are
//! raised only at construction and configuration boundaries; the pointer
//! interaction paths never fail and instead degrade to "no change"
//! (see [`crate::session`]).

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for timelane-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
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

    /// Unknown configuration key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// No configuration directory could be resolved
    #[error("Could not resolve a configuration directory")]
    NoConfigDir,
}

/// Validation errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Half-open time spans must satisfy start < end
    #[error("Invalid time span: end ({end}) must be greater than start ({start})")]
    InvalidTimeSpan {
        start: chrono::DateTime<chrono::Utc>,
        end: chrono::DateTime<chrono::Utc>,
    },

    /// View windows must cover a non-empty range
    #[error("Invalid view window: end ({end}) must be greater than start ({start})")]
    InvalidWindow {
        start: chrono::DateTime<chrono::Utc>,
        end: chrono::DateTime<chrono::Utc>,
    },

    /// Pixel density must be positive and finite
    #[error("Invalid pixel density: {px_per_day} px/day")]
    InvalidDensity { px_per_day: f64 },
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
