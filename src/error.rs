//! This module defines all error types used throughout the application.

use std::io;
use thiserror::Error;

/// Main error type for the application
#[derive(Error, Debug)]
pub enum Error {
    /// IO errors (file not found, permission denied, etc.)
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Structurally malformed dump: missing mandatory field, unparsable
    /// integer/triple, or an index outside its declared bit-width
    #[error("Malformed dump ({field}): {message}")]
    MalformedDump { field: String, message: String },

    /// No automaton present in the input (all mandatory fields absent or the
    /// declared state space is empty)
    #[error("No automaton dump found in input")]
    EmptyDump,

    /// The external graph-layout tool is not available
    #[error("Render backend unavailable: {0}")]
    RenderBackend(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic error with custom message
    #[error("{0}")]
    Custom(String),

    /// Wrapped anyhow errors
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a custom error with a message
    pub fn custom(msg: impl Into<String>) -> Self {
        Self::Custom(msg.into())
    }

    /// Create a malformed-dump error naming the offending field
    pub fn malformed(field: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::MalformedDump {
            field: field.into(),
            message: msg.into(),
        }
    }

    /// Create a render backend error
    pub fn render_backend(msg: impl Into<String>) -> Self {
        Self::RenderBackend(msg.into())
    }

    /// Check if error means "nothing to show" rather than corrupt input
    pub fn is_empty_dump(&self) -> bool {
        matches!(self, Error::EmptyDump)
    }
}

// Implement From traits for common external error types

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::MalformedDump {
            field: "document".to_string(),
            message: format!("JSON error: {}", err),
        }
    }
}

// Helper macros for creating errors

/// Create a custom error with formatting
#[macro_export]
macro_rules! custom_error {
    ($($arg:tt)*) => {
        $crate::error::Error::Custom(format!($($arg)*))
    };
}

/// Bail with a custom error message
#[macro_export]
macro_rules! bail {
    ($($arg:tt)*) => {
        return Err($crate::custom_error!($($arg)*))
    };
}

/// Ensure a condition is true or return error
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $($arg:tt)*) => {
        if !($cond) {
            $crate::bail!($($arg)*);
        }
    };
}
