//! Error types for beats2bars.

use std::num::ParseFloatError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BarsError {
    // Input errors
    #[error("Line {line}: '{token}' is not a beat time in seconds: {source}")]
    Parse {
        line: usize,
        token: String,
        #[source]
        source: ParseFloatError,
    },

    #[error("Bar statistics unavailable: {reason}")]
    StatsUnavailable { reason: String },

    // Configuration errors
    #[error("Configuration file not found at {path}")]
    ConfigFileNotFound { path: String },

    #[error("Failed to parse configuration: {message}")]
    ConfigParse { message: String },

    #[error("Invalid configuration value for {key}: {message}")]
    ConfigInvalidValue { key: String, message: String },

    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),

    // General I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // Generic error for cases not covered above
    #[error("{0}")]
    Other(String),
}

impl BarsError {
    /// True for errors caused by malformed beat input rather than setup.
    pub fn is_input_error(&self) -> bool {
        matches!(self, BarsError::Parse { .. })
    }
}

// Type alias for convenience
pub type Result<T> = std::result::Result<T, BarsError>;
