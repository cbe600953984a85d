//! Error types for Encore
//!
//! Provides standardized error handling across the crate.

use thiserror::Error;

/// Errors that can occur in Encore
#[derive(Debug, Error)]
pub enum EncoreError {
    /// The application-registry or frontmost-application query failed
    #[error("Discovery error: {0}")]
    Discovery(String),

    /// The spawn request was rejected or failed. The message is the OS
    /// error text, shown to the user verbatim.
    #[error("Launch error: {0}")]
    Launch(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Clipboard operation errors
    #[error("Clipboard error: {0}")]
    Clipboard(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing errors
    #[error("Config parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

/// Result type alias for Encore operations
pub type EncoreResult<T> = Result<T, EncoreError>;
