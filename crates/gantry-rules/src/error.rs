//! Error types for rule file operations.

use std::path::PathBuf;
use thiserror::Error;

/// Errors from loading, parsing, and validating rule files.
#[derive(Debug, Error)]
pub enum RulesError {
    /// TOML parse error.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// TOML serialization error.
    #[error("TOML serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Rule file not found.
    #[error("rule file not found: {}", .path.display())]
    NotFound {
        /// Path that was searched.
        path: PathBuf,
    },

    /// Validation failure.
    #[error("rule validation failed: {detail}")]
    Validation {
        /// What failed.
        detail: String,
    },
}

/// Convenience alias for rule operations.
pub type Result<T> = std::result::Result<T, RulesError>;
