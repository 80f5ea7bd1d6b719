//! Error types for reference data loading.

use std::path::PathBuf;

/// Errors that can occur while loading or validating reference data.
#[derive(Debug, thiserror::Error)]
pub enum ReferenceError {
    /// I/O error reading a dataset file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML deserialization error.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// JSON deserialization error.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Dataset file not found.
    #[error("reference data not found: {}", path.display())]
    NotFound {
        /// The path that was not found.
        path: PathBuf,
    },

    /// Two rows of one table share a key.
    #[error("duplicate key '{key}' in table '{table}'")]
    DuplicateKey { table: &'static str, key: String },

    /// Dangling references or impossible values.
    #[error("validation error: {detail}")]
    Validation {
        /// Every problem found, separated by `; `.
        detail: String,
    },
}

/// Result type for reference data operations.
pub type Result<T> = std::result::Result<T, ReferenceError>;
