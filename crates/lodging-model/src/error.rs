//! Error types for the lodging model.

use lodging_core::EngineError;
use lodging_reference::ReferenceError;

/// Errors from building or running the lodging model.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    /// Resolution or ingestion failure.
    #[error(transparent)]
    Engine(#[from] EngineError),

    /// Reference data could not be loaded.
    #[error(transparent)]
    Reference(#[from] ReferenceError),

    /// Model configuration parsed but is unusable.
    #[error("invalid config: {detail}")]
    InvalidConfig { detail: String },
}

/// Result type for model operations.
pub type Result<T> = std::result::Result<T, ModelError>;
