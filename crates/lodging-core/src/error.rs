//! Engine error types.

/// Errors that cross the session boundary.
///
/// A quantity that merely has no applicable method is not an error: the
/// session reports it as `Ok(None)` and lets the parent fall back. Only the
/// root quantity of a decision turns that into [`EngineError::NoApplicableMethod`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    /// Malformed client input, detected at ingestion.
    #[error("invalid input for '{quantity}': expected {expected}, got {found}")]
    InputType {
        quantity: String,
        expected: String,
        found: String,
    },

    /// A name that no quantity declaration covers.
    #[error("unknown quantity: {0}")]
    UnknownQuantity(String),

    /// A committee that violates the quorum ordering rules.
    #[error("invalid committee for '{quantity}': {detail}")]
    InvalidCommittee { quantity: String, detail: String },

    /// A quantity that depends on itself, directly or transitively.
    #[error("cyclic dependency: {}", path.join(" -> "))]
    CyclicDependency { path: Vec<String> },

    /// The requested root quantity could not be resolved by any method.
    #[error("no applicable method for '{quantity}'")]
    NoApplicableMethod { quantity: String },
}

/// Result type alias for engine operations.
pub type Result<T> = std::result::Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cyclic_dependency_display_shows_path() {
        let err = EngineError::CyclicDependency {
            path: vec!["a".into(), "b".into(), "a".into()],
        };
        assert_eq!(err.to_string(), "cyclic dependency: a -> b -> a");
    }

    #[test]
    fn input_type_display() {
        let err = EngineError::InputType {
            quantity: "rooms".into(),
            expected: "number".into(),
            found: "\"two\"".into(),
        };
        assert!(err.to_string().contains("rooms"));
        assert!(err.to_string().contains("expected number"));
    }
}
