//! Provenance: how each quantity in a session got its value.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::compliance::ComplianceSet;

/// The method that produced a value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum Method {
    /// Supplied by the caller. Complies with every standard.
    ClientInput,
    /// Computed by the named quorum.
    Quorum {
        label: String,
        complies: ComplianceSet,
    },
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Method::ClientInput => write!(f, "client input"),
            Method::Quorum { label, complies } if complies.is_empty() => write!(f, "{label}"),
            Method::Quorum { label, complies } => {
                let tags: Vec<_> = complies.iter().map(|s| s.as_str()).collect();
                write!(f, "{label} [{}]", tags.join(", "))
            }
        }
    }
}

/// Provenance record for one resolved quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Provenance {
    pub method: Method,
    /// Quantities actually handed to the quorum (needs plus resolved appreciates).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub inputs: Vec<String>,
}

impl Provenance {
    pub fn client_input() -> Self {
        Self {
            method: Method::ClientInput,
            inputs: Vec::new(),
        }
    }

    pub fn quorum(label: &str, complies: ComplianceSet, inputs: Vec<String>) -> Self {
        Self {
            method: Method::Quorum {
                label: label.to_string(),
                complies,
            },
            inputs,
        }
    }

    pub fn is_client_input(&self) -> bool {
        matches!(self.method, Method::ClientInput)
    }

    /// Quorum label, or `None` for client input.
    pub fn label(&self) -> Option<&str> {
        match &self.method {
            Method::Quorum { label, .. } => Some(label),
            Method::ClientInput => None,
        }
    }
}
