//! Calculation standards and the compliance filter.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// An external calculation standard a method can comply with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Standard {
    /// GHG Protocol Scope 3.
    #[serde(rename = "ghg_protocol_scope_3")]
    GhgProtocolScope3,
    /// ISO 14064-1.
    #[serde(rename = "iso")]
    Iso,
    /// The Climate Registry General Reporting Protocol.
    #[serde(rename = "tcr")]
    Tcr,
}

/// A set of standards. Ordered so reports are stable.
pub type ComplianceSet = BTreeSet<Standard>;

impl Standard {
    /// Every standard the engine knows about.
    pub const ALL: [Standard; 3] = [Standard::GhgProtocolScope3, Standard::Iso, Standard::Tcr];

    /// Identifier used in configuration files and on the command line.
    pub const fn as_str(self) -> &'static str {
        match self {
            Standard::GhgProtocolScope3 => "ghg_protocol_scope_3",
            Standard::Iso => "iso",
            Standard::Tcr => "tcr",
        }
    }

    /// Human-readable name.
    pub const fn title(self) -> &'static str {
        match self {
            Standard::GhgProtocolScope3 => "GHG Protocol Scope 3",
            Standard::Iso => "ISO 14064-1",
            Standard::Tcr => "Climate Registry Protocol",
        }
    }

    /// The full set of known standards.
    pub fn all() -> ComplianceSet {
        Self::ALL.into_iter().collect()
    }
}

impl fmt::Display for Standard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Standard {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ghg_protocol_scope_3" | "ghg" => Ok(Standard::GhgProtocolScope3),
            "iso" => Ok(Standard::Iso),
            "tcr" => Ok(Standard::Tcr),
            other => Err(format!(
                "unknown standard '{other}' (expected ghg_protocol_scope_3, iso, or tcr)"
            )),
        }
    }
}

/// True iff a method tagged with `tags` may be used when `requested`
/// compliance is asked for: `requested` is empty or a subset of `tags`.
pub fn complies(tags: &ComplianceSet, requested: &ComplianceSet) -> bool {
    requested.is_subset(tags)
}
