//! Geocoding collaborator.
//!
//! Turns a free-text place description such as `"Bar Harbor, ME"` into a
//! location. Implementations backed by a network service must enforce their
//! own timeouts; the estimation engine calls this synchronously.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A successful geocoding result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Geocode {
    /// The description this result answers.
    pub query: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub zip_code: Option<String>,
    /// State postal abbreviation (US only).
    #[serde(default)]
    pub state: Option<String>,
    /// ISO 3166 country code.
    #[serde(default)]
    pub country: Option<String>,
}

pub trait Geocoder: Send + Sync {
    /// Locate `description`, or `None` if it cannot be located.
    fn geocode(&self, description: &str) -> Option<Geocode>;
}

/// Geocoder answering from a fixed table of known places.
#[derive(Debug, Clone, Default)]
pub struct StaticGeocoder {
    entries: BTreeMap<String, Geocode>,
}

impl StaticGeocoder {
    pub fn new(entries: impl IntoIterator<Item = Geocode>) -> Self {
        Self {
            entries: entries
                .into_iter()
                .map(|g| (normalize(&g.query), g))
                .collect(),
        }
    }
}

impl Geocoder for StaticGeocoder {
    fn geocode(&self, description: &str) -> Option<Geocode> {
        self.entries.get(&normalize(description)).cloned()
    }
}

/// Lowercase, trim each comma-separated part, and drop empty parts.
pub fn normalize(description: &str) -> String {
    description
        .split(',')
        .map(|part| part.split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bar_harbor() -> Geocode {
        Geocode {
            query: "Bar Harbor, ME".into(),
            latitude: 44.39,
            longitude: -68.2,
            zip_code: Some("04609".into()),
            state: Some("ME".into()),
            country: Some("US".into()),
        }
    }

    #[test]
    fn normalize_ignores_case_and_spacing() {
        assert_eq!(normalize("  Bar   Harbor ,ME "), "bar harbor, me");
        assert_eq!(normalize("London,, "), "london");
    }

    #[test]
    fn static_geocoder_matches_normalized_queries() {
        let geocoder = StaticGeocoder::new([bar_harbor()]);
        let hit = geocoder.geocode("bar harbor,  me").unwrap();
        assert_eq!(hit.zip_code.as_deref(), Some("04609"));
        assert!(geocoder.geocode("Portland, ME").is_none());
    }
}
