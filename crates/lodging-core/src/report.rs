//! The audit view of a finished session.

use std::collections::BTreeMap;

use serde::Serialize;
use uuid::Uuid;

use crate::compliance::ComplianceSet;
use crate::provenance::Provenance;
use crate::timeframe::Timeframe;
use crate::value::Value;

/// Results, methodology, and achieved compliance for a set of root quantities.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub session: Uuid,
    pub timeframe: Timeframe,
    /// Standards the caller asked for.
    pub requested: ComplianceSet,
    /// Standards every method in the trace satisfies.
    pub compliance: ComplianceSet,
    /// SHA-256 of the characteristics the session started from.
    pub characteristics_digest: String,
    /// Root values; `None` for roots that did not resolve.
    pub results: BTreeMap<String, Option<Value>>,
    /// Provenance of every quantity the roots depend on.
    pub methodology: BTreeMap<String, Provenance>,
}

impl Report {
    pub fn value(&self, name: &str) -> Option<&Value> {
        self.results.get(name)?.as_ref()
    }

    pub fn number(&self, name: &str) -> Option<f64> {
        self.value(name)?.as_number()
    }

    /// Human-readable rendering.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("session:    {}\n", self.session));
        out.push_str(&format!("timeframe:  {}\n", self.timeframe));
        out.push_str(&format!("complies:   {}\n", list(&self.compliance)));
        if !self.requested.is_empty() {
            out.push_str(&format!("requested:  {}\n", list(&self.requested)));
        }

        out.push_str("\nresults:\n");
        for (name, value) in &self.results {
            match value {
                Some(v) => out.push_str(&format!("  {name:<28} {v}\n")),
                None => out.push_str(&format!("  {name:<28} (unresolved)\n")),
            }
        }

        out.push_str("\nmethodology:\n");
        for (name, provenance) in &self.methodology {
            out.push_str(&format!("  {name:<28} {}", provenance.method));
            if !provenance.inputs.is_empty() {
                out.push_str(&format!(" <- {}", provenance.inputs.join(", ")));
            }
            out.push('\n');
        }
        out
    }
}

fn list(set: &ComplianceSet) -> String {
    if set.is_empty() {
        return "(none)".to_string();
    }
    set.iter().map(|s| s.as_str()).collect::<Vec<_>>().join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compliance::Standard;

    fn sample() -> Report {
        let mut methodology = BTreeMap::new();
        methodology.insert(
            "carbon".to_string(),
            Provenance::quorum("from room nights", Standard::all(), vec!["room_nights".into()]),
        );
        methodology.insert("room_nights".to_string(), Provenance::client_input());
        Report {
            session: Uuid::nil(),
            timeframe: Timeframe::year(2011).unwrap(),
            requested: ComplianceSet::new(),
            compliance: Standard::all(),
            characteristics_digest: "00".into(),
            results: [
                ("carbon".to_string(), Some(Value::Number(12.5))),
                ("energy".to_string(), None),
            ]
            .into_iter()
            .collect(),
            methodology,
        }
    }

    #[test]
    fn accessors_skip_unresolved() {
        let report = sample();
        assert_eq!(report.number("carbon"), Some(12.5));
        assert_eq!(report.value("energy"), None);
        assert_eq!(report.value("water_use"), None);
    }

    #[test]
    fn text_lists_methods_and_inputs() {
        let text = sample().to_text();
        assert!(text.contains("2011-01-01/2012-01-01"));
        assert!(text.contains("(unresolved)"));
        assert!(text.contains("from room nights [ghg_protocol_scope_3, iso, tcr] <- room_nights"));
        assert!(!text.contains("requested:"));
    }

    #[test]
    fn serializes_to_json() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["results"]["energy"], serde_json::Value::Null);
        assert_eq!(json["compliance"], serde_json::json!(["ghg_protocol_scope_3", "iso", "tcr"]));
    }
}
