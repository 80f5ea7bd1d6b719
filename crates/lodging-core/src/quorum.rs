//! Quorums: single named methods for computing a quantity.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use chrono::NaiveDate;

use crate::compliance::{ComplianceSet, Standard};
use crate::timeframe::Context;
use crate::value::{EntityRef, Value};

/// The computation behind a quorum.
///
/// Returns `None` when the method cannot produce a value from these inputs
/// (for example a reference lookup missed). The committee then moves on
/// to its next quorum.
pub type ComputeFn = Arc<dyn Fn(&Inputs, &Context) -> Option<Value> + Send + Sync>;

/// Resolved inputs handed to a quorum's compute function.
///
/// Every `needs` name is guaranteed present. `appreciates` names are
/// present only if they resolved.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Inputs {
    values: BTreeMap<String, Value>,
}

impl Inputs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: &str, value: Value) {
        self.values.insert(name.to_string(), value);
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    pub fn has(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn number(&self, name: &str) -> Option<f64> {
        self.get(name)?.as_number()
    }

    pub fn text(&self, name: &str) -> Option<&str> {
        self.get(name)?.as_text()
    }

    pub fn date(&self, name: &str) -> Option<NaiveDate> {
        self.get(name)?.as_date()
    }

    pub fn entity(&self, name: &str) -> Option<&EntityRef> {
        self.get(name)?.as_entity()
    }

    /// Key of an entity-valued input.
    pub fn key(&self, name: &str) -> Option<&str> {
        self.entity(name).map(|e| e.key.as_str())
    }

    pub fn table(&self, name: &str) -> Option<&BTreeMap<String, f64>> {
        self.get(name)?.as_table()
    }

    pub fn record(&self, name: &str) -> Option<&BTreeMap<String, Value>> {
        self.get(name)?.as_record()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// One candidate method for a quantity.
#[derive(Clone)]
pub struct Quorum {
    label: String,
    needs: Vec<String>,
    appreciates: Vec<String>,
    complies: ComplianceSet,
    compute: ComputeFn,
}

impl Quorum {
    /// A quorum with no requirements and no compliance claims.
    pub fn new<F>(label: &str, compute: F) -> Self
    where
        F: Fn(&Inputs, &Context) -> Option<Value> + Send + Sync + 'static,
    {
        Self {
            label: label.to_string(),
            needs: Vec::new(),
            appreciates: Vec::new(),
            complies: ComplianceSet::new(),
            compute: Arc::new(compute),
        }
    }

    /// A quorum that always yields `value`.
    pub fn constant(label: &str, value: Value) -> Self {
        Self::new(label, move |_, _| Some(value.clone()))
    }

    /// Quantities that must resolve for this quorum to be considered.
    pub fn needs(mut self, names: &[&str]) -> Self {
        self.needs.extend(names.iter().map(|n| n.to_string()));
        self
    }

    /// Quantities used when available. Never block selection.
    pub fn appreciates(mut self, names: &[&str]) -> Self {
        self.appreciates.extend(names.iter().map(|n| n.to_string()));
        self
    }

    pub fn complies(mut self, standards: &[Standard]) -> Self {
        self.complies.extend(standards.iter().copied());
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn required(&self) -> &[String] {
        &self.needs
    }

    pub fn optional(&self) -> &[String] {
        &self.appreciates
    }

    pub fn compliance(&self) -> &ComplianceSet {
        &self.complies
    }

    /// Every quantity this quorum may ask the session for.
    pub fn dependencies(&self) -> impl Iterator<Item = &str> {
        self.needs
            .iter()
            .chain(self.appreciates.iter())
            .map(String::as_str)
    }

    /// The universal fallback: needs nothing and claims no compliance.
    pub fn is_default(&self) -> bool {
        self.needs.is_empty() && self.complies.is_empty()
    }

    pub fn evaluate(&self, inputs: &Inputs, context: &Context) -> Option<Value> {
        (self.compute)(inputs, context)
    }
}

impl fmt::Debug for Quorum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Quorum")
            .field("label", &self.label)
            .field("needs", &self.needs)
            .field("appreciates", &self.appreciates)
            .field("complies", &self.complies)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_collects_metadata() {
        let q = Quorum::new("from zip code", |inputs, _| {
            inputs.key("zip_code").map(|z| Value::entity("state", format!("state-of-{z}")))
        })
        .needs(&["zip_code"])
        .appreciates(&["city"])
        .complies(&[Standard::Iso]);

        assert_eq!(q.label(), "from zip code");
        assert_eq!(q.required(), ["zip_code".to_string()]);
        assert_eq!(q.dependencies().collect::<Vec<_>>(), ["zip_code", "city"]);
        assert!(!q.is_default());
    }

    #[test]
    fn default_means_no_needs_and_no_tags() {
        assert!(Quorum::constant("default", Value::Number(1.0)).is_default());
        let tagged = Quorum::constant("default", Value::Number(1.0)).complies(&[Standard::Tcr]);
        assert!(!tagged.is_default());
    }

    #[test]
    fn evaluate_reads_typed_inputs() {
        let q = Quorum::new("double", |inputs, _| {
            inputs.number("rooms").map(|r| Value::Number(r * 2.0))
        })
        .needs(&["rooms"]);
        let mut inputs = Inputs::new();
        inputs.insert("rooms", Value::Number(3.0));
        assert_eq!(q.evaluate(&inputs, &Context::default()), Some(Value::Number(6.0)));
        assert_eq!(q.evaluate(&Inputs::new(), &Context::default()), None);
    }
}
