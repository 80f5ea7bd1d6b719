//! Committees: the ordered methods for one quantity.

use std::collections::HashSet;

use crate::compliance::{complies, ComplianceSet};
use crate::error::{EngineError, Result};
use crate::quorum::Quorum;

/// The quorums for one quantity, most preferred first.
#[derive(Debug, Clone)]
pub struct Committee {
    quantity: String,
    quorums: Vec<Quorum>,
}

impl Committee {
    pub fn new(quantity: &str) -> Self {
        Self {
            quantity: quantity.to_string(),
            quorums: Vec::new(),
        }
    }

    /// Append a quorum (lower preference than every quorum already added).
    pub fn quorum(mut self, quorum: Quorum) -> Self {
        self.quorums.push(quorum);
        self
    }

    pub fn quantity(&self) -> &str {
        &self.quantity
    }

    pub fn quorums(&self) -> &[Quorum] {
        &self.quorums
    }

    /// Quorums that pass the compliance filter, in preference order.
    pub fn eligible<'a>(
        &'a self,
        requested: &'a ComplianceSet,
    ) -> impl Iterator<Item = &'a Quorum> + 'a {
        self.quorums
            .iter()
            .filter(move |q| complies(q.compliance(), requested))
    }

    /// Check the ordering rules.
    ///
    /// At most one universal fallback may exist and it must come last.
    /// Labels must be unique so provenance is unambiguous.
    pub fn validate(&self) -> Result<()> {
        let invalid = |detail: String| EngineError::InvalidCommittee {
            quantity: self.quantity.clone(),
            detail,
        };

        let mut labels = HashSet::new();
        for q in &self.quorums {
            if !labels.insert(q.label()) {
                return Err(invalid(format!("duplicate quorum label '{}'", q.label())));
            }
        }

        let defaults: Vec<usize> = self
            .quorums
            .iter()
            .enumerate()
            .filter(|(_, q)| q.is_default())
            .map(|(i, _)| i)
            .collect();
        match defaults.as_slice() {
            [] => Ok(()),
            [i] if *i + 1 == self.quorums.len() => Ok(()),
            [i] => Err(invalid(format!(
                "default quorum '{}' must be declared last",
                self.quorums[*i].label()
            ))),
            _ => Err(invalid(format!(
                "{} default quorums declared, at most one allowed",
                defaults.len()
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compliance::Standard;
    use crate::value::Value;

    fn one() -> Value {
        Value::Number(1.0)
    }

    #[test]
    fn default_last_is_valid() {
        let c = Committee::new("rooms")
            .quorum(Quorum::constant("from property", one()).needs(&["lodging_property"]))
            .quorum(Quorum::constant("default", one()));
        assert!(c.validate().is_ok());
    }

    #[test]
    fn default_first_is_rejected() {
        let c = Committee::new("rooms")
            .quorum(Quorum::constant("default", one()))
            .quorum(Quorum::constant("from property", one()).needs(&["lodging_property"]));
        let err = c.validate().unwrap_err();
        assert!(err.to_string().contains("must be declared last"));
    }

    #[test]
    fn two_defaults_are_rejected() {
        let c = Committee::new("rooms")
            .quorum(Quorum::constant("default", one()))
            .quorum(Quorum::constant("other default", one()));
        assert!(c.validate().is_err());
    }

    #[test]
    fn duplicate_labels_are_rejected() {
        let c = Committee::new("state")
            .quorum(Quorum::constant("from zip code", one()).needs(&["zip_code"]))
            .quorum(Quorum::constant("from zip code", one()).needs(&["zip_code"]));
        assert!(c.validate().is_err());
    }

    #[test]
    fn tagged_constant_may_precede_others() {
        let c = Committee::new("lodging_class")
            .quorum(Quorum::constant("default", one()).complies(&[Standard::Iso]))
            .quorum(Quorum::constant("fallback", one()));
        assert!(c.validate().is_ok());
    }

    #[test]
    fn eligible_applies_compliance_filter() {
        let c = Committee::new("x")
            .quorum(Quorum::constant("iso only", one()).complies(&[Standard::Iso]))
            .quorum(Quorum::constant("all", one()).complies(&Standard::ALL))
            .quorum(Quorum::constant("default", one()));

        let any = ComplianceSet::new();
        assert_eq!(c.eligible(&any).count(), 3);

        let tcr: ComplianceSet = [Standard::Tcr].into_iter().collect();
        let labels: Vec<_> = c.eligible(&tcr).map(|q| q.label()).collect();
        assert_eq!(labels, ["all"]);
    }
}
