//! The quantity registry: declarations and committees for one model.
//!
//! Built once at start-up and shared read-only by every session. Later
//! registrations of a committee replace earlier ones, so a composed model
//! can override a base model's methods.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use tracing::debug;

use crate::committee::Committee;
use crate::error::{EngineError, Result};
use crate::quantity::Quantity;

/// Catalog of quantities and the committees that derive them.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    quantities: BTreeMap<String, Quantity>,
    committees: BTreeMap<String, Committee>,
}

impl Registry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a quantity. Re-declaring replaces the earlier declaration.
    pub fn declare(&mut self, quantity: Quantity) -> &mut Self {
        self.quantities.insert(quantity.name.clone(), quantity);
        self
    }

    /// Register the committee for its quantity; last write wins.
    ///
    /// The committee's own ordering rules are checked here. Graph-level
    /// checks (undeclared names, cycles) happen in [`validate`](Self::validate).
    pub fn register(&mut self, committee: Committee) -> Result<&mut Self> {
        if !self.quantities.contains_key(committee.quantity()) {
            return Err(EngineError::UnknownQuantity(committee.quantity().to_string()));
        }
        committee.validate()?;
        let name = committee.quantity().to_string();
        if self.committees.insert(name.clone(), committee).is_some() {
            debug!(quantity = %name, "committee replaced");
        }
        Ok(self)
    }

    pub fn quantity(&self, name: &str) -> Option<&Quantity> {
        self.quantities.get(name)
    }

    pub fn committee(&self, name: &str) -> Option<&Committee> {
        self.committees.get(name)
    }

    pub fn quantities(&self) -> impl Iterator<Item = &Quantity> {
        self.quantities.values()
    }

    pub fn committees(&self) -> impl Iterator<Item = &Committee> {
        self.committees.values()
    }

    /// Direct dependencies of a quantity across all its quorums.
    pub fn dependencies(&self, name: &str) -> BTreeSet<&str> {
        self.committees
            .get(name)
            .map(|c| c.quorums().iter().flat_map(|q| q.dependencies()).collect())
            .unwrap_or_default()
    }

    /// Check the whole graph: every referenced name is declared and no
    /// quantity depends on itself through needs or appreciates edges.
    pub fn validate(&self) -> Result<()> {
        for committee in self.committees.values() {
            for quorum in committee.quorums() {
                if let Some(missing) = quorum
                    .dependencies()
                    .find(|dep| !self.quantities.contains_key(*dep))
                {
                    return Err(EngineError::UnknownQuantity(missing.to_string()));
                }
            }
        }

        let mut visited = HashSet::new();
        for name in self.committees.keys() {
            let mut stack = Vec::new();
            self.check_cycles(name, &mut visited, &mut stack)?;
        }
        Ok(())
    }

    fn check_cycles<'a>(
        &'a self,
        node: &'a str,
        visited: &mut HashSet<&'a str>,
        stack: &mut Vec<&'a str>,
    ) -> Result<()> {
        if let Some(pos) = stack.iter().position(|n| *n == node) {
            let mut path: Vec<String> = stack[pos..].iter().map(|n| n.to_string()).collect();
            path.push(node.to_string());
            return Err(EngineError::CyclicDependency { path });
        }
        if visited.contains(node) {
            return Ok(());
        }

        stack.push(node);
        for dep in self.dependencies(node) {
            self.check_cycles(dep, visited, stack)?;
        }
        stack.pop();
        visited.insert(node);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quantity::QuantityKind;
    use crate::quorum::Quorum;
    use crate::value::Value;

    fn declare_all(registry: &mut Registry, names: &[&str]) {
        for name in names {
            registry.declare(Quantity::new(name, QuantityKind::Number, name));
        }
    }

    fn needs(quantity: &str, deps: &[&str]) -> Committee {
        Committee::new(quantity).quorum(Quorum::constant("from deps", Value::Number(1.0)).needs(deps))
    }

    #[test]
    fn register_requires_declaration() {
        let mut registry = Registry::new();
        let err = registry.register(needs("carbon", &[])).unwrap_err();
        assert_eq!(err, EngineError::UnknownQuantity("carbon".into()));
    }

    #[test]
    fn last_registration_wins() {
        let mut registry = Registry::new();
        declare_all(&mut registry, &["rooms"]);
        registry
            .register(Committee::new("rooms").quorum(Quorum::constant("default", Value::Number(1.0))))
            .unwrap();
        registry
            .register(Committee::new("rooms").quorum(Quorum::constant("two", Value::Number(2.0))))
            .unwrap();
        let committee = registry.committee("rooms").unwrap();
        assert_eq!(committee.quorums().len(), 1);
        assert_eq!(committee.quorums()[0].label(), "two");
    }

    #[test]
    fn validate_rejects_undeclared_dependencies() {
        let mut registry = Registry::new();
        declare_all(&mut registry, &["carbon"]);
        registry.register(needs("carbon", &["room_nights"])).unwrap();
        assert_eq!(
            registry.validate().unwrap_err(),
            EngineError::UnknownQuantity("room_nights".into())
        );
    }

    #[test]
    fn validate_accepts_dag() {
        let mut registry = Registry::new();
        declare_all(&mut registry, &["a", "b", "c", "d"]);
        registry.register(needs("a", &["b", "c"])).unwrap();
        registry.register(needs("b", &["d"])).unwrap();
        registry.register(needs("c", &["d"])).unwrap();
        assert!(registry.validate().is_ok());
        assert_eq!(registry.dependencies("a").into_iter().collect::<Vec<_>>(), ["b", "c"]);
    }

    #[test]
    fn validate_reports_cycle_path() {
        let mut registry = Registry::new();
        declare_all(&mut registry, &["a", "b", "c"]);
        registry.register(needs("a", &["b"])).unwrap();
        registry.register(needs("b", &["c"])).unwrap();
        registry.register(needs("c", &["a"])).unwrap();
        match registry.validate().unwrap_err() {
            EngineError::CyclicDependency { path } => assert_eq!(path, ["a", "b", "c", "a"]),
            other => panic!("expected cycle, got {other}"),
        }
    }

    #[test]
    fn optional_edges_count_for_cycles() {
        let mut registry = Registry::new();
        declare_all(&mut registry, &["a", "b"]);
        registry
            .register(
                Committee::new("a")
                    .quorum(Quorum::constant("maybe b", Value::Number(1.0)).appreciates(&["b"])),
            )
            .unwrap();
        registry.register(needs("b", &["a"])).unwrap();
        assert!(matches!(
            registry.validate(),
            Err(EngineError::CyclicDependency { .. })
        ));
    }
}
