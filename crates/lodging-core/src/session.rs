//! Decision sessions: lazy, memoized resolution of one request.
//!
//! A session resolves quantities depth-first. Each quantity is settled at
//! most once: client input first, otherwise the first quorum of its
//! committee that passes the compliance filter, has every `needs` input
//! resolvable, and whose computation succeeds. A quantity nothing can
//! settle is cached as unresolvable, which is ordinary signalling: the
//! parent simply skips the quorum that needed it.

use std::collections::{BTreeMap, HashMap};

use tracing::{debug, info, trace, warn};
use uuid::Uuid;

use crate::characteristics::Characteristics;
use crate::committee::Committee;
use crate::compliance::{ComplianceSet, Standard};
use crate::error::{EngineError, Result};
use crate::provenance::{Method, Provenance};
use crate::quorum::Inputs;
use crate::registry::Registry;
use crate::report::Report;
use crate::timeframe::Context;
use crate::value::Value;

/// Memo entry for one quantity.
#[derive(Debug, Clone)]
enum Slot {
    /// On the resolution stack. Seeing it again means a cycle.
    Resolving,
    Resolved(Value),
    Unresolvable,
}

/// Counters for one session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    /// Lookups answered from the memo.
    pub hits: usize,
    /// Quantities settled for the first time.
    pub misses: usize,
    /// Quorum computations actually invoked.
    pub evaluations: usize,
}

/// One estimation request against a registry.
pub struct Session<'r> {
    id: Uuid,
    registry: &'r Registry,
    characteristics: Characteristics,
    context: Context,
    cache: HashMap<String, Slot>,
    provenance: BTreeMap<String, Provenance>,
    stack: Vec<String>,
    stats: SessionStats,
}

impl<'r> Session<'r> {
    pub fn new(registry: &'r Registry, characteristics: Characteristics, context: Context) -> Self {
        Self {
            id: Uuid::new_v4(),
            registry,
            characteristics,
            context,
            cache: HashMap::new(),
            provenance: BTreeMap::new(),
            stack: Vec::new(),
            stats: SessionStats::default(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn context(&self) -> &Context {
        &self.context
    }

    pub fn characteristics(&self) -> &Characteristics {
        &self.characteristics
    }

    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    /// How a quantity was settled, if it resolved.
    pub fn provenance(&self, name: &str) -> Option<&Provenance> {
        self.provenance.get(name)
    }

    /// The memoized value of a quantity, without resolving it.
    pub fn value(&self, name: &str) -> Option<&Value> {
        match self.cache.get(name) {
            Some(Slot::Resolved(v)) => Some(v),
            _ => None,
        }
    }

    /// Resolve a quantity. `Ok(None)` means no method applies.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::CyclicDependency`] if resolution re-enters a
    /// quantity that is still being resolved.
    pub fn resolve(&mut self, name: &str) -> Result<Option<Value>> {
        match self.cache.get(name) {
            Some(Slot::Resolved(value)) => {
                self.stats.hits += 1;
                return Ok(Some(value.clone()));
            }
            Some(Slot::Unresolvable) => {
                self.stats.hits += 1;
                return Ok(None);
            }
            Some(Slot::Resolving) => {
                let start = self.stack.iter().position(|n| n == name).unwrap_or(0);
                let mut path = self.stack[start..].to_vec();
                path.push(name.to_string());
                return Err(EngineError::CyclicDependency { path });
            }
            None => {}
        }
        self.stats.misses += 1;

        if let Some(value) = self.characteristics.get(name).cloned() {
            trace!(session = %self.id, quantity = name, "client input");
            self.settle(name, Some((value.clone(), Provenance::client_input())));
            return Ok(Some(value));
        }

        let registry = self.registry;
        let Some(committee) = registry.committee(name) else {
            trace!(session = %self.id, quantity = name, "no input and no committee");
            self.settle(name, None);
            return Ok(None);
        };

        self.cache.insert(name.to_string(), Slot::Resolving);
        self.stack.push(name.to_string());
        let outcome = self.convene(committee);
        self.stack.pop();

        match outcome {
            Ok(decided) => {
                let value = decided.as_ref().map(|(v, _)| v.clone());
                self.settle(name, decided);
                Ok(value)
            }
            Err(e) => {
                self.cache.remove(name);
                Err(e)
            }
        }
    }

    /// Resolve the root quantity of a decision.
    ///
    /// # Errors
    ///
    /// [`EngineError::NoApplicableMethod`] if the root is unresolvable, plus
    /// anything [`resolve`](Self::resolve) returns.
    pub fn decide(&mut self, root: &str) -> Result<Value> {
        if self.registry.quantity(root).is_none() {
            return Err(EngineError::UnknownQuantity(root.to_string()));
        }
        match self.resolve(root)? {
            Some(value) => {
                info!(
                    session = %self.id,
                    quantity = root,
                    value = %value,
                    evaluations = self.stats.evaluations,
                    "decision reached"
                );
                Ok(value)
            }
            None => {
                warn!(session = %self.id, quantity = root, "no applicable method");
                Err(EngineError::NoApplicableMethod {
                    quantity: root.to_string(),
                })
            }
        }
    }

    /// Build the audit report for the given roots.
    ///
    /// Roots that were never resolved in this session appear as unresolved.
    /// Nothing resolved means nothing complies.
    pub fn report(&self, roots: &[&str]) -> Report {
        let results: BTreeMap<String, Option<Value>> = roots
            .iter()
            .map(|r| (r.to_string(), self.value(r).cloned()))
            .collect();
        let methodology = self.trace(roots);
        let compliance = if results.values().any(Option::is_some) {
            achieved_compliance(methodology.values())
        } else {
            ComplianceSet::new()
        };
        Report {
            session: self.id,
            timeframe: self.context.timeframe,
            requested: self.context.compliance.clone(),
            compliance,
            characteristics_digest: self.characteristics.digest(),
            results,
            methodology,
        }
    }

    /// Try the committee's eligible quorums in order.
    fn convene(&mut self, committee: &'r Committee) -> Result<Option<(Value, Provenance)>> {
        let requested = self.context.compliance.clone();

        'quorums: for quorum in committee.eligible(&requested) {
            let mut inputs = Inputs::new();
            for need in quorum.required() {
                match self.resolve(need)? {
                    Some(value) => inputs.insert(need, value),
                    None => {
                        trace!(
                            session = %self.id,
                            quantity = committee.quantity(),
                            quorum = quorum.label(),
                            missing = %need,
                            "quorum skipped"
                        );
                        continue 'quorums;
                    }
                }
            }
            for wanted in quorum.optional() {
                if let Some(value) = self.resolve(wanted)? {
                    inputs.insert(wanted, value);
                }
            }

            self.stats.evaluations += 1;
            match quorum.evaluate(&inputs, &self.context) {
                Some(value) => {
                    debug!(
                        session = %self.id,
                        quantity = committee.quantity(),
                        quorum = quorum.label(),
                        "quorum selected"
                    );
                    let used = inputs.names().map(str::to_string).collect();
                    let provenance =
                        Provenance::quorum(quorum.label(), quorum.compliance().clone(), used);
                    return Ok(Some((value, provenance)));
                }
                None => trace!(
                    session = %self.id,
                    quantity = committee.quantity(),
                    quorum = quorum.label(),
                    "quorum could not compute"
                ),
            }
        }

        Ok(None)
    }

    fn settle(&mut self, name: &str, decided: Option<(Value, Provenance)>) {
        let slot = match decided {
            Some((value, provenance)) => {
                self.provenance.insert(name.to_string(), provenance);
                Slot::Resolved(value)
            }
            None => Slot::Unresolvable,
        };
        self.cache.insert(name.to_string(), slot);
    }

    /// Provenance of every resolved quantity reachable from `roots`.
    fn trace(&self, roots: &[&str]) -> BTreeMap<String, Provenance> {
        let mut trace = BTreeMap::new();
        let mut pending: Vec<&str> = roots.to_vec();
        while let Some(name) = pending.pop() {
            if trace.contains_key(name) {
                continue;
            }
            if let Some(provenance) = self.provenance.get(name) {
                pending.extend(provenance.inputs.iter().map(String::as_str));
                trace.insert(name.to_string(), provenance.clone());
            }
        }
        trace
    }
}

/// Standards satisfied by every method in a trace. Client input satisfies all.
fn achieved_compliance<'a>(entries: impl Iterator<Item = &'a Provenance>) -> ComplianceSet {
    entries.fold(Standard::all(), |acc, p| match &p.method {
        Method::ClientInput => acc,
        Method::Quorum { complies, .. } => acc.intersection(complies).copied().collect(),
    })
}
