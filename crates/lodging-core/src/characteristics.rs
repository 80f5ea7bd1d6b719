//! The characteristics store: client-supplied facts about one subject.

use std::collections::BTreeMap;

use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::error::{EngineError, Result};
use crate::registry::Registry;
use crate::value::Value;

/// Known facts about one estimation subject, keyed by quantity name.
///
/// A value present here pre-empts every quorum of the matching committee.
/// The store is filled before a session starts and is read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Characteristics {
    values: BTreeMap<String, Value>,
}

impl Characteristics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ingest raw client input, coercing each field to its declared type.
    ///
    /// Fails on the first field whose name is not a declared quantity or
    /// whose value cannot be coerced. `null` fields are treated as unknown.
    pub fn ingest(
        registry: &Registry,
        raw: &serde_json::Map<String, serde_json::Value>,
    ) -> Result<Self> {
        let mut characteristics = Self::new();
        for (name, raw_value) in raw {
            let quantity = registry
                .quantity(name)
                .ok_or_else(|| EngineError::UnknownQuantity(name.clone()))?;
            if let Some(value) = quantity.coerce(raw_value)? {
                characteristics.values.insert(name.clone(), value);
            }
        }
        Ok(characteristics)
    }

    /// Set an already-typed value.
    pub fn insert(&mut self, name: &str, value: impl Into<Value>) -> &mut Self {
        self.values.insert(name.to_string(), value.into());
        self
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    /// The client-supplied value, or `None` when missing.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    pub fn has(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// SHA-256 of the canonical JSON form, for tying reports to inputs.
    pub fn digest(&self) -> String {
        let mut hasher = Sha256::new();
        // BTreeMap keeps key order stable.
        match serde_json::to_vec(&self.values) {
            Ok(bytes) => hasher.update(&bytes),
            Err(_) => hasher.update(format!("{:?}", self.values).as_bytes()),
        }
        format!("{:x}", hasher.finalize())
    }
}
