//! Quantity declarations and input coercion.

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};
use crate::value::{EntityRef, Value};

/// The declared type of a quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuantityKind {
    Number,
    Text,
    Date,
    /// A key into the named reference dataset.
    Entity(String),
    Table,
    Record,
}

impl fmt::Display for QuantityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuantityKind::Number => write!(f, "number"),
            QuantityKind::Text => write!(f, "text"),
            QuantityKind::Date => write!(f, "date (YYYY-MM-DD)"),
            QuantityKind::Entity(kind) => write!(f, "{kind} key"),
            QuantityKind::Table => write!(f, "table of numbers"),
            QuantityKind::Record => write!(f, "record"),
        }
    }
}

/// A named, typed value in the estimation graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quantity {
    pub name: String,
    pub kind: QuantityKind,
    /// Unit of measurement, if the quantity has one.
    pub unit: Option<String>,
    pub description: String,
}

impl Quantity {
    pub fn new(name: &str, kind: QuantityKind, description: &str) -> Self {
        Self {
            name: name.to_string(),
            kind,
            unit: None,
            description: description.to_string(),
        }
    }

    pub fn number(name: &str, unit: &str, description: &str) -> Self {
        Self::new(name, QuantityKind::Number, description).with_unit(unit)
    }

    pub fn entity(name: &str, dataset: &str, description: &str) -> Self {
        Self::new(name, QuantityKind::Entity(dataset.to_string()), description)
    }

    pub fn with_unit(mut self, unit: &str) -> Self {
        self.unit = Some(unit.to_string());
        self
    }

    /// Coerce a raw client value into this quantity's type.
    ///
    /// `null` means "unknown" and yields `Ok(None)`.
    pub fn coerce(&self, raw: &serde_json::Value) -> Result<Option<Value>> {
        use serde_json::Value as Json;

        if raw.is_null() {
            return Ok(None);
        }

        let value = match (&self.kind, raw) {
            (QuantityKind::Number, Json::Number(n)) => n.as_f64().map(Value::Number),
            (QuantityKind::Number, Json::String(s)) => {
                s.trim()
                    .parse::<f64>()
                    .ok()
                    .filter(|n| n.is_finite())
                    .map(Value::Number)
            }
            (QuantityKind::Text, Json::String(s)) => Some(Value::Text(s.clone())),
            (QuantityKind::Text, Json::Number(n)) => Some(Value::Text(n.to_string())),
            (QuantityKind::Date, Json::String(s)) => NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
                .ok()
                .map(Value::Date),
            (QuantityKind::Entity(kind), Json::String(s)) if !s.trim().is_empty() => {
                Some(Value::Entity(EntityRef::new(kind.as_str(), s.trim())))
            }
            (QuantityKind::Entity(kind), Json::Number(n)) if n.is_u64() || n.is_i64() => {
                Some(Value::Entity(EntityRef::new(kind.as_str(), n.to_string())))
            }
            (QuantityKind::Table, Json::Object(map)) => map
                .iter()
                .map(|(k, v)| v.as_f64().map(|n| (k.clone(), n)))
                .collect::<Option<BTreeMap<_, _>>>()
                .map(Value::Table),
            (QuantityKind::Record, Json::Object(map)) => Some(Value::Record(
                map.iter()
                    .filter_map(|(k, v)| record_field(v).map(|f| (k.clone(), f)))
                    .collect(),
            )),
            _ => None,
        };

        value.map(Some).ok_or_else(|| EngineError::InputType {
            quantity: self.name.clone(),
            expected: self.kind.to_string(),
            found: raw.to_string(),
        })
    }
}

fn record_field(raw: &serde_json::Value) -> Option<Value> {
    match raw {
        serde_json::Value::Number(n) => n.as_f64().map(Value::Number),
        serde_json::Value::String(s) => Some(Value::Text(s.clone())),
        serde_json::Value::Bool(b) => Some(Value::Text(b.to_string())),
        _ => None,
    }
}
