//! Cohort narrowing over survey records.
//!
//! Criteria are ordered from most general to most specific. If too few
//! records match all of them, the last criterion is dropped and the query
//! retried, until the cohort is large enough or no criteria remain.

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Numeric attribute access for records that can join a cohort.
pub trait Attributes {
    fn number(&self, attribute: &str) -> Option<f64>;
}

/// One match condition. A record missing the attribute never matches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Criterion {
    Equals { attribute: String, value: f64 },
    /// `min <= x < max`.
    Within { attribute: String, min: f64, max: f64 },
}

impl Criterion {
    pub fn equals(attribute: &str, value: f64) -> Self {
        Criterion::Equals {
            attribute: attribute.to_string(),
            value,
        }
    }

    pub fn within(attribute: &str, min: f64, max: f64) -> Self {
        Criterion::Within {
            attribute: attribute.to_string(),
            min,
            max,
        }
    }

    pub fn attribute(&self) -> &str {
        match self {
            Criterion::Equals { attribute, .. } | Criterion::Within { attribute, .. } => attribute,
        }
    }

    pub fn matches<R: Attributes + ?Sized>(&self, record: &R) -> bool {
        let Some(x) = record.number(self.attribute()) else {
            return false;
        };
        match self {
            Criterion::Equals { value, .. } => x == *value,
            Criterion::Within { min, max, .. } => *min <= x && x < *max,
        }
    }
}

/// Select the largest-specificity cohort with at least `min_count` members.
///
/// Returns `None` only when the population itself is empty. When even a
/// single criterion leaves too few records, the whole population is the
/// cohort.
pub fn narrow<'a, R: Attributes>(
    population: &'a [R],
    criteria: &[Criterion],
    min_count: usize,
) -> Option<Vec<&'a R>> {
    if population.is_empty() {
        return None;
    }
    for kept in (1..=criteria.len()).rev() {
        let active = &criteria[..kept];
        let cohort: Vec<&R> = population
            .iter()
            .filter(|r| active.iter().all(|c| c.matches(*r)))
            .collect();
        if cohort.len() >= min_count {
            debug!(criteria = kept, size = cohort.len(), "cohort selected");
            return Some(cohort);
        }
    }
    debug!(size = population.len(), "cohort fell back to full population");
    Some(population.iter().collect())
}
