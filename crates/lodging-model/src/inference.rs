//! Energy inference collaborator.

use std::collections::BTreeMap;
use std::sync::Arc;

use lodging_reference::fuzzy::{self, energy_use_membership};
use lodging_reference::{narrow, Criterion, ReferenceData};
use tracing::debug;

use crate::intensity::FuelIntensities;

/// Survey columns the inference estimates, in fuel order.
pub const TARGETS: [&str; 4] = [
    "natural_gas_per_room_night",
    "fuel_oil_per_room_night",
    "electricity_per_room_night",
    "district_heat_per_room_night",
];

/// Statistical estimate of fuel intensities from building characteristics.
///
/// `basis` uses survey column names (`heating_degree_days`,
/// `cooling_degree_days`, `lodging_rooms`, `floors`, `construction_year`,
/// `percent_cooled`). `criteria` select the comparison cohort, most
/// general first.
pub trait EnergyInference: Send + Sync {
    fn infer(&self, basis: &BTreeMap<String, f64>, criteria: &[Criterion]) -> Option<FuelIntensities>;
}

/// Fuzzy inference over CBECS lodging responses.
#[derive(Debug, Clone)]
pub struct CbecsInference {
    reference: Arc<ReferenceData>,
    min_cohort: usize,
}

impl CbecsInference {
    pub fn new(reference: Arc<ReferenceData>, min_cohort: usize) -> Self {
        Self {
            reference,
            min_cohort,
        }
    }
}

impl EnergyInference for CbecsInference {
    fn infer(&self, basis: &BTreeMap<String, f64>, criteria: &[Criterion]) -> Option<FuelIntensities> {
        let cohort = narrow(self.reference.cbecs_responses(), criteria, self.min_cohort)?;
        debug!(cohort = cohort.len(), basis = basis.len(), "fuzzy inference");
        let estimates = fuzzy::infer(
            &cohort,
            basis,
            &TARGETS,
            energy_use_membership,
            Some("weighting"),
        )?;
        // Every target must be estimated; a partial table would read as zero use.
        let [ng, fo, el, dh] = TARGETS.map(|t| estimates.get(t).copied());
        Some(FuelIntensities::new(ng?, fo?, el?, dh?))
    }
}

/// Half-open size bucket containing a room count, used as a cohort criterion.
pub fn rooms_range(rooms: f64) -> (f64, f64) {
    const BOUNDS: [f64; 7] = [0.0, 20.0, 50.0, 100.0, 200.0, 500.0, f64::INFINITY];
    BOUNDS
        .windows(2)
        .map(|w| (w[0], w[1]))
        .find(|(min, max)| *min <= rooms && rooms < *max)
        .unwrap_or((0.0, f64::INFINITY))
}
