//! The lodging impact model.
//!
//! Estimates the greenhouse gas emissions of a hotel stay, plus the energy
//! and water it used, from whatever the client knows about it. Every
//! derivable quantity has a committee of alternative methods; the engine in
//! `lodging-core` picks the best one the available facts allow.
//!
//! ```text
//! Lodging::new(reference, config)?
//!     .with_geocoder(geocoder)?
//!     .estimate(&characteristics, context)?
//! ```

pub mod adjustment;
pub mod committees;
pub mod config;
pub mod error;
pub mod inference;
pub mod intensity;
pub mod quantities;

#[cfg(test)]
mod fixtures;

use std::sync::Arc;

use lodging_core::{Characteristics, Context, EngineError, Registry, Report, Session};
use lodging_reference::{Geocoder, ReferenceData, StaticGeocoder};
use serde::Serialize;
use tracing::info;

use committees::{build_registry, Sources};

pub use config::ModelConfig;
pub use error::{ModelError, Result};
pub use inference::{CbecsInference, EnergyInference};
pub use intensity::FuelIntensities;

/// Impacts of one stay.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Estimate {
    /// kg CO2e.
    pub carbon: f64,
    /// MJ, when the fuel intensities resolved.
    pub energy: Option<f64>,
    /// Litres, when a water use intensity resolved.
    pub water_use: Option<f64>,
    pub report: Report,
}

/// A validated registry plus the sources its quorums consult.
pub struct Lodging {
    registry: Registry,
    sources: Arc<Sources>,
}

impl Lodging {
    /// Build the model over `reference` with the default collaborators: a
    /// geocoder over the dataset's `geocodes` table and CBECS fuzzy inference.
    pub fn new(reference: impl Into<Arc<ReferenceData>>, config: ModelConfig) -> Result<Self> {
        config.validate()?;
        let reference = reference.into();
        let geocoder: Arc<dyn Geocoder> =
            Arc::new(StaticGeocoder::new(reference.geocodes().to_vec()));
        let inference: Arc<dyn EnergyInference> =
            Arc::new(CbecsInference::new(Arc::clone(&reference), config.min_cohort));
        Self::build(Sources {
            reference,
            config,
            geocoder,
            inference,
        })
    }

    pub fn with_geocoder(self, geocoder: Arc<dyn Geocoder>) -> Result<Self> {
        let Sources {
            reference,
            config,
            inference,
            ..
        } = self.into_sources();
        Self::build(Sources {
            reference,
            config,
            geocoder,
            inference,
        })
    }

    pub fn with_inference(self, inference: Arc<dyn EnergyInference>) -> Result<Self> {
        let Sources {
            reference,
            config,
            geocoder,
            ..
        } = self.into_sources();
        Self::build(Sources {
            reference,
            config,
            geocoder,
            inference,
        })
    }

    fn build(sources: Sources) -> Result<Self> {
        let sources = Arc::new(sources);
        let registry = build_registry(&sources)?;
        Ok(Self { registry, sources })
    }

    /// Recover the sources for rebuilding. Quorum closures hold clones of
    /// the `Arc`, so drop the registry first.
    fn into_sources(self) -> Sources {
        let Self { registry, sources } = self;
        drop(registry);
        match Arc::try_unwrap(sources) {
            Ok(sources) => sources,
            Err(shared) => Sources {
                reference: Arc::clone(&shared.reference),
                config: shared.config.clone(),
                geocoder: Arc::clone(&shared.geocoder),
                inference: Arc::clone(&shared.inference),
            },
        }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn config(&self) -> &ModelConfig {
        &self.sources.config
    }

    pub fn reference(&self) -> &ReferenceData {
        &self.sources.reference
    }

    /// Coerce raw client input against the model's declarations.
    pub fn ingest(&self, raw: &serde_json::Map<String, serde_json::Value>) -> Result<Characteristics> {
        Ok(Characteristics::ingest(&self.registry, raw)?)
    }

    /// Estimate carbon, energy, and water use.
    pub fn estimate(&self, characteristics: &Characteristics, context: Context) -> Result<Estimate> {
        self.estimate_with(characteristics, context, &[])
    }

    /// Like [`estimate`](Self::estimate), also reporting `extra` quantities.
    ///
    /// Extras are best effort: one that cannot be resolved is reported as
    /// unresolved rather than failing the estimate.
    pub fn estimate_with(
        &self,
        characteristics: &Characteristics,
        context: Context,
        extra: &[&str],
    ) -> Result<Estimate> {
        if let Some(unknown) = extra.iter().find(|q| self.registry.quantity(q).is_none()) {
            return Err(EngineError::UnknownQuantity(unknown.to_string()).into());
        }

        let mut session = Session::new(&self.registry, characteristics.clone(), context);
        let carbon = session.decide(quantities::CARBON)?;
        let carbon = carbon.as_number().ok_or_else(|| EngineError::InvalidCommittee {
            quantity: quantities::CARBON.to_string(),
            detail: format!("produced {} instead of a number", carbon.type_name()),
        })?;

        let energy = session.resolve("energy")?.and_then(|v| v.as_number());
        let water_use = session.resolve("water_use")?.and_then(|v| v.as_number());
        for name in extra {
            session.resolve(name)?;
        }

        let mut roots = vec![quantities::CARBON];
        roots.extend(quantities::AUXILIARY);
        for name in extra {
            if !roots.contains(name) {
                roots.push(name);
            }
        }
        let report = session.report(&roots);

        info!(
            session = %session.id(),
            carbon,
            energy = ?energy,
            water_use = ?water_use,
            compliance = ?report.compliance,
            "estimate complete"
        );
        Ok(Estimate {
            carbon,
            energy,
            water_use,
            report,
        })
    }
}
