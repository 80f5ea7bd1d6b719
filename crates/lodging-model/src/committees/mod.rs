//! Every committee of the lodging model, grouped by concern.
//!
//! Quorums reach reference data and collaborators through a shared
//! [`Sources`]. A lookup that misses makes the quorum decline, so the
//! committee falls through to its next method.

mod activity;
mod energy;
mod location;
mod property;

use std::sync::Arc;

use lodging_core::{Committee, Context, Inputs, Registry, Result, Standard, Value};
use lodging_reference::{Geocoder, ReferenceData};

use crate::config::ModelConfig;
use crate::inference::EnergyInference;
use crate::quantities;

pub use energy::district_heat_emission_factor;

/// Methods that satisfy every supported standard.
const ALL: &[Standard] = &Standard::ALL;

/// Seconds in one night of stay.
pub const SECONDS_PER_NIGHT: f64 = 86_400.0;

/// What quorum computations may consult.
pub(crate) struct Sources {
    pub reference: Arc<ReferenceData>,
    pub config: ModelConfig,
    pub geocoder: Arc<dyn Geocoder>,
    pub inference: Arc<dyn EnergyInference>,
}

/// Wrap a computation that needs [`Sources`] into a quorum compute function.
fn using<F>(
    sources: &Arc<Sources>,
    compute: F,
) -> impl Fn(&Inputs, &Context) -> Option<Value> + Send + Sync + 'static
where
    F: Fn(&Sources, &Inputs, &Context) -> Option<Value> + Send + Sync + 'static,
{
    let sources = Arc::clone(sources);
    move |inputs, context| compute(&sources, inputs, context)
}

fn committees(sources: &Arc<Sources>) -> Vec<Committee> {
    let mut all = activity::committees(sources);
    all.extend(energy::committees(sources));
    all.extend(location::committees(sources));
    all.extend(property::committees(sources));
    all
}

/// Declare every quantity, register every committee, and validate the graph.
pub(crate) fn build_registry(sources: &Arc<Sources>) -> Result<Registry> {
    let mut registry = Registry::new();
    quantities::declare_all(&mut registry);
    for committee in committees(sources) {
        registry.register(committee)?;
    }
    registry.validate()?;
    Ok(registry)
}
