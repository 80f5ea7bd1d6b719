//! `lodging check`: validate reference data and the model registry.

use std::path::Path;

use anyhow::Result;
use lodging_model::{Lodging, ModelConfig};

use super::load_reference;

pub fn run(path: &Path, config: ModelConfig) -> Result<()> {
    print!("{}", render(path, config)?);
    Ok(())
}

/// Load and validate everything, then summarize table sizes.
pub fn render(path: &Path, config: ModelConfig) -> Result<String> {
    let reference = load_reference(path)?;
    let counts = reference.counts();
    let model = Lodging::new(reference, config)?;

    let mut out = String::new();
    out.push_str(&format!("reference data: {}\n", path.display()));
    for (table, count) in counts {
        out.push_str(&format!("  {table:<24} {count:>6}\n"));
    }
    out.push_str(&format!(
        "model: {} quantities, {} committees, graph ok\n",
        model.registry().quantities().count(),
        model.registry().committees().count()
    ));
    Ok(out)
}
