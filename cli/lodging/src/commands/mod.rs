//! CLI command implementations.

pub mod check;
pub mod estimate;
pub mod methodology;

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use lodging_model::{Lodging, ModelConfig};
use lodging_reference::ReferenceData;

use crate::manifest::LodgingManifest;

/// Resolve the dataset path (CLI flag > manifest `[data] reference`).
pub fn reference_path(
    data: Option<&str>,
    manifest: Option<&LodgingManifest>,
    manifest_dir: Option<&Path>,
) -> Option<PathBuf> {
    if let Some(path) = data {
        return Some(PathBuf::from(path));
    }
    let (manifest, dir) = (manifest?, manifest_dir?);
    manifest.reference_path(dir)
}

pub fn load_reference(path: &Path) -> Result<ReferenceData> {
    ReferenceData::load(path).with_context(|| format!("loading reference data {}", path.display()))
}

/// Build the model, requiring a dataset.
pub fn load_model(path: Option<PathBuf>, manifest: Option<&LodgingManifest>) -> Result<Lodging> {
    let Some(path) = path else {
        bail!("no reference data: pass --data or set [data] reference in lodging.toml");
    };
    let reference = load_reference(&path)?;
    Ok(Lodging::new(reference, model_config(manifest))?)
}

pub fn model_config(manifest: Option<&LodgingManifest>) -> ModelConfig {
    manifest.map(|m| m.model.clone()).unwrap_or_default()
}
