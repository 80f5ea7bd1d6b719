//! `lodging.toml` manifest parsing and project configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use lodging_core::Standard;
use lodging_model::ModelConfig;
use serde::{Deserialize, Serialize};

pub const MANIFEST_FILE: &str = "lodging.toml";

/// The top-level manifest for an estimation project.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LodgingManifest {
    #[serde(default)]
    pub project: ProjectConfig,
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub estimate: EstimateConfig,
    /// Domain constants; every field has a default.
    #[serde(default)]
    pub model: ModelConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectConfig {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Where reference data lives.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DataConfig {
    /// Dataset file, relative to the manifest's directory.
    #[serde(default)]
    pub reference: Option<PathBuf>,
}

/// Defaults for `lodging estimate`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EstimateConfig {
    #[serde(default)]
    pub compliance: Vec<Standard>,
    /// `START/END` or a bare year.
    #[serde(default)]
    pub timeframe: Option<String>,
}

impl LodgingManifest {
    /// Search upward from `start_dir` for a `lodging.toml` file, parse and
    /// return it along with the directory it was found in.
    pub fn find_and_load(start_dir: &Path) -> Result<Option<(Self, PathBuf)>> {
        let mut dir = start_dir.to_path_buf();
        loop {
            let candidate = dir.join(MANIFEST_FILE);
            if candidate.is_file() {
                let content = std::fs::read_to_string(&candidate)
                    .with_context(|| format!("reading {}", candidate.display()))?;
                let manifest: LodgingManifest = toml::from_str(&content)
                    .with_context(|| format!("parsing {}", candidate.display()))?;
                manifest
                    .model
                    .validate()
                    .with_context(|| format!("validating [model] in {}", candidate.display()))?;
                return Ok(Some((manifest, dir)));
            }
            if !dir.pop() {
                break;
            }
        }
        Ok(None)
    }

    /// Parse a manifest from a TOML string.
    #[cfg(test)]
    pub fn from_str(s: &str) -> Result<Self> {
        toml::from_str(s).context("parsing lodging.toml")
    }

    /// The reference dataset path, resolved against the manifest directory.
    pub fn reference_path(&self, manifest_dir: &Path) -> Option<PathBuf> {
        self.data
            .reference
            .as_ref()
            .map(|p| if p.is_absolute() { p.clone() } else { manifest_dir.join(p) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_full_manifest() {
        let manifest = LodgingManifest::from_str(
            r#"
[project]
name = "travel-2026"

[data]
reference = "data/reference.toml"

[estimate]
compliance = ["iso", "tcr"]
timeframe = "2026"

[model]
min-cohort = 12

[model.amenities.hot-tub]
average = 0.5
"#,
        )
        .unwrap();

        assert_eq!(manifest.project.name.as_deref(), Some("travel-2026"));
        assert_eq!(manifest.estimate.compliance, vec![Standard::Iso, Standard::Tcr]);
        assert_eq!(manifest.model.min_cohort, 12);
        assert_eq!(manifest.model.amenities.hot_tub.average, 0.5);
        assert_eq!(manifest.model.amenities.hot_tub.electricity, 10.0);
        assert_eq!(manifest.model.default_lodging_class, "Average");
        assert_eq!(
            manifest.reference_path(Path::new("/projects/travel")),
            Some(PathBuf::from("/projects/travel/data/reference.toml"))
        );
    }

    #[test]
    fn empty_manifest_uses_defaults() {
        let manifest = LodgingManifest::from_str("").unwrap();
        assert!(manifest.estimate.compliance.is_empty());
        assert!(manifest.reference_path(Path::new("/tmp")).is_none());
        assert_eq!(manifest.model, ModelConfig::default());
    }

    #[test]
    fn unknown_standard_is_rejected() {
        assert!(LodgingManifest::from_str("[estimate]\ncompliance = [\"epa\"]\n").is_err());
    }

    #[test]
    fn find_and_load_searches_upward() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(MANIFEST_FILE),
            "[data]\nreference = \"reference.toml\"\n",
        )
        .unwrap();
        let nested = dir.path().join("stays").join("2026");
        std::fs::create_dir_all(&nested).unwrap();

        let (manifest, found) = LodgingManifest::find_and_load(&nested).unwrap().unwrap();
        assert_eq!(found, dir.path());
        assert_eq!(
            manifest.reference_path(&found),
            Some(dir.path().join("reference.toml"))
        );
    }

    #[test]
    fn invalid_model_section_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(MANIFEST_FILE), "[model]\nmin-cohort = 0\n").unwrap();
        assert!(LodgingManifest::find_and_load(dir.path()).is_err());
    }
}
