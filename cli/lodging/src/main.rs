//! Lodging CLI: estimate the emissions of hotel stays from the command line.

mod commands;
mod manifest;

use std::path::{Path, PathBuf};
use std::process;

use anyhow::bail;
use clap::{Parser, Subcommand};
use lodging_model::Lodging;
use lodging_reference::ReferenceData;
use tracing_subscriber::EnvFilter;

use manifest::LodgingManifest;

#[derive(Parser)]
#[command(name = "lodging", version, about = "Lodging emission estimates")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Estimate carbon, energy, and water use for one stay
    Estimate {
        /// Stay characteristics (.toml or .json)
        #[arg(long)]
        input: PathBuf,
        /// Reference dataset (default: [data] reference in lodging.toml)
        #[arg(long)]
        data: Option<String>,
        /// Required standards, comma separated (ghg_protocol_scope_3, iso, tcr)
        #[arg(long)]
        comply: Vec<String>,
        /// Timeframe as START/END or a year (default: current year)
        #[arg(long)]
        timeframe: Option<String>,
        /// Output format (human, json)
        #[arg(long)]
        format: Option<String>,
        /// Additional quantity to report; repeatable
        #[arg(long = "quantity")]
        quantities: Vec<String>,
    },
    /// Show how each quantity can be computed
    Methodology {
        /// Show only this quantity's committee
        #[arg(long)]
        quantity: Option<String>,
    },
    /// Validate reference data and the model
    Check {
        /// Reference dataset (default: [data] reference in lodging.toml)
        #[arg(long)]
        data: Option<String>,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();

    let cli = Cli::parse();

    let result = run(cli);
    if let Err(e) = result {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let cwd = std::env::current_dir()?;
    let (manifest, manifest_dir) = load_manifest_optional(&cwd)?;
    let manifest = manifest.as_ref();

    match cli.command {
        Commands::Estimate {
            input,
            data,
            comply,
            timeframe,
            format,
            quantities,
        } => {
            let path = commands::reference_path(data.as_deref(), manifest, manifest_dir.as_deref());
            let model = commands::load_model(path, manifest)?;
            commands::estimate::run(
                &model,
                manifest,
                &input,
                &comply,
                timeframe.as_deref(),
                format.as_deref(),
                &quantities,
            )
        }

        Commands::Methodology { quantity } => {
            // Committees do not depend on the data, only on the configuration.
            let model = Lodging::new(ReferenceData::default(), commands::model_config(manifest))?;
            commands::methodology::run(model.registry(), quantity.as_deref())
        }

        Commands::Check { data } => {
            let Some(path) =
                commands::reference_path(data.as_deref(), manifest, manifest_dir.as_deref())
            else {
                bail!("no reference data: pass --data or set [data] reference in lodging.toml");
            };
            commands::check::run(&path, commands::model_config(manifest))
        }
    }
}

fn load_manifest_optional(cwd: &Path) -> anyhow::Result<(Option<LodgingManifest>, Option<PathBuf>)> {
    match LodgingManifest::find_and_load(cwd)? {
        Some((manifest, dir)) => Ok((Some(manifest), Some(dir))),
        None => Ok((None, None)),
    }
}

#[cfg(test)]
mod integration_tests {
    use super::*;
    use std::fs;

    const REFERENCE: &str = r#"
[[fuels]]
name = "Pipeline Natural Gas"
co2_emission_factor = 2.0
energy_content = 40.0

[[fuels]]
name = "Distillate Fuel Oil No. 2"
co2_emission_factor = 2.5
energy_content = 50.0

[[egrid-regions]]
name = "US"
loss_factor = 0.05

[[egrid-subregions]]
abbreviation = "US"
egrid_region = "US"
electricity_emission_factor = 0.6

[[lodging-classes]]
name = "Average"
natural_gas_intensity = 1.5
fuel_oil_intensity = 0.2
electricity_intensity = 25.0
district_heat_intensity = 4.0
water_use_intensity = 500.0
"#;

    /// Manifest, dataset, and stay in one project directory.
    fn project() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("reference.toml"), REFERENCE).unwrap();
        fs::write(
            dir.path().join(manifest::MANIFEST_FILE),
            "[data]\nreference = \"reference.toml\"\n\n[estimate]\ntimeframe = \"2026\"\n",
        )
        .unwrap();
        fs::write(
            dir.path().join("stay.toml"),
            "rooms = 2\nduration = 86400\ndate = 2026-04-10\n",
        )
        .unwrap();
        dir
    }

    #[test]
    fn estimate_from_manifest_project() {
        let dir = project();
        let (manifest, found) = load_manifest_optional(dir.path()).unwrap();
        let manifest = manifest.unwrap();
        let path = commands::reference_path(None, Some(&manifest), found.as_deref());
        let model = commands::load_model(path, Some(&manifest)).unwrap();

        let raw = commands::estimate::read_input(&dir.path().join("stay.toml")).unwrap();
        let characteristics = model.ingest(&raw).unwrap();
        let context = commands::estimate::estimation_context(Some(&manifest), &[], None).unwrap();
        let estimate = model.estimate(&characteristics, context).unwrap();

        assert!(estimate.carbon > 0.0);
        assert_eq!(estimate.water_use, Some(1000.0));

        let json = commands::estimate::render(&estimate, Some("json")).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["water_use"], serde_json::json!(1000.0));
        assert!(commands::estimate::render(&estimate, Some("yaml")).is_err());
    }

    #[test]
    fn missing_reference_is_an_error() {
        let err = commands::load_model(None, None).err().unwrap();
        assert!(err.to_string().contains("no reference data"));
    }

    #[test]
    fn mistyped_input_fails_before_estimating() {
        let dir = project();
        fs::write(dir.path().join("stay.toml"), "rooms = \"two\"\n").unwrap();
        let path = dir.path().join("reference.toml");
        let model = commands::load_model(Some(path), None).unwrap();
        let raw = commands::estimate::read_input(&dir.path().join("stay.toml")).unwrap();
        assert!(model.ingest(&raw).is_err());
    }

    #[test]
    fn data_flag_wins_over_manifest() {
        let dir = project();
        let (manifest, found) = load_manifest_optional(dir.path()).unwrap();
        let path = commands::reference_path(Some("other.toml"), manifest.as_ref(), found.as_deref());
        assert_eq!(path, Some(PathBuf::from("other.toml")));
    }
}
