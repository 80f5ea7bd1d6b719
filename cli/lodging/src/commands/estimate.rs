//! `lodging estimate`: estimate the impacts of one stay.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use lodging_core::{Context as Estimation, Standard, Timeframe};
use lodging_model::{Estimate, Lodging};
use serde_json::{Map, Value as Json};

use crate::manifest::LodgingManifest;

/// Estimate a stay described by `input` and print the report.
pub fn run(
    model: &Lodging,
    manifest: Option<&LodgingManifest>,
    input: &Path,
    comply: &[String],
    timeframe: Option<&str>,
    format: Option<&str>,
    quantities: &[String],
) -> Result<()> {
    let raw = read_input(input)?;
    let characteristics = model
        .ingest(&raw)
        .with_context(|| format!("reading characteristics from {}", input.display()))?;
    let context = estimation_context(manifest, comply, timeframe)?;

    let extra: Vec<&str> = quantities.iter().map(String::as_str).collect();
    let estimate = model.estimate_with(&characteristics, context, &extra)?;
    print!("{}", render(&estimate, format)?);
    Ok(())
}

/// Timeframe and compliance (CLI flags > manifest `[estimate]` > current year, none).
pub fn estimation_context(
    manifest: Option<&LodgingManifest>,
    comply: &[String],
    timeframe: Option<&str>,
) -> Result<Estimation> {
    let defaults = manifest.map(|m| &m.estimate);

    let timeframe = match timeframe.or_else(|| defaults.and_then(|d| d.timeframe.as_deref())) {
        Some(s) => s.parse::<Timeframe>().map_err(anyhow::Error::msg)?,
        None => Timeframe::current_year(),
    };

    let mut standards = Vec::new();
    for item in comply.iter().flat_map(|s| s.split(',')) {
        let item = item.trim();
        if !item.is_empty() {
            standards.push(item.parse::<Standard>().map_err(anyhow::Error::msg)?);
        }
    }
    if comply.is_empty() {
        standards.extend(defaults.map(|d| d.compliance.clone()).unwrap_or_default());
    }

    Ok(Estimation::new(timeframe).complying_with(standards))
}

pub fn render(estimate: &Estimate, format: Option<&str>) -> Result<String> {
    match format.unwrap_or("human") {
        "human" => Ok(estimate.report.to_text()),
        "json" => Ok(serde_json::to_string_pretty(estimate)? + "\n"),
        other => bail!("unknown format '{other}' (expected human or json)"),
    }
}

/// Read a stay description: a flat table of quantity names to values, as
/// `.json` or TOML.
pub fn read_input(path: &Path) -> Result<Map<String, Json>> {
    let content =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let value = if path.extension().is_some_and(|e| e == "json") {
        serde_json::from_str(&content).with_context(|| format!("parsing {}", path.display()))?
    } else {
        let table: toml::Table =
            toml::from_str(&content).with_context(|| format!("parsing {}", path.display()))?;
        to_json(toml::Value::Table(table))
    };
    match value {
        Json::Object(map) => Ok(map),
        _ => bail!("{}: expected a table of characteristics", path.display()),
    }
}

/// TOML dates become ISO strings so they coerce like JSON input.
fn to_json(value: toml::Value) -> Json {
    match value {
        toml::Value::String(s) => Json::String(s),
        toml::Value::Integer(i) => Json::from(i),
        toml::Value::Float(f) => serde_json::Number::from_f64(f).map_or(Json::Null, Json::Number),
        toml::Value::Boolean(b) => Json::Bool(b),
        toml::Value::Datetime(d) => Json::String(d.to_string()),
        toml::Value::Array(items) => Json::Array(items.into_iter().map(to_json).collect()),
        toml::Value::Table(table) => {
            Json::Object(table.into_iter().map(|(k, v)| (k, to_json(v))).collect())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::EstimateConfig;

    #[test]
    fn toml_input_becomes_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stay.toml");
        fs::write(
            &path,
            "zip_code = \"94122\"\nrooms = 2\nduration = 172800.0\ndate = 2026-03-01\n",
        )
        .unwrap();

        let raw = read_input(&path).unwrap();
        assert_eq!(raw["zip_code"], Json::from("94122"));
        assert_eq!(raw["rooms"], Json::from(2));
        assert_eq!(raw["date"], Json::from("2026-03-01"));
    }

    #[test]
    fn json_input_must_be_an_object() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stay.json");
        fs::write(&path, "[1, 2]").unwrap();
        assert!(read_input(&path).is_err());

        fs::write(&path, r#"{"rooms": 3}"#).unwrap();
        assert_eq!(read_input(&path).unwrap()["rooms"], Json::from(3));
    }

    #[test]
    fn flags_override_manifest_defaults() {
        let manifest = LodgingManifest {
            estimate: EstimateConfig {
                compliance: vec![Standard::Tcr],
                timeframe: Some("2025".into()),
            },
            ..Default::default()
        };

        let context = estimation_context(Some(&manifest), &[], None).unwrap();
        assert_eq!(context.timeframe, Timeframe::year(2025).unwrap());
        assert!(context.compliance.contains(&Standard::Tcr));

        let flags = vec!["iso,ghg".to_string()];
        let context = estimation_context(Some(&manifest), &flags, Some("2026")).unwrap();
        assert_eq!(context.timeframe, Timeframe::year(2026).unwrap());
        assert_eq!(context.compliance.len(), 2);
        assert!(!context.compliance.contains(&Standard::Tcr));
    }

    #[test]
    fn bad_flags_are_errors() {
        assert!(estimation_context(None, &["epa".to_string()], None).is_err());
        assert!(estimation_context(None, &[], Some("2026-13-01/2027-01-01")).is_err());
    }
}
