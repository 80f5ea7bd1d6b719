//! Loading, indexing, and validating a reference dataset.
//!
//! A dataset is one TOML or JSON document with one array per table:
//!
//! ```toml
//! [[fuels]]
//! name = "Pipeline Natural Gas"
//! co2_emission_factor = 1.92
//! energy_content = 38.3
//!
//! [[egrid-subregions]]
//! abbreviation = "CAMX"
//! egrid_region = "W"
//! electricity_emission_factor = 0.3
//! ```
//!
//! Missing tables are empty. Keys must be unique per table and every
//! cross-table reference must resolve.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{ReferenceError, Result};
use crate::geocode::Geocode;
use crate::records::*;

/// The on-disk shape of a dataset.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct RawReferenceData {
    pub fuels: Vec<Fuel>,
    pub egrid_subregions: Vec<EgridSubregion>,
    pub egrid_regions: Vec<EgridRegion>,
    pub zip_codes: Vec<ZipCode>,
    pub states: Vec<State>,
    pub census_divisions: Vec<CensusDivision>,
    pub climate_divisions: Vec<ClimateDivision>,
    pub countries: Vec<Country>,
    pub lodging_classes: Vec<LodgingClass>,
    pub country_lodging_classes: Vec<CountryLodgingClass>,
    pub lodging_properties: Vec<LodgingProperty>,
    pub cbecs_responses: Vec<CbecsResponse>,
    pub geocodes: Vec<Geocode>,
}

/// Indexed, validated, read-only reference tables.
#[derive(Debug, Clone, Default)]
pub struct ReferenceData {
    fuels: BTreeMap<String, Fuel>,
    egrid_subregions: BTreeMap<String, EgridSubregion>,
    egrid_regions: BTreeMap<String, EgridRegion>,
    zip_codes: BTreeMap<String, ZipCode>,
    states: BTreeMap<String, State>,
    census_divisions: BTreeMap<String, CensusDivision>,
    climate_divisions: BTreeMap<String, ClimateDivision>,
    countries: BTreeMap<String, Country>,
    lodging_classes: BTreeMap<String, LodgingClass>,
    country_lodging_classes: BTreeMap<String, CountryLodgingClass>,
    lodging_properties: BTreeMap<String, LodgingProperty>,
    cbecs_responses: Vec<CbecsResponse>,
    geocodes: Vec<Geocode>,
}

impl ReferenceData {
    /// Load a dataset file. `.json` files are parsed as JSON, anything else as TOML.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ReferenceError::NotFound {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path)?;
        let data = match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json_str(&content)?,
            _ => Self::from_toml_str(&content)?,
        };
        info!(path = %path.display(), "reference data loaded");
        Ok(data)
    }

    pub fn from_toml_str(s: &str) -> Result<Self> {
        let raw: RawReferenceData = toml::from_str(s)?;
        Self::from_raw(raw)
    }

    pub fn from_json_str(s: &str) -> Result<Self> {
        let raw: RawReferenceData = serde_json::from_str(s)?;
        Self::from_raw(raw)
    }

    /// Index every table and check cross-table references.
    pub fn from_raw(raw: RawReferenceData) -> Result<Self> {
        let cbecs_responses = raw.cbecs_responses;
        index(cbecs_responses.iter().cloned())?;

        let data = Self {
            fuels: index(raw.fuels)?,
            egrid_subregions: index(raw.egrid_subregions)?,
            egrid_regions: index(raw.egrid_regions)?,
            zip_codes: index(raw.zip_codes)?,
            states: index(raw.states)?,
            census_divisions: index(raw.census_divisions)?,
            climate_divisions: index(raw.climate_divisions)?,
            countries: index(raw.countries)?,
            lodging_classes: index(raw.lodging_classes)?,
            country_lodging_classes: index(raw.country_lodging_classes)?,
            lodging_properties: index(raw.lodging_properties)?,
            cbecs_responses,
            geocodes: raw.geocodes,
        };
        data.validate()?;
        debug!(tables = ?data.counts(), "reference data indexed");
        Ok(data)
    }

    fn validate(&self) -> Result<()> {
        let mut issues = Vec::new();
        let mut dangling = |table: &str, key: &str, field: &str, target: &str, ok: bool| {
            if !ok {
                issues.push(format!("{table} '{key}': {field} references unknown {target}"));
            }
        };

        for z in self.zip_codes.values() {
            dangling("zip code", &z.name, "state", "state", self.states.contains_key(&z.state));
            dangling(
                "zip code",
                &z.name,
                "egrid_subregion",
                "eGRID subregion",
                self.egrid_subregions.contains_key(&z.egrid_subregion),
            );
            if let Some(cd) = &z.climate_division {
                dangling(
                    "zip code",
                    &z.name,
                    "climate_division",
                    "climate division",
                    self.climate_divisions.contains_key(cd),
                );
            }
        }
        for s in self.egrid_subregions.values() {
            dangling(
                "eGRID subregion",
                &s.abbreviation,
                "egrid_region",
                "eGRID region",
                self.egrid_regions.contains_key(&s.egrid_region),
            );
        }
        for s in self.states.values() {
            dangling(
                "state",
                &s.postal_abbreviation,
                "census_division",
                "census division",
                self.census_divisions.contains_key(&s.census_division.to_string()),
            );
        }
        for c in self.country_lodging_classes.values() {
            let key = c.key();
            dangling("country lodging class", &key, "country", "country", self.countries.contains_key(&c.country));
            dangling(
                "country lodging class",
                &key,
                "lodging_class",
                "lodging class",
                self.lodging_classes.contains_key(&c.lodging_class),
            );
        }
        for p in self.lodging_properties.values() {
            if let Some(class) = &p.lodging_class {
                dangling(
                    "lodging property",
                    &p.northstar_id,
                    "lodging_class",
                    "lodging class",
                    self.lodging_classes.contains_key(class),
                );
            }
        }

        for r in self.egrid_regions.values() {
            if !(0.0..1.0).contains(&r.loss_factor) {
                issues.push(format!("eGRID region '{}': loss_factor must be in [0, 1)", r.name));
            }
        }
        for c in self.countries.values() {
            if let Some(loss) = c.electricity_loss_factor {
                if !(0.0..1.0).contains(&loss) {
                    issues.push(format!(
                        "country '{}': electricity_loss_factor must be in [0, 1)",
                        c.iso_3166_code
                    ));
                }
            }
        }

        if issues.is_empty() {
            Ok(())
        } else {
            Err(ReferenceError::Validation {
                detail: issues.join("; "),
            })
        }
    }

    pub fn fuel(&self, name: &str) -> Option<&Fuel> {
        self.fuels.get(name)
    }

    pub fn egrid_subregion(&self, abbreviation: &str) -> Option<&EgridSubregion> {
        self.egrid_subregions.get(abbreviation)
    }

    pub fn egrid_region(&self, name: &str) -> Option<&EgridRegion> {
        self.egrid_regions.get(name)
    }

    pub fn zip_code(&self, name: &str) -> Option<&ZipCode> {
        self.zip_codes.get(name)
    }

    pub fn state(&self, postal_abbreviation: &str) -> Option<&State> {
        self.states.get(postal_abbreviation)
    }

    /// Census divisions are keyed by their number in decimal.
    pub fn census_division(&self, number: &str) -> Option<&CensusDivision> {
        self.census_divisions.get(number)
    }

    pub fn climate_division(&self, name: &str) -> Option<&ClimateDivision> {
        self.climate_divisions.get(name)
    }

    pub fn country(&self, iso_3166_code: &str) -> Option<&Country> {
        self.countries.get(iso_3166_code)
    }

    pub fn lodging_class(&self, name: &str) -> Option<&LodgingClass> {
        self.lodging_classes.get(name)
    }

    pub fn country_lodging_class(&self, country: &str, lodging_class: &str) -> Option<&CountryLodgingClass> {
        self.country_lodging_classes
            .get(&CountryLodgingClass::key_for(country, lodging_class))
    }

    pub fn lodging_property(&self, northstar_id: &str) -> Option<&LodgingProperty> {
        self.lodging_properties.get(northstar_id)
    }

    pub fn lodging_properties(&self) -> impl Iterator<Item = &LodgingProperty> {
        self.lodging_properties.values()
    }

    pub fn cbecs_responses(&self) -> &[CbecsResponse] {
        &self.cbecs_responses
    }

    pub fn geocodes(&self) -> &[Geocode] {
        &self.geocodes
    }

    /// Row counts per table, in file order.
    pub fn counts(&self) -> Vec<(&'static str, usize)> {
        vec![
            (Fuel::TABLE, self.fuels.len()),
            (EgridSubregion::TABLE, self.egrid_subregions.len()),
            (EgridRegion::TABLE, self.egrid_regions.len()),
            (ZipCode::TABLE, self.zip_codes.len()),
            (State::TABLE, self.states.len()),
            (CensusDivision::TABLE, self.census_divisions.len()),
            (ClimateDivision::TABLE, self.climate_divisions.len()),
            (Country::TABLE, self.countries.len()),
            (LodgingClass::TABLE, self.lodging_classes.len()),
            (CountryLodgingClass::TABLE, self.country_lodging_classes.len()),
            (LodgingProperty::TABLE, self.lodging_properties.len()),
            (CbecsResponse::TABLE, self.cbecs_responses.len()),
            ("geocodes", self.geocodes.len()),
        ]
    }
}

fn index<R: Keyed>(rows: impl IntoIterator<Item = R>) -> Result<BTreeMap<String, R>> {
    let mut table = BTreeMap::new();
    for row in rows {
        let key = row.key();
        if table.contains_key(&key) {
            return Err(ReferenceError::DuplicateKey {
                table: R::TABLE,
                key,
            });
        }
        table.insert(key, row);
    }
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SMALL: &str = r#"
[[fuels]]
name = "Pipeline Natural Gas"
co2_emission_factor = 2.0
energy_content = 40.0

[[egrid-regions]]
name = "W"
loss_factor = 0.1

[[egrid-subregions]]
abbreviation = "CAMX"
egrid_region = "W"
electricity_emission_factor = 0.5

[[census-divisions]]
number = 9
name = "Pacific"
lodging_building_natural_gas_intensity = 1.0
lodging_building_fuel_oil_intensity = 0.1
lodging_building_electricity_intensity = 20.0
lodging_building_district_heat_intensity = 5.0

[[states]]
postal_abbreviation = "CA"
census_division = 9

[[zip-codes]]
name = "94122"
state = "CA"
egrid_subregion = "CAMX"
"#;

    #[test]
    fn parse_and_index_toml() {
        let data = ReferenceData::from_toml_str(SMALL).unwrap();
        assert_eq!(data.zip_code("94122").unwrap().state, "CA");
        assert_eq!(data.census_division("9").unwrap().name, "Pacific");
        assert!(data.fuel("Coal").is_none());
        assert!(data.cbecs_responses().is_empty());
        let counts: BTreeMap<_, _> = data.counts().into_iter().collect();
        assert_eq!(counts["zip-codes"], 1);
        assert_eq!(counts["lodging-classes"], 0);
    }

    #[test]
    fn parse_json() {
        let json = r#"{
            "egrid-regions": [{"name": "US", "loss_factor": 0.05}],
            "egrid-subregions": [{"abbreviation": "US", "egrid_region": "US", "electricity_emission_factor": 0.6}]
        }"#;
        let data = ReferenceData::from_json_str(json).unwrap();
        assert_eq!(data.egrid_region("US").unwrap().loss_factor, 0.05);
    }

    #[test]
    fn duplicate_keys_are_rejected() {
        let doubled = format!(
            "{SMALL}\n[[states]]\npostal_abbreviation = \"CA\"\ncensus_division = 9\n"
        );
        match ReferenceData::from_toml_str(&doubled).unwrap_err() {
            ReferenceError::DuplicateKey { table, key } => {
                assert_eq!(table, "states");
                assert_eq!(key, "CA");
            }
            other => panic!("expected duplicate key, got {other}"),
        }
    }

    #[test]
    fn dangling_references_are_reported_together() {
        let broken = format!(
            "{SMALL}\n[[zip-codes]]\nname = \"05753\"\nstate = \"VT\"\negrid_subregion = \"NEWE\"\n"
        );
        match ReferenceData::from_toml_str(&broken).unwrap_err() {
            ReferenceError::Validation { detail } => {
                assert!(detail.contains("'05753': state references unknown state"));
                assert!(detail.contains("eGRID subregion"));
            }
            other => panic!("expected validation error, got {other}"),
        }
    }

    #[test]
    fn load_dispatches_on_extension() {
        let dir = tempfile::tempdir().unwrap();
        let toml_path = dir.path().join("reference.toml");
        std::fs::write(&toml_path, SMALL).unwrap();
        assert!(ReferenceData::load(&toml_path).is_ok());

        let json_path = dir.path().join("reference.json");
        std::fs::write(&json_path, r#"{"fuels": []}"#).unwrap();
        assert!(ReferenceData::load(&json_path).is_ok());

        let missing = dir.path().join("nope.toml");
        assert!(matches!(
            ReferenceData::load(&missing),
            Err(ReferenceError::NotFound { .. })
        ));
    }
}
