//! Row types for every reference table.
//!
//! Units follow the estimation model: energy content in MJ per native unit,
//! emission factors in kg CO2e per native unit (m³ natural gas, l fuel oil,
//! kWh electricity, MJ district heat), intensities per room-night.

use serde::{Deserialize, Serialize};

use crate::cohort::Attributes;

/// A row with a unique key inside its table.
pub trait Keyed {
    /// Table name used in dataset files and error messages.
    const TABLE: &'static str;

    fn key(&self) -> String;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fuel {
    pub name: String,
    /// kg CO2 per native unit.
    pub co2_emission_factor: f64,
    /// MJ per native unit.
    pub energy_content: f64,
}

impl Fuel {
    /// kg CO2 per MJ.
    pub fn energy_emission_factor(&self) -> Option<f64> {
        (self.energy_content > 0.0).then(|| self.co2_emission_factor / self.energy_content)
    }
}

impl Keyed for Fuel {
    const TABLE: &'static str = "fuels";
    fn key(&self) -> String {
        self.name.clone()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EgridSubregion {
    pub abbreviation: String,
    pub egrid_region: String,
    /// kg CO2e per kWh generated.
    pub electricity_emission_factor: f64,
}

impl Keyed for EgridSubregion {
    const TABLE: &'static str = "egrid-subregions";
    fn key(&self) -> String {
        self.abbreviation.clone()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EgridRegion {
    pub name: String,
    /// Transmission and distribution loss, as a fraction.
    pub loss_factor: f64,
}

impl Keyed for EgridRegion {
    const TABLE: &'static str = "egrid-regions";
    fn key(&self) -> String {
        self.name.clone()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZipCode {
    pub name: String,
    pub state: String,
    pub egrid_subregion: String,
    #[serde(default)]
    pub climate_division: Option<String>,
}

impl Keyed for ZipCode {
    const TABLE: &'static str = "zip-codes";
    fn key(&self) -> String {
        self.name.clone()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct State {
    pub postal_abbreviation: String,
    pub census_division: u32,
}

impl Keyed for State {
    const TABLE: &'static str = "states";
    fn key(&self) -> String {
        self.postal_abbreviation.clone()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CensusDivision {
    pub number: u32,
    pub name: String,
    pub lodging_building_natural_gas_intensity: f64,
    pub lodging_building_fuel_oil_intensity: f64,
    pub lodging_building_electricity_intensity: f64,
    pub lodging_building_district_heat_intensity: f64,
}

impl Keyed for CensusDivision {
    const TABLE: &'static str = "census-divisions";
    fn key(&self) -> String {
        self.number.to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClimateDivision {
    pub name: String,
    pub heating_degree_days: f64,
    pub cooling_degree_days: f64,
}

impl Keyed for ClimateDivision {
    const TABLE: &'static str = "climate-divisions";
    fn key(&self) -> String {
        self.name.clone()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Country {
    pub iso_3166_code: String,
    pub name: String,
    #[serde(default)]
    pub electricity_emission_factor: Option<f64>,
    #[serde(default)]
    pub electricity_loss_factor: Option<f64>,
}

impl Keyed for Country {
    const TABLE: &'static str = "countries";
    fn key(&self) -> String {
        self.iso_3166_code.clone()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LodgingClass {
    pub name: String,
    pub natural_gas_intensity: f64,
    pub fuel_oil_intensity: f64,
    pub electricity_intensity: f64,
    pub district_heat_intensity: f64,
    /// Litres per room-night.
    #[serde(default)]
    pub water_use_intensity: Option<f64>,
}

impl Keyed for LodgingClass {
    const TABLE: &'static str = "lodging-classes";
    fn key(&self) -> String {
        self.name.clone()
    }
}

/// Fuel intensities for one lodging class in one country.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryLodgingClass {
    pub country: String,
    pub lodging_class: String,
    pub natural_gas_intensity: f64,
    pub fuel_oil_intensity: f64,
    pub electricity_intensity: f64,
    pub district_heat_intensity: f64,
}

impl CountryLodgingClass {
    pub fn key_for(country: &str, lodging_class: &str) -> String {
        format!("{country} {lodging_class}")
    }
}

impl Keyed for CountryLodgingClass {
    const TABLE: &'static str = "country-lodging-classes";
    fn key(&self) -> String {
        Self::key_for(&self.country, &self.lodging_class)
    }
}

/// A specific hotel, motel, or similar property.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LodgingProperty {
    pub northstar_id: String,
    pub name: String,
    pub city: Option<String>,
    /// State, province, or similar.
    pub locality: Option<String>,
    pub postcode: Option<String>,
    pub country: Option<String>,
    pub lodging_rooms: Option<f64>,
    pub floors: Option<f64>,
    pub construction_year: Option<f64>,
    pub lodging_class: Option<String>,
    /// Fraction of the building that is air-conditioned.
    pub ac_coverage: Option<f64>,
    /// Fraction of rooms with a mini-fridge.
    pub refrigerator_coverage: Option<f64>,
    pub hot_tubs: Option<f64>,
    pub indoor_pools: Option<f64>,
    pub outdoor_pools: Option<f64>,
}

impl Keyed for LodgingProperty {
    const TABLE: &'static str = "lodging-properties";
    fn key(&self) -> String {
        self.northstar_id.clone()
    }
}

/// One lodging building from the Commercial Buildings Energy Consumption Survey.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CbecsResponse {
    pub id: String,
    pub census_division: u32,
    pub heating_degree_days: f64,
    pub cooling_degree_days: f64,
    #[serde(default)]
    pub lodging_rooms: Option<f64>,
    #[serde(default)]
    pub floors: Option<f64>,
    #[serde(default)]
    pub construction_year: Option<f64>,
    #[serde(default)]
    pub percent_cooled: Option<f64>,
    /// Survey weight supplied by the dataset authors.
    #[serde(default = "unit_weight")]
    pub weighting: f64,
    pub natural_gas_per_room_night: f64,
    pub fuel_oil_per_room_night: f64,
    pub electricity_per_room_night: f64,
    pub district_heat_per_room_night: f64,
}

fn unit_weight() -> f64 {
    1.0
}

impl Keyed for CbecsResponse {
    const TABLE: &'static str = "cbecs-responses";
    fn key(&self) -> String {
        self.id.clone()
    }
}

impl Attributes for CbecsResponse {
    fn number(&self, attribute: &str) -> Option<f64> {
        match attribute {
            "census_division" => Some(f64::from(self.census_division)),
            "heating_degree_days" => Some(self.heating_degree_days),
            "cooling_degree_days" => Some(self.cooling_degree_days),
            "lodging_rooms" => self.lodging_rooms,
            "floors" => self.floors,
            "construction_year" => self.construction_year,
            "percent_cooled" => self.percent_cooled,
            "weighting" => Some(self.weighting),
            "natural_gas_per_room_night" => Some(self.natural_gas_per_room_night),
            "fuel_oil_per_room_night" => Some(self.fuel_oil_per_room_night),
            "electricity_per_room_night" => Some(self.electricity_per_room_night),
            "district_heat_per_room_night" => Some(self.district_heat_per_room_night),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn energy_emission_factor_divides_by_content() {
        let gas = Fuel {
            name: "Pipeline Natural Gas".into(),
            co2_emission_factor: 2.0,
            energy_content: 40.0,
        };
        assert_relative_eq!(gas.energy_emission_factor().unwrap(), 0.05);

        let empty = Fuel {
            energy_content: 0.0,
            ..gas
        };
        assert!(empty.energy_emission_factor().is_none());
    }

    #[test]
    fn country_lodging_class_key_joins_parts() {
        assert_eq!(CountryLodgingClass::key_for("GB", "Average"), "GB Average");
    }

    #[test]
    fn cbecs_attributes_by_name() {
        let r: CbecsResponse = toml::from_str(
            r#"
id = "1"
census_division = 9
heating_degree_days = 2000
cooling_degree_days = 800
lodging_rooms = 120
natural_gas_per_room_night = 1.0
fuel_oil_per_room_night = 0.0
electricity_per_room_night = 20.0
district_heat_per_room_night = 0.0
"#,
        )
        .unwrap();
        assert_eq!(r.number("census_division"), Some(9.0));
        assert_eq!(r.number("lodging_rooms"), Some(120.0));
        assert_eq!(r.number("floors"), None);
        assert_eq!(r.number("weighting"), Some(1.0));
        assert_eq!(r.number("minibar"), None);
    }
}
