//! Model configuration: the domain constants the committees use.
//!
//! Every field has a default, so an empty `[model]` table is valid.

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ModelConfig {
    /// Lodging class used when nothing better is known.
    pub default_lodging_class: String,
    /// eGRID subregion representing the national grid average.
    pub default_egrid_subregion: String,
    /// Fuel record used for natural gas.
    pub natural_gas_fuel: String,
    /// Fuel record used for fuel oil.
    pub fuel_oil_fuel: String,
    pub district_heat: DistrictHeat,
    /// Smallest acceptable CBECS cohort before criteria are relaxed.
    pub min_cohort: usize,
    pub amenities: Amenities,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            default_lodging_class: "Average".into(),
            default_egrid_subregion: "US".into(),
            natural_gas_fuel: "Pipeline Natural Gas".into(),
            fuel_oil_fuel: "Distillate Fuel Oil No. 2".into(),
            district_heat: DistrictHeat::default(),
            min_cohort: 8,
            amenities: Amenities::default(),
        }
    }
}

/// Efficiencies used to derive a district heat emission factor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct DistrictHeat {
    pub natural_gas_boiler_efficiency: f64,
    pub fuel_oil_boiler_efficiency: f64,
    pub distribution_efficiency: f64,
}

impl Default for DistrictHeat {
    fn default() -> Self {
        Self {
            natural_gas_boiler_efficiency: 0.817,
            fuel_oil_boiler_efficiency: 0.846,
            distribution_efficiency: 0.95,
        }
    }
}

/// Population average and extra fuel use of one amenity.
///
/// Pool and hot tub coefficients are per unit per property-night; the
/// refrigerator coefficient is per room-night at full coverage.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct Amenity {
    pub average: f64,
    /// m³ natural gas.
    pub natural_gas: f64,
    /// kWh electricity.
    pub electricity: f64,
}

impl Amenity {
    const fn new(average: f64, natural_gas: f64, electricity: f64) -> Self {
        Self {
            average,
            natural_gas,
            electricity,
        }
    }
}

/// Amenity coefficients. A partially given table only replaces the fields
/// it names; the rest keep that amenity's defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "AmenityTables", rename_all = "kebab-case")]
pub struct Amenities {
    pub refrigerator: Amenity,
    pub hot_tub: Amenity,
    pub indoor_pool: Amenity,
    pub outdoor_pool: Amenity,
}

impl Default for Amenities {
    fn default() -> Self {
        Self {
            refrigerator: Amenity::new(0.6, 0.0, 1.3),
            hot_tub: Amenity::new(0.3, 3.0, 10.0),
            indoor_pool: Amenity::new(0.3, 28.0, 105.0),
            outdoor_pool: Amenity::new(0.6, 14.0, 43.0),
        }
    }
}

#[derive(Deserialize, Default)]
#[serde(default, rename_all = "kebab-case")]
struct AmenityTables {
    refrigerator: AmenityTable,
    hot_tub: AmenityTable,
    indoor_pool: AmenityTable,
    outdoor_pool: AmenityTable,
}

#[derive(Deserialize, Default)]
#[serde(default, rename_all = "kebab-case")]
struct AmenityTable {
    average: Option<f64>,
    natural_gas: Option<f64>,
    electricity: Option<f64>,
}

impl AmenityTable {
    fn over(self, base: Amenity) -> Amenity {
        Amenity {
            average: self.average.unwrap_or(base.average),
            natural_gas: self.natural_gas.unwrap_or(base.natural_gas),
            electricity: self.electricity.unwrap_or(base.electricity),
        }
    }
}

impl From<AmenityTables> for Amenities {
    fn from(tables: AmenityTables) -> Self {
        let base = Amenities::default();
        Self {
            refrigerator: tables.refrigerator.over(base.refrigerator),
            hot_tub: tables.hot_tub.over(base.hot_tub),
            indoor_pool: tables.indoor_pool.over(base.indoor_pool),
            outdoor_pool: tables.outdoor_pool.over(base.outdoor_pool),
        }
    }
}

impl ModelConfig {
    /// Reject values that would make the formulas divide by zero.
    pub fn validate(&self) -> Result<()> {
        let dh = &self.district_heat;
        let efficiencies = [
            ("natural-gas-boiler-efficiency", dh.natural_gas_boiler_efficiency),
            ("fuel-oil-boiler-efficiency", dh.fuel_oil_boiler_efficiency),
            ("distribution-efficiency", dh.distribution_efficiency),
        ];
        for (name, value) in efficiencies {
            if !(value > 0.0 && value <= 1.0) {
                return Err(ModelError::InvalidConfig {
                    detail: format!("district-heat.{name} must be in (0, 1], got {value}"),
                });
            }
        }
        if self.min_cohort == 0 {
            return Err(ModelError::InvalidConfig {
                detail: "min-cohort must be at least 1".into(),
            });
        }
        Ok(())
    }
}
