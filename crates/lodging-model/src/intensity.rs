//! Per-room-night fuel intensities and their table encoding.

use std::collections::BTreeMap;

use lodging_core::Value;
use lodging_reference::records::{CensusDivision, CountryLodgingClass, LodgingClass};

pub const NATURAL_GAS: &str = "natural_gas";
pub const FUEL_OIL: &str = "fuel_oil";
pub const ELECTRICITY: &str = "electricity";
pub const DISTRICT_HEAT: &str = "district_heat";

/// MJ per kWh.
pub const MJ_PER_KWH: f64 = 3.6;

/// Fuel use per room-night: m³ natural gas, l fuel oil, kWh electricity,
/// MJ district heat. Also used for signed deltas.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FuelIntensities {
    pub natural_gas: f64,
    pub fuel_oil: f64,
    pub electricity: f64,
    pub district_heat: f64,
}

impl FuelIntensities {
    pub const fn new(natural_gas: f64, fuel_oil: f64, electricity: f64, district_heat: f64) -> Self {
        Self {
            natural_gas,
            fuel_oil,
            electricity,
            district_heat,
        }
    }

    /// Read a table value. Missing fuels count as zero.
    pub fn from_table(table: &BTreeMap<String, f64>) -> Self {
        let get = |fuel: &str| table.get(fuel).copied().unwrap_or(0.0);
        Self::new(get(NATURAL_GAS), get(FUEL_OIL), get(ELECTRICITY), get(DISTRICT_HEAT))
    }

    pub fn from_value(value: &Value) -> Option<Self> {
        value.as_table().map(Self::from_table)
    }

    pub fn to_table(self) -> BTreeMap<String, f64> {
        self.fuels()
            .into_iter()
            .map(|(fuel, v)| (fuel.to_string(), v))
            .collect()
    }

    pub fn to_value(self) -> Value {
        Value::Table(self.to_table())
    }

    pub fn fuels(self) -> [(&'static str, f64); 4] {
        [
            (NATURAL_GAS, self.natural_gas),
            (FUEL_OIL, self.fuel_oil),
            (ELECTRICITY, self.electricity),
            (DISTRICT_HEAT, self.district_heat),
        ]
    }

    /// Apply `f` to each fuel pairwise.
    pub fn zip_with(self, other: Self, f: impl Fn(f64, f64) -> f64) -> Self {
        Self::new(
            f(self.natural_gas, other.natural_gas),
            f(self.fuel_oil, other.fuel_oil),
            f(self.electricity, other.electricity),
            f(self.district_heat, other.district_heat),
        )
    }

    /// Total energy in MJ given natural gas and fuel oil energy content.
    pub fn energy(self, natural_gas_content: f64, fuel_oil_content: f64) -> f64 {
        self.natural_gas * natural_gas_content
            + self.fuel_oil * fuel_oil_content
            + self.electricity * MJ_PER_KWH
            + self.district_heat
    }
}

impl From<&LodgingClass> for FuelIntensities {
    fn from(c: &LodgingClass) -> Self {
        Self::new(
            c.natural_gas_intensity,
            c.fuel_oil_intensity,
            c.electricity_intensity,
            c.district_heat_intensity,
        )
    }
}

impl From<&CensusDivision> for FuelIntensities {
    fn from(d: &CensusDivision) -> Self {
        Self::new(
            d.lodging_building_natural_gas_intensity,
            d.lodging_building_fuel_oil_intensity,
            d.lodging_building_electricity_intensity,
            d.lodging_building_district_heat_intensity,
        )
    }
}

impl From<&CountryLodgingClass> for FuelIntensities {
    fn from(c: &CountryLodgingClass) -> Self {
        Self::new(
            c.natural_gas_intensity,
            c.fuel_oil_intensity,
            c.electricity_intensity,
            c.district_heat_intensity,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn table_encoding_keeps_every_fuel() {
        let fi = FuelIntensities::new(1.0, 0.5, 20.0, 4.0);
        let back = FuelIntensities::from_value(&fi.to_value()).unwrap();
        assert_eq!(back, fi);
        assert_eq!(fi.to_table().len(), 4);
    }

    #[test]
    fn missing_fuels_read_as_zero() {
        let table: BTreeMap<String, f64> = [(ELECTRICITY.to_string(), 7.0)].into_iter().collect();
        assert_eq!(
            FuelIntensities::from_table(&table),
            FuelIntensities::new(0.0, 0.0, 7.0, 0.0)
        );
        assert!(FuelIntensities::from_value(&Value::Number(1.0)).is_none());
    }

    #[test]
    fn energy_converts_electricity() {
        let fi = FuelIntensities::new(1.0, 2.0, 10.0, 5.0);
        // 1*40 + 2*50 + 10*3.6 + 5
        assert_relative_eq!(fi.energy(40.0, 50.0), 181.0);
    }
}
