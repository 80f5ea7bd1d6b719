//! A small, internally consistent reference dataset for model tests.

use lodging_reference::ReferenceData;

pub const REFERENCE: &str = r#"
[[fuels]]
name = "Pipeline Natural Gas"
co2_emission_factor = 2.0
energy_content = 40.0

[[fuels]]
name = "Distillate Fuel Oil No. 2"
co2_emission_factor = 2.5
energy_content = 50.0

[[egrid-regions]]
name = "W"
loss_factor = 0.1

[[egrid-regions]]
name = "US"
loss_factor = 0.05

[[egrid-subregions]]
abbreviation = "CAMX"
egrid_region = "W"
electricity_emission_factor = 0.5

[[egrid-subregions]]
abbreviation = "US"
egrid_region = "US"
electricity_emission_factor = 0.6

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

[[climate-divisions]]
name = "CA04"
heating_degree_days = 2000.0
cooling_degree_days = 500.0

[[zip-codes]]
name = "94122"
state = "CA"
egrid_subregion = "CAMX"
climate_division = "CA04"

[[countries]]
iso_3166_code = "US"
name = "United States"

[[countries]]
iso_3166_code = "GB"
name = "United Kingdom"
electricity_emission_factor = 0.45
electricity_loss_factor = 0.08

[[lodging-classes]]
name = "Average"
natural_gas_intensity = 1.5
fuel_oil_intensity = 0.2
electricity_intensity = 25.0
district_heat_intensity = 4.0
water_use_intensity = 500.0

[[lodging-classes]]
name = "Luxury Hotel"
natural_gas_intensity = 3.0
fuel_oil_intensity = 0.0
electricity_intensity = 40.0
district_heat_intensity = 0.0
water_use_intensity = 900.0

[[country-lodging-classes]]
country = "GB"
lodging_class = "Average"
natural_gas_intensity = 2.0
fuel_oil_intensity = 0.5
electricity_intensity = 30.0
district_heat_intensity = 0.0

[[lodging-properties]]
northstar_id = "cliff-house"
name = "Cliff House Inn"
city = "San Francisco"
locality = "CA"
postcode = "94122"
country = "US"
lodging_rooms = 40.0
floors = 3.0
construction_year = 1990.0
lodging_class = "Luxury Hotel"
ac_coverage = 0.5
refrigerator_coverage = 1.0
hot_tubs = 1.0

[[lodging-properties]]
northstar_id = "budget-inn"
name = "Budget Inn"
city = "San Francisco"
locality = "CA"
postcode = "94122"
country = "US"
lodging_rooms = 10.0
refrigerator_coverage = 0.0
hot_tubs = 1.3

[[lodging-properties]]
northstar_id = "grand-sf"
name = "Grand Hotel"
city = "San Francisco"
locality = "CA"
postcode = "94122"
country = "US"

[[lodging-properties]]
northstar_id = "grand-sf-annex"
name = "Grand Hotel"
city = "San Francisco"
locality = "CA"
postcode = "94122"
country = "US"

[[lodging-properties]]
northstar_id = "grand-london"
name = "Grand Hotel"
city = "London"
country = "GB"

[[geocodes]]
query = "San Francisco, CA"
latitude = 37.76
longitude = -122.49
zip_code = "94122"
state = "CA"
country = "US"

[[geocodes]]
query = "London"
latitude = 51.51
longitude = -0.13
country = "GB"
"#;

pub fn reference() -> ReferenceData {
    ReferenceData::from_toml_str(REFERENCE).unwrap()
}
