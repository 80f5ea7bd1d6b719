//! Quantity declarations for the lodging model.
//!
//! Declarations fix each quantity's type, so they also define what a client
//! may supply and how raw input is coerced.

use lodging_core::{Quantity, QuantityKind, Registry};

/// The primary result.
pub const CARBON: &str = "carbon";
/// Auxiliary results reported alongside carbon.
pub const AUXILIARY: [&str; 2] = ["energy", "water_use"];

fn table(name: &str, unit: &str, description: &str) -> Quantity {
    Quantity::new(name, QuantityKind::Table, description).with_unit(unit)
}

fn text(name: &str, description: &str) -> Quantity {
    Quantity::new(name, QuantityKind::Text, description)
}

/// Every quantity the model knows about.
pub fn all() -> Vec<Quantity> {
    vec![
        // impacts
        Quantity::number("carbon", "kg CO2e", "Greenhouse gas emissions during the timeframe"),
        Quantity::number("emission", "kg CO2e", "Greenhouse gas emissions (legacy name for carbon)"),
        Quantity::number("energy", "MJ", "Energy used during the timeframe"),
        Quantity::number("water_use", "l", "Water used during the timeframe"),
        // activity
        Quantity::number("room_nights", "room-nights", "Room-nights within the timeframe"),
        Quantity::new("date", QuantityKind::Date, "Day the stay began"),
        Quantity::number("rooms", "rooms", "Rooms occupied"),
        Quantity::number("duration", "s", "Length of the stay"),
        // factors and intensities
        Quantity::number("emission_factor", "kg CO2e / room-night", "Emissions per occupied room per night"),
        Quantity::number("electricity_emission_factor", "kg CO2e / kWh", "Emissions per kWh delivered"),
        Quantity::number("water_use_intensity", "l / room-night", "Water use per occupied room per night"),
        table(
            "fuel_intensities",
            "per room-night",
            "Natural gas (m3), fuel oil (l), electricity (kWh), and district heat (MJ) per room-night",
        ),
        table(
            "adjusted_fuel_intensities",
            "per room-night",
            "Fuel intensities after amenity adjustments",
        ),
        table("refrigerator_adjustment", "per room-night", "Fuel change from mini-fridge coverage"),
        table("hot_tub_adjustment", "per room-night", "Fuel change from hot tubs"),
        table("indoor_pool_adjustment", "per room-night", "Fuel change from indoor pools"),
        table("outdoor_pool_adjustment", "per room-night", "Fuel change from outdoor pools"),
        // climate
        Quantity::number("heating_degree_days", "°F-days", "Annual heating degree days"),
        Quantity::number("cooling_degree_days", "°F-days", "Annual cooling degree days"),
        Quantity::entity("climate_division", "climate_division", "NOAA climate division"),
        // property
        text("lodging_property_name", "Name of the hotel, motel, or similar"),
        Quantity::entity("lodging_property", "lodging_property", "The specific property"),
        Quantity::entity("lodging_class", "lodging_class", "Hotel, motel, inn, and so on"),
        Quantity::number("property_rooms", "rooms", "Rooms in the property"),
        Quantity::number("floors", "floors", "Floors in the property"),
        Quantity::number("construction_year", "year", "Year the property was built"),
        Quantity::number("ac_coverage", "fraction", "Share of the property that is air-conditioned"),
        Quantity::number("refrigerator_coverage", "fraction", "Share of rooms with a mini-fridge"),
        Quantity::number("hot_tubs", "count", "Hot tubs at the property"),
        Quantity::number("indoor_pools", "count", "Indoor pools at the property"),
        Quantity::number("outdoor_pools", "count", "Outdoor pools at the property"),
        // location
        text("city", "City of the property"),
        text("locality", "State, province, or region of the property"),
        Quantity::new("geocoded_location", QuantityKind::Record, "Location found for city and locality"),
        Quantity::entity("zip_code", "zip_code", "US zip code"),
        Quantity::entity("state", "state", "US state postal abbreviation"),
        Quantity::entity("country", "country", "ISO 3166 country code"),
        Quantity::entity("census_division", "census_division", "US census division number"),
        Quantity::entity("egrid_subregion", "egrid_subregion", "eGRID subregion abbreviation"),
        Quantity::entity("egrid_region", "egrid_region", "eGRID region name"),
    ]
}

pub fn declare_all(registry: &mut Registry) {
    for quantity in all() {
        registry.declare(quantity);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn names_are_unique() {
        let quantities = all();
        let names: HashSet<_> = quantities.iter().map(|q| q.name.as_str()).collect();
        assert_eq!(names.len(), quantities.len());
        assert!(names.contains(CARBON));
        assert!(AUXILIARY.iter().all(|n| names.contains(n)));
    }
}
