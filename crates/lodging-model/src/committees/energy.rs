//! Emission factors, fuel intensities, and amenity adjustments.

use std::collections::BTreeMap;
use std::sync::Arc;

use lodging_core::{Committee, Inputs, Quorum, Value};
use lodging_reference::records::Fuel;
use lodging_reference::Criterion;

use super::{using, Sources, ALL};
use crate::adjustment;
use crate::config::{Amenity, DistrictHeat, ModelConfig};
use crate::inference::rooms_range;
use crate::intensity::FuelIntensities;

/// Adjustments applied to the base intensities, in application order.
const ADJUSTMENTS: [&str; 4] = [
    "refrigerator_adjustment",
    "hot_tub_adjustment",
    "indoor_pool_adjustment",
    "outdoor_pool_adjustment",
];

pub(super) fn committees(s: &Arc<Sources>) -> Vec<Committee> {
    vec![
        emission_factor(s),
        electricity_emission_factor(s),
        fuel_intensities(s),
        adjusted_fuel_intensities(),
        refrigerator_adjustment(s),
        per_property_adjustment(s, "hot_tub_adjustment", "hot_tubs", hot_tub),
        per_property_adjustment(s, "indoor_pool_adjustment", "indoor_pools", indoor_pool),
        per_property_adjustment(s, "outdoor_pool_adjustment", "outdoor_pools", outdoor_pool),
        water_use_intensity(s),
    ]
}

/// kg CO2 per MJ of district heat, from the fuels that typically fire it.
///
/// Averages the natural gas and fuel oil energy-based factors after boiler
/// losses, then divides by distribution efficiency.
pub fn district_heat_emission_factor(gas: &Fuel, oil: &Fuel, dh: &DistrictHeat) -> Option<f64> {
    let gas = gas.energy_emission_factor()? / dh.natural_gas_boiler_efficiency;
    let oil = oil.energy_emission_factor()? / dh.fuel_oil_boiler_efficiency;
    Some((gas + oil) / 2.0 / dh.distribution_efficiency)
}

fn emission_factor(s: &Arc<Sources>) -> Committee {
    Committee::new("emission_factor").quorum(
        Quorum::new(
            "from fuel intensities and electricity emission factor",
            using(s, |s, i, _| {
                let fi = FuelIntensities::from_value(i.get("adjusted_fuel_intensities")?)?;
                let electricity = i.number("electricity_emission_factor")?;
                let gas = s.reference.fuel(&s.config.natural_gas_fuel)?;
                let oil = s.reference.fuel(&s.config.fuel_oil_fuel)?;
                let district_heat = district_heat_emission_factor(gas, oil, &s.config.district_heat)?;
                Some(Value::Number(
                    fi.natural_gas * gas.co2_emission_factor
                        + fi.fuel_oil * oil.co2_emission_factor
                        + fi.district_heat * district_heat
                        + fi.electricity * electricity,
                ))
            }),
        )
        .needs(&["adjusted_fuel_intensities", "electricity_emission_factor"])
        .complies(ALL),
    )
}

/// Generation emission factor grossed up for transmission losses.
fn delivered(factor: f64, loss: f64) -> Option<f64> {
    (loss < 1.0).then(|| factor / (1.0 - loss))
}

fn electricity_emission_factor(s: &Arc<Sources>) -> Committee {
    Committee::new("electricity_emission_factor")
        .quorum(
            Quorum::new(
                "from eGRID subregion and region",
                using(s, |s, i, _| {
                    let subregion = s.reference.egrid_subregion(i.key("egrid_subregion")?)?;
                    let region = s.reference.egrid_region(i.key("egrid_region")?)?;
                    delivered(subregion.electricity_emission_factor, region.loss_factor)
                        .map(Value::Number)
                }),
            )
            .needs(&["egrid_subregion", "egrid_region"])
            .complies(ALL),
        )
        .quorum(
            Quorum::new(
                "from country",
                using(s, |s, i, _| {
                    let country = s.reference.country(i.key("country")?)?;
                    let loss = country.electricity_loss_factor.unwrap_or(0.0);
                    delivered(country.electricity_emission_factor?, loss).map(Value::Number)
                }),
            )
            .needs(&["country"])
            .complies(ALL),
        )
        .quorum(
            Quorum::new(
                "default",
                using(s, |s, _, _| {
                    let subregion = s.reference.egrid_subregion(&s.config.default_egrid_subregion)?;
                    let region = s.reference.egrid_region(&subregion.egrid_region)?;
                    delivered(subregion.electricity_emission_factor, region.loss_factor)
                        .map(Value::Number)
                }),
            )
            .complies(ALL),
        )
}

/// Survey basis for the fuzzy inference, from whatever is known.
fn inference_basis(i: &Inputs) -> Option<BTreeMap<String, f64>> {
    let mut basis = BTreeMap::new();
    for name in ["heating_degree_days", "cooling_degree_days"] {
        basis.insert(name.to_string(), i.number(name)?);
    }
    for (quantity, column) in [
        ("property_rooms", "lodging_rooms"),
        ("floors", "floors"),
        ("construction_year", "construction_year"),
    ] {
        if let Some(v) = i.number(quantity) {
            basis.insert(column.to_string(), v);
        }
    }
    if let Some(coverage) = i.number("ac_coverage") {
        basis.insert("percent_cooled".to_string(), coverage * 100.0);
    }
    Some(basis)
}

/// Cohort criteria, most general first.
fn inference_criteria(i: &Inputs) -> Vec<Criterion> {
    let mut criteria = Vec::new();
    if let Some(division) = i.key("census_division").and_then(|k| k.parse::<f64>().ok()) {
        criteria.push(Criterion::equals("census_division", division));
    }
    if let Some(rooms) = i.number("property_rooms") {
        let (min, max) = rooms_range(rooms);
        criteria.push(Criterion::within("lodging_rooms", min, max));
    }
    criteria
}

fn fuel_intensities(s: &Arc<Sources>) -> Committee {
    Committee::new("fuel_intensities")
        .quorum(
            Quorum::new(
                "from degree days and property attributes",
                using(s, |s, i, _| {
                    let basis = inference_basis(i)?;
                    let criteria = inference_criteria(i);
                    s.inference.infer(&basis, &criteria).map(FuelIntensities::to_value)
                }),
            )
            .needs(&["heating_degree_days", "cooling_degree_days"])
            .appreciates(&[
                "property_rooms",
                "floors",
                "construction_year",
                "ac_coverage",
                "census_division",
            ])
            .complies(ALL),
        )
        .quorum(
            Quorum::new(
                "from census division",
                using(s, |s, i, _| {
                    let division = s.reference.census_division(i.key("census_division")?)?;
                    Some(FuelIntensities::from(division).to_value())
                }),
            )
            .needs(&["census_division"])
            .complies(ALL),
        )
        .quorum(
            Quorum::new(
                "from country and lodging class",
                using(s, |s, i, _| {
                    let record = s
                        .reference
                        .country_lodging_class(i.key("country")?, i.key("lodging_class")?)?;
                    Some(FuelIntensities::from(record).to_value())
                }),
            )
            .needs(&["country", "lodging_class"])
            .complies(ALL),
        )
        .quorum(
            Quorum::new(
                "from lodging class",
                using(s, |s, i, _| {
                    let class = s.reference.lodging_class(i.key("lodging_class")?)?;
                    Some(FuelIntensities::from(class).to_value())
                }),
            )
            .needs(&["lodging_class"])
            .complies(ALL),
        )
}

fn adjusted_fuel_intensities() -> Committee {
    Committee::new("adjusted_fuel_intensities").quorum(
        Quorum::new("from fuel intensities and amenity adjustments", |i, _| {
            let base = FuelIntensities::from_value(i.get("fuel_intensities")?)?;
            let deltas: Vec<FuelIntensities> = ADJUSTMENTS
                .iter()
                .filter_map(|name| i.get(name))
                .filter_map(FuelIntensities::from_value)
                .collect();
            Some(adjustment::apply(base, &deltas).to_value())
        })
        .needs(&["fuel_intensities"])
        .appreciates(&ADJUSTMENTS)
        .complies(ALL),
    )
}

fn refrigerator_adjustment(s: &Arc<Sources>) -> Committee {
    Committee::new("refrigerator_adjustment").quorum(
        Quorum::new(
            "from refrigerator coverage",
            using(s, |s, i, _| {
                let coverage = i.number("refrigerator_coverage")?;
                Some(adjustment::per_room(&s.config.amenities.refrigerator, coverage).to_value())
            }),
        )
        .needs(&["refrigerator_coverage"])
        .complies(ALL),
    )
}

fn hot_tub(c: &ModelConfig) -> &Amenity {
    &c.amenities.hot_tub
}

fn indoor_pool(c: &ModelConfig) -> &Amenity {
    &c.amenities.indoor_pool
}

fn outdoor_pool(c: &ModelConfig) -> &Amenity {
    &c.amenities.outdoor_pool
}

fn per_property_adjustment(
    s: &Arc<Sources>,
    quantity: &'static str,
    count: &'static str,
    amenity: fn(&ModelConfig) -> &Amenity,
) -> Committee {
    let label = format!("from {} and property rooms", count.replace('_', " "));
    Committee::new(quantity).quorum(
        Quorum::new(
            &label,
            using(s, move |s, i, _| {
                let delta = adjustment::per_property(
                    amenity(&s.config),
                    i.number(count)?,
                    i.number("property_rooms")?,
                )?;
                Some(delta.to_value())
            }),
        )
        .needs(&[count, "property_rooms"])
        .complies(ALL),
    )
}

fn water_use_intensity(s: &Arc<Sources>) -> Committee {
    Committee::new("water_use_intensity").quorum(
        Quorum::new(
            "from lodging class",
            using(s, |s, i, _| {
                let class = s.reference.lodging_class(i.key("lodging_class")?)?;
                class.water_use_intensity.map(Value::Number)
            }),
        )
        .needs(&["lodging_class"])
        .complies(ALL),
    )
}
