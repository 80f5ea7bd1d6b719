//! The property itself and what its record says about it.

use std::sync::Arc;

use lodging_core::{Committee, Inputs, Quorum, Value};
use lodging_reference::records::LodgingProperty;
use tracing::debug;

use super::{using, Sources, ALL};
use crate::config::ModelConfig;

pub(super) fn committees(s: &Arc<Sources>) -> Vec<Committee> {
    vec![
        lodging_property(s),
        lodging_class(s),
        attribute(s, "property_rooms", |p| p.lodging_rooms),
        attribute(s, "floors", |p| p.floors),
        attribute(s, "construction_year", |p| p.construction_year),
        attribute(s, "ac_coverage", |p| p.ac_coverage),
        amenity(s, "refrigerator_coverage", |p| p.refrigerator_coverage, |c| {
            c.amenities.refrigerator.average
        }),
        amenity(s, "hot_tubs", |p| p.hot_tubs, |c| c.amenities.hot_tub.average),
        amenity(s, "indoor_pools", |p| p.indoor_pools, |c| c.amenities.indoor_pool.average),
        amenity(s, "outdoor_pools", |p| p.outdoor_pools, |c| c.amenities.outdoor_pool.average),
    ]
}

fn same(a: &str, b: &str) -> bool {
    a.trim().eq_ignore_ascii_case(b.trim())
}

/// A known location attribute disagrees with the record only when both
/// sides have a value and they differ.
fn agrees(known: Option<&str>, recorded: Option<&str>) -> bool {
    match (known, recorded) {
        (Some(k), Some(r)) => same(k, r),
        _ => true,
    }
}

fn is_match(property: &LodgingProperty, name: &str, i: &Inputs) -> bool {
    same(&property.name, name)
        && agrees(i.key("zip_code"), property.postcode.as_deref())
        && agrees(i.text("city"), property.city.as_deref())
        && agrees(i.key("state"), property.locality.as_deref())
        && agrees(i.key("country"), property.country.as_deref())
}

fn lodging_property(s: &Arc<Sources>) -> Committee {
    Committee::new("lodging_property").quorum(
        Quorum::new(
            "from name and location",
            using(s, |s, i, _| {
                let name = i.text("lodging_property_name")?;
                let mut candidates = s
                    .reference
                    .lodging_properties()
                    .filter(|p| is_match(p, name, i));
                let found = candidates.next()?;
                if candidates.next().is_some() {
                    debug!(property = name, "property name is ambiguous");
                    return None;
                }
                Some(Value::entity("lodging_property", &found.northstar_id))
            }),
        )
        .needs(&["lodging_property_name"])
        .appreciates(&["zip_code", "city", "state", "country"])
        .complies(ALL),
    )
}

/// The property record behind the resolved `lodging_property`.
fn record<'a>(s: &'a Sources, i: &Inputs) -> Option<&'a LodgingProperty> {
    s.reference.lodging_property(i.key("lodging_property")?)
}

fn lodging_class(s: &Arc<Sources>) -> Committee {
    Committee::new("lodging_class")
        .quorum(
            Quorum::new(
                "from lodging property",
                using(s, |s, i, _| {
                    let class = record(s, i)?.lodging_class.as_ref()?;
                    Some(Value::entity("lodging_class", class))
                }),
            )
            .needs(&["lodging_property"])
            .complies(ALL),
        )
        .quorum(
            Quorum::new(
                "default",
                using(s, |s, _, _| {
                    Some(Value::entity("lodging_class", &s.config.default_lodging_class))
                }),
            )
            .complies(ALL),
        )
}

fn attribute(
    s: &Arc<Sources>,
    quantity: &'static str,
    read: fn(&LodgingProperty) -> Option<f64>,
) -> Committee {
    Committee::new(quantity).quorum(
        Quorum::new(
            "from lodging property",
            using(s, move |s, i, _| read(record(s, i)?).map(Value::Number)),
        )
        .needs(&["lodging_property"])
        .complies(ALL),
    )
}

/// Amenity counts fall back to the population average when the record is silent.
fn amenity(
    s: &Arc<Sources>,
    quantity: &'static str,
    read: fn(&LodgingProperty) -> Option<f64>,
    average: fn(&ModelConfig) -> f64,
) -> Committee {
    Committee::new(quantity).quorum(
        Quorum::new(
            "from lodging property",
            using(s, move |s, i, _| {
                let value = read(record(s, i)?).unwrap_or_else(|| average(&s.config));
                Some(Value::Number(value))
            }),
        )
        .needs(&["lodging_property"])
        .complies(ALL),
    )
}
