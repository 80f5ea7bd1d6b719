//! Where the stay happened: geography, grid, and climate.

use std::collections::BTreeMap;
use std::sync::Arc;

use lodging_core::{Committee, Inputs, Quorum, Value};

use super::{using, Sources, ALL};

pub(super) fn committees(s: &Arc<Sources>) -> Vec<Committee> {
    vec![
        geocoded_location(s),
        zip_code(),
        country(s),
        state(s),
        census_division(s),
        egrid_subregion(s),
        egrid_region(s),
        climate_division(s),
        degree_days(s, "heating_degree_days", |d| d.heating_degree_days),
        degree_days(s, "cooling_degree_days", |d| d.cooling_degree_days),
    ]
}

/// A text field of the geocoded location record.
fn geocoded<'a>(i: &'a Inputs, field: &str) -> Option<&'a str> {
    i.record("geocoded_location")?.get(field)?.as_text()
}

fn geocoded_location(s: &Arc<Sources>) -> Committee {
    Committee::new("geocoded_location").quorum(
        Quorum::new(
            "from city and locality",
            using(s, |s, i, _| {
                let city = i.text("city")?;
                let description = match i.text("locality") {
                    Some(locality) => format!("{city}, {locality}"),
                    None => city.to_string(),
                };
                let found = s.geocoder.geocode(&description)?;

                let mut record = BTreeMap::new();
                record.insert("latitude".to_string(), Value::Number(found.latitude));
                record.insert("longitude".to_string(), Value::Number(found.longitude));
                for (field, value) in [
                    ("zip_code", found.zip_code),
                    ("state", found.state),
                    ("country", found.country),
                ] {
                    if let Some(v) = value {
                        record.insert(field.to_string(), Value::Text(v));
                    }
                }
                Some(Value::Record(record))
            }),
        )
        .needs(&["city"])
        .appreciates(&["locality"])
        .complies(ALL),
    )
}

fn zip_code() -> Committee {
    Committee::new("zip_code").quorum(
        Quorum::new("from geocoded location", |i, _| {
            geocoded(i, "zip_code").map(|z| Value::entity("zip_code", z))
        })
        .needs(&["geocoded_location"])
        .complies(ALL),
    )
}

fn country(s: &Arc<Sources>) -> Committee {
    Committee::new("country")
        .quorum(
            Quorum::new(
                "from zip code",
                using(s, |s, i, _| {
                    // Zip codes only exist in the US.
                    s.reference.zip_code(i.key("zip_code")?)?;
                    Some(Value::entity("country", "US"))
                }),
            )
            .needs(&["zip_code"])
            .complies(ALL),
        )
        .quorum(
            Quorum::new("from geocoded location", |i, _| {
                geocoded(i, "country").map(|c| Value::entity("country", c))
            })
            .needs(&["geocoded_location"])
            .complies(ALL),
        )
}

fn state(s: &Arc<Sources>) -> Committee {
    Committee::new("state")
        .quorum(
            Quorum::new(
                "from zip code",
                using(s, |s, i, _| {
                    let zip = s.reference.zip_code(i.key("zip_code")?)?;
                    Some(Value::entity("state", &zip.state))
                }),
            )
            .needs(&["zip_code"])
            .complies(ALL),
        )
        .quorum(
            Quorum::new("from geocoded location", |i, _| {
                geocoded(i, "state").map(|st| Value::entity("state", st))
            })
            .needs(&["geocoded_location"])
            .complies(ALL),
        )
}

fn census_division(s: &Arc<Sources>) -> Committee {
    Committee::new("census_division").quorum(
        Quorum::new(
            "from state",
            using(s, |s, i, _| {
                let state = s.reference.state(i.key("state")?)?;
                Some(Value::entity("census_division", state.census_division.to_string()))
            }),
        )
        .needs(&["state"])
        .complies(ALL),
    )
}

fn egrid_subregion(s: &Arc<Sources>) -> Committee {
    Committee::new("egrid_subregion").quorum(
        Quorum::new(
            "from zip code",
            using(s, |s, i, _| {
                let zip = s.reference.zip_code(i.key("zip_code")?)?;
                Some(Value::entity("egrid_subregion", &zip.egrid_subregion))
            }),
        )
        .needs(&["zip_code"])
        .complies(ALL),
    )
}

fn egrid_region(s: &Arc<Sources>) -> Committee {
    Committee::new("egrid_region").quorum(
        Quorum::new(
            "from eGRID subregion",
            using(s, |s, i, _| {
                let subregion = s.reference.egrid_subregion(i.key("egrid_subregion")?)?;
                Some(Value::entity("egrid_region", &subregion.egrid_region))
            }),
        )
        .needs(&["egrid_subregion"])
        .complies(ALL),
    )
}

fn climate_division(s: &Arc<Sources>) -> Committee {
    Committee::new("climate_division").quorum(
        Quorum::new(
            "from zip code",
            using(s, |s, i, _| {
                let zip = s.reference.zip_code(i.key("zip_code")?)?;
                let division = zip.climate_division.as_ref()?;
                Some(Value::entity("climate_division", division))
            }),
        )
        .needs(&["zip_code"])
        .complies(ALL),
    )
}

fn degree_days(
    s: &Arc<Sources>,
    quantity: &'static str,
    read: fn(&lodging_reference::records::ClimateDivision) -> f64,
) -> Committee {
    Committee::new(quantity).quorum(
        Quorum::new(
            "from climate division",
            using(s, move |s, i, _| {
                let division = s.reference.climate_division(i.key("climate_division")?)?;
                Some(Value::Number(read(division)))
            }),
        )
        .needs(&["climate_division"])
        .complies(ALL),
    )
}
