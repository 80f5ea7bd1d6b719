//! Impacts and the activity they scale with.

use std::sync::Arc;

use lodging_core::{Committee, Quorum, Value};

use super::{using, Sources, ALL, SECONDS_PER_NIGHT};
use crate::intensity::FuelIntensities;

pub(super) fn committees(s: &Arc<Sources>) -> Vec<Committee> {
    vec![
        carbon(),
        emission(),
        energy(s),
        water_use(),
        room_nights(),
        date(),
        Committee::new("rooms").quorum(Quorum::constant("default", Value::Number(1.0))),
        Committee::new("duration")
            .quorum(Quorum::constant("default", Value::Number(SECONDS_PER_NIGHT))),
    ]
}

fn carbon() -> Committee {
    Committee::new("carbon").quorum(
        Quorum::new("from room nights and emission factor", |i, _| {
            Some(Value::Number(
                i.number("room_nights")? * i.number("emission_factor")?,
            ))
        })
        .needs(&["room_nights", "emission_factor"])
        .complies(ALL),
    )
}

fn emission() -> Committee {
    Committee::new("emission").quorum(
        Quorum::new("from carbon", |i, _| i.get("carbon").cloned())
            .needs(&["carbon"])
            .complies(ALL),
    )
}

fn energy(s: &Arc<Sources>) -> Committee {
    Committee::new("energy").quorum(
        Quorum::new(
            "from room nights and fuel intensities",
            using(s, |s, i, _| {
                let fi = FuelIntensities::from_value(i.get("adjusted_fuel_intensities")?)?;
                let gas = s.reference.fuel(&s.config.natural_gas_fuel)?;
                let oil = s.reference.fuel(&s.config.fuel_oil_fuel)?;
                let per_room_night = fi.energy(gas.energy_content, oil.energy_content);
                Some(Value::Number(i.number("room_nights")? * per_room_night))
            }),
        )
        .needs(&["room_nights", "adjusted_fuel_intensities"])
        .complies(ALL),
    )
}

fn water_use() -> Committee {
    Committee::new("water_use").quorum(
        Quorum::new("from room nights and water use intensity", |i, _| {
            Some(Value::Number(
                i.number("room_nights")? * i.number("water_use_intensity")?,
            ))
        })
        .needs(&["room_nights", "water_use_intensity"])
        .complies(ALL),
    )
}

/// Stays that began outside the timeframe contribute nothing to it.
fn room_nights() -> Committee {
    Committee::new("room_nights").quorum(
        Quorum::new("from rooms, duration, and date", |i, ctx| {
            if !ctx.timeframe.includes(i.date("date")?) {
                return Some(Value::Number(0.0));
            }
            let nights = i.number("duration")? / SECONDS_PER_NIGHT;
            Some(Value::Number(i.number("rooms")? * nights))
        })
        .needs(&["rooms", "duration", "date"])
        .complies(ALL),
    )
}

fn date() -> Committee {
    Committee::new("date").quorum(
        Quorum::new("from timeframe", |_, ctx| Some(Value::Date(ctx.timeframe.start)))
            .complies(ALL),
    )
}
