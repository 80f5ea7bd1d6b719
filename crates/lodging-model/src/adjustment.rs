//! Amenity adjustments to fuel intensities.
//!
//! Adjustments are signed per-fuel deltas folded onto an immutable base in
//! order. Each fuel's running total is clamped at zero after every step,
//! so a large negative adjustment cannot be cancelled out by a later
//! positive one.

use crate::config::Amenity;
use crate::intensity::FuelIntensities;

/// Fold `adjustments` onto `base`, clamping at zero after each step.
pub fn apply<'a>(
    base: FuelIntensities,
    adjustments: impl IntoIterator<Item = &'a FuelIntensities>,
) -> FuelIntensities {
    adjustments.into_iter().fold(base, |acc, delta| {
        acc.zip_with(*delta, |total, d| (total + d).max(0.0))
    })
}

/// Delta from a per-property amenity count spread over the property's rooms.
///
/// `None` when the room count is not positive.
pub fn per_property(amenity: &Amenity, count: f64, property_rooms: f64) -> Option<FuelIntensities> {
    if property_rooms <= 0.0 {
        return None;
    }
    let share = (count - amenity.average) / property_rooms;
    Some(FuelIntensities::new(
        share * amenity.natural_gas,
        0.0,
        share * amenity.electricity,
        0.0,
    ))
}

/// Delta from a per-room coverage fraction.
pub fn per_room(amenity: &Amenity, coverage: f64) -> FuelIntensities {
    let share = coverage - amenity.average;
    FuelIntensities::new(share * amenity.natural_gas, 0.0, share * amenity.electricity, 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn no_adjustments_is_identity() {
        let base = FuelIntensities::new(1.0, 0.2, 25.0, 4.0);
        assert_eq!(apply(base, &[]), base);
    }

    #[test]
    fn adjustments_fold_in_order() {
        let base = FuelIntensities::new(1.0, 0.0, 10.0, 0.0);
        let deltas = [
            FuelIntensities::new(0.5, 0.0, 2.0, 0.0),
            FuelIntensities::new(-0.25, 0.0, -1.0, 0.0),
        ];
        let adjusted = apply(base, &deltas);
        assert_relative_eq!(adjusted.natural_gas, 1.25);
        assert_relative_eq!(adjusted.electricity, 11.0);
        // base untouched
        assert_eq!(base.natural_gas, 1.0);
    }

    #[test]
    fn clamps_at_zero_before_later_adjustments() {
        let base = FuelIntensities::new(1.0, 0.0, 10.0, 0.0);
        let deltas = [
            FuelIntensities::new(-3.0, 0.0, 0.0, 0.0),
            FuelIntensities::new(0.5, 0.0, 0.0, 0.0),
        ];
        let adjusted = apply(base, &deltas);
        // -2 clamps to 0, then +0.5; not 1 - 3 + 0.5 = -1.5 clamped to 0.
        assert_relative_eq!(adjusted.natural_gas, 0.5);
        assert_relative_eq!(adjusted.electricity, 10.0);
    }

    #[test]
    fn per_property_spreads_over_rooms() {
        let pool = Amenity {
            average: 0.3,
            natural_gas: 28.0,
            electricity: 105.0,
        };
        let delta = per_property(&pool, 1.3, 100.0).unwrap();
        assert_relative_eq!(delta.natural_gas, 0.28, epsilon = 1e-12);
        assert_relative_eq!(delta.electricity, 1.05, epsilon = 1e-12);
        assert_eq!(delta.fuel_oil, 0.0);
        assert!(per_property(&pool, 1.0, 0.0).is_none());
    }

    #[test]
    fn per_room_below_average_is_negative() {
        let fridge = Amenity {
            average: 0.6,
            natural_gas: 0.0,
            electricity: 1.3,
        };
        assert_relative_eq!(per_room(&fridge, 0.1).electricity, -0.65, epsilon = 1e-12);
        assert_relative_eq!(per_room(&fridge, 0.6).electricity, 0.0);
    }
}
