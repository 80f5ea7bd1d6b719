//! Fuzzy inference: membership-weighted means over a cohort.
//!
//! Each basis attribute gets a Gaussian membership function centred on the
//! subject's value. Its width adapts to the cohort: the wider the spread of
//! the cohort, or the further the subject sits from the cohort mean, the
//! more forgiving the match. A membership formula combines the per-attribute
//! weights into one weight per record, and each target is estimated as the
//! weighted mean over the cohort.

use std::collections::BTreeMap;

use tracing::trace;

use crate::cohort::Attributes;

/// Per-attribute membership weights for one record, keyed by basis attribute.
pub type Weights = BTreeMap<String, f64>;

/// Width of the membership function for one basis attribute.
///
/// `stddev / 5 + |mean - value| / 3`, using the population standard deviation.
pub fn sigma(samples: &[f64], value: f64) -> Option<f64> {
    if samples.is_empty() {
        return None;
    }
    let n = samples.len() as f64;
    let mean = samples.iter().sum::<f64>() / n;
    let variance = samples.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n;
    Some(variance.sqrt() / 5.0 + (mean - value).abs() / 3.0)
}

/// Gaussian membership, 1 at `centre`.
pub fn membership(x: f64, centre: f64, sigma: f64) -> f64 {
    if sigma <= 0.0 {
        // Every sample equals the centre.
        return if x == centre { 1.0 } else { 0.0 };
    }
    (-0.5 * ((x - centre) / sigma).powi(2)).exp()
}

/// Membership formula tuned for lodging energy use.
///
/// Degree days always count. Room count and floors count when present,
/// as do cooled share and construction year.
pub fn energy_use_membership(w: &Weights) -> f64 {
    let term = |name: &str| w.get(name).map(|x| x.powf(0.8));

    let climate =
        term("heating_degree_days").unwrap_or(0.0) + term("cooling_degree_days").unwrap_or(0.0);
    let size = match (term("lodging_rooms"), term("floors")) {
        (Some(r), Some(f)) => r + f,
        (Some(r), None) => r,
        (None, Some(f)) => f,
        (None, None) => 1.0,
    };
    climate
        * size
        * term("percent_cooled").unwrap_or(1.0)
        * term("construction_year").unwrap_or(1.0)
}

/// Estimate `targets` for a subject described by `basis`.
///
/// Records missing a basis attribute get weight 0 for it. `weighting`
/// names an optional per-record survey weight. Targets whose total
/// membership is zero are left out; `None` if no target could be estimated.
pub fn infer<R, F>(
    cohort: &[&R],
    basis: &BTreeMap<String, f64>,
    targets: &[&str],
    formula: F,
    weighting: Option<&str>,
) -> Option<BTreeMap<String, f64>>
where
    R: Attributes + ?Sized,
    F: Fn(&Weights) -> f64,
{
    let widths: BTreeMap<&str, f64> = basis
        .iter()
        .filter_map(|(name, value)| {
            let samples: Vec<f64> = cohort.iter().filter_map(|r| r.number(name)).collect();
            sigma(&samples, *value).map(|s| (name.as_str(), s))
        })
        .collect();

    let memberships: Vec<f64> = cohort
        .iter()
        .map(|record| {
            let weights: Weights = basis
                .iter()
                .map(|(name, value)| {
                    let w = match (record.number(name), widths.get(name.as_str())) {
                        (Some(x), Some(s)) => membership(x, *value, *s),
                        _ => 0.0,
                    };
                    (name.clone(), w)
                })
                .collect();
            let survey = weighting.and_then(|w| record.number(w)).unwrap_or(1.0);
            formula(&weights) * survey
        })
        .collect();

    let mut estimates = BTreeMap::new();
    for target in targets {
        let (mut total, mut weight) = (0.0, 0.0);
        for (record, m) in cohort.iter().zip(&memberships) {
            if let Some(y) = record.number(target) {
                total += m * y;
                weight += m;
            }
        }
        if weight > 0.0 {
            estimates.insert(target.to_string(), total / weight);
        } else {
            trace!(attribute = %target, "no membership mass for target");
        }
    }

    (!estimates.is_empty()).then_some(estimates)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    struct Building {
        hdd: f64,
        cdd: f64,
        rooms: Option<f64>,
        energy: f64,
    }

    impl Attributes for Building {
        fn number(&self, attribute: &str) -> Option<f64> {
            match attribute {
                "heating_degree_days" => Some(self.hdd),
                "cooling_degree_days" => Some(self.cdd),
                "lodging_rooms" => self.rooms,
                "energy" => Some(self.energy),
                _ => None,
            }
        }
    }

    fn basis(pairs: &[(&str, f64)]) -> BTreeMap<String, f64> {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn sigma_adds_spread_and_distance() {
        // mean 2, population stddev 1
        let samples = [1.0, 3.0];
        assert_relative_eq!(sigma(&samples, 2.0).unwrap(), 0.2);
        assert_relative_eq!(sigma(&samples, 5.0).unwrap(), 0.2 + 1.0);
        assert!(sigma(&[], 1.0).is_none());
    }

    #[test]
    fn membership_peaks_at_centre() {
        assert_relative_eq!(membership(3.0, 3.0, 1.0), 1.0);
        assert_relative_eq!(membership(4.0, 3.0, 1.0), (-0.5f64).exp());
        assert_eq!(membership(3.0, 3.0, 0.0), 1.0);
        assert_eq!(membership(2.0, 3.0, 0.0), 0.0);
    }

    #[test]
    fn energy_membership_terms() {
        let mut w = basis(&[("heating_degree_days", 1.0), ("cooling_degree_days", 1.0)]);
        assert_relative_eq!(energy_use_membership(&w), 2.0);
        w.insert("lodging_rooms".into(), 1.0);
        w.insert("floors".into(), 1.0);
        assert_relative_eq!(energy_use_membership(&w), 4.0);
        w.insert("construction_year".into(), 0.0);
        assert_relative_eq!(energy_use_membership(&w), 0.0);
    }

    #[test]
    fn estimates_lean_toward_similar_records() {
        let cohort = [
            Building { hdd: 1000.0, cdd: 1000.0, rooms: Some(50.0), energy: 10.0 },
            Building { hdd: 5000.0, cdd: 200.0, rooms: Some(50.0), energy: 30.0 },
        ];
        let refs: Vec<&Building> = cohort.iter().collect();
        let b = basis(&[("heating_degree_days", 1200.0), ("cooling_degree_days", 900.0)]);
        let est = infer(&refs, &b, &["energy"], energy_use_membership, None).unwrap();
        let energy = est["energy"];
        assert!(energy > 10.0 && energy < 20.0, "got {energy}");
    }

    #[test]
    fn identical_records_give_their_value() {
        let cohort = [
            Building { hdd: 2000.0, cdd: 500.0, rooms: None, energy: 12.0 },
            Building { hdd: 2000.0, cdd: 500.0, rooms: None, energy: 12.0 },
        ];
        let refs: Vec<&Building> = cohort.iter().collect();
        let b = basis(&[
            ("heating_degree_days", 2000.0),
            ("cooling_degree_days", 500.0),
            ("lodging_rooms", 40.0),
        ]);
        // No record has rooms, so the rooms weight is zero for every record.
        let est = infer(&refs, &b, &["energy"], energy_use_membership, None);
        assert!(est.is_none());

        let b = basis(&[("heating_degree_days", 2000.0), ("cooling_degree_days", 500.0)]);
        let est = infer(&refs, &b, &["energy"], energy_use_membership, None).unwrap();
        assert_relative_eq!(est["energy"], 12.0);
    }
}
