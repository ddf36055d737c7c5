//! Read-only aggregations over a set of aircraft.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::aircraft::{Aircraft, VariantKind};

use super::filter::{AircraftFilter, Bounds};

/// Observed `[min, max]` of every numeric field across a subset of aircraft.
///
/// Fields of an empty subset are unbounded.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ObservedBounds {
    /// Number of aircraft the bounds were computed over.
    pub matched: usize,
    /// Passenger capacity.
    pub passenger_capacity: Bounds<u32>,
    /// Cargo capacity (tons).
    pub cargo_capacity: Bounds<f64>,
    /// Range (km).
    pub range: Bounds<u32>,
    /// Fuel consumption (liters/hour).
    pub fuel_consumption: Bounds<f64>,
    /// Cruising speed (km/h).
    pub cruising_speed: Bounds<f64>,
    /// Max speed (km/h).
    pub max_speed: Bounds<f64>,
    /// Service ceiling (m).
    pub service_ceiling: Bounds<i32>,
}

impl ObservedBounds {
    /// A filter pre-populated with these ranges and the given variant selection.
    #[must_use]
    pub fn to_filter(&self, variant_kinds: &BTreeSet<VariantKind>) -> AircraftFilter {
        AircraftFilter {
            model_contains: None,
            passenger_capacity: self.passenger_capacity,
            cargo_capacity: self.cargo_capacity,
            range: self.range,
            fuel_consumption: self.fuel_consumption,
            cruising_speed: self.cruising_speed,
            max_speed: self.max_speed,
            service_ceiling: self.service_ceiling,
            variant_kinds: variant_kinds.clone(),
        }
    }
}

fn span<T, I>(values: I) -> Bounds<T>
where
    T: PartialOrd + Copy,
    I: IntoIterator<Item = T>,
{
    values.into_iter().fold(Bounds::unbounded(), |acc, value| Bounds {
        min: Some(acc.min.map_or(value, |min| if value < min { value } else { min })),
        max: Some(acc.max.map_or(value, |max| if value > max { value } else { max })),
    })
}

/// Compute the observed bounds of the aircraft matching `variant_kinds`.
///
/// An empty selection means all variants.
#[must_use]
pub fn observed_bounds(
    aircraft: &[Aircraft],
    variant_kinds: &BTreeSet<VariantKind>,
) -> ObservedBounds {
    let subset: Vec<&Aircraft> = aircraft
        .iter()
        .filter(|a| variant_kinds.is_empty() || variant_kinds.contains(&a.variant_kind()))
        .collect();

    ObservedBounds {
        matched: subset.len(),
        passenger_capacity: span(subset.iter().map(|a| a.passenger_capacity())),
        cargo_capacity: span(subset.iter().map(|a| a.cargo_capacity())),
        range: span(subset.iter().map(|a| a.range())),
        fuel_consumption: span(subset.iter().map(|a| a.fuel_consumption())),
        cruising_speed: span(subset.iter().map(|a| a.cruising_speed())),
        max_speed: span(subset.iter().map(|a| a.max_speed())),
        service_ceiling: span(subset.iter().map(|a| a.service_ceiling())),
    }
}

/// Totals shown alongside a list of aircraft.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct FleetSummary {
    /// Number of aircraft.
    pub aircraft: usize,
    /// Total passenger seats.
    pub passengers: u64,
    /// Total cargo capacity in tons.
    pub cargo_tons: f64,
}

/// Sum up a set of aircraft.
#[must_use]
pub fn summarize(aircraft: &[Aircraft]) -> FleetSummary {
    FleetSummary {
        aircraft: aircraft.len(),
        passengers: aircraft
            .iter()
            .map(|a| u64::from(a.passenger_capacity()))
            .sum(),
        cargo_tons: aircraft.iter().map(Aircraft::cargo_capacity).sum(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factory::create_aircraft;

    fn fleet() -> Vec<Aircraft> {
        vec![
            create_aircraft("Passenger", "A320", 150, 16.6, 6100, 2.5, 828.0, 871.0, 12000)
                .unwrap(),
            create_aircraft("Passenger", "B777", 396, 20.0, 13650, 7.5, 905.0, 950.0, 13100)
                .unwrap(),
            create_aircraft("Cargo", "An-124", 0, 150.0, 4800, 12.6, 800.0, 865.0, 12000)
                .unwrap(),
            create_aircraft("Fighter", "F-16", 0, 7.7, 4220, 3.5, 900.0, 2120.0, 15240).unwrap(),
        ]
    }

    #[test]
    fn test_bounds_for_selected_variant() {
        let kinds = BTreeSet::from([VariantKind::Passenger]);
        let bounds = observed_bounds(&fleet(), &kinds);

        assert_eq!(bounds.matched, 2);
        assert_eq!(bounds.passenger_capacity, Bounds::between(150, 396));
        assert_eq!(bounds.cargo_capacity, Bounds::between(16.6, 20.0));
        assert_eq!(bounds.range, Bounds::between(6100, 13650));
        assert_eq!(bounds.service_ceiling, Bounds::between(12000, 13100));
    }

    #[test]
    fn test_bounds_with_empty_selection_cover_everything() {
        let bounds = observed_bounds(&fleet(), &BTreeSet::new());
        assert_eq!(bounds.matched, 4);
        assert_eq!(bounds.passenger_capacity, Bounds::between(0, 396));
        assert_eq!(bounds.max_speed, Bounds::between(865.0, 2120.0));
        assert_eq!(bounds.fuel_consumption, Bounds::between(2.5, 12.6));
    }

    #[test]
    fn test_bounds_of_empty_subset_are_unbounded() {
        let kinds = BTreeSet::from([VariantKind::Bomber]);
        let bounds = observed_bounds(&fleet(), &kinds);
        assert_eq!(bounds.matched, 0);
        assert!(bounds.passenger_capacity.is_unbounded());
        assert!(bounds.cruising_speed.is_unbounded());
        assert!(bounds.to_filter(&kinds).passenger_capacity.is_unbounded());
    }

    #[test]
    fn test_to_filter_matches_whole_subset() {
        let aircraft = fleet();
        let kinds = BTreeSet::from([VariantKind::Passenger, VariantKind::Cargo]);
        let filter = observed_bounds(&aircraft, &kinds).to_filter(&kinds);

        let matched: Vec<_> = aircraft.iter().filter(|a| filter.matches(a)).collect();
        assert_eq!(matched.len(), 3);
        assert!(matched.iter().all(|a| a.variant_kind() != VariantKind::Fighter));
    }

    #[test]
    fn test_observed_bounds_leave_input_untouched() {
        let aircraft = fleet();
        let before = aircraft.clone();
        let _ = observed_bounds(&aircraft, &BTreeSet::new());
        assert_eq!(aircraft, before);
    }

    #[test]
    fn test_summarize() {
        let summary = summarize(&fleet());
        assert_eq!(summary.aircraft, 4);
        assert_eq!(summary.passengers, 546);
        assert!((summary.cargo_tons - 194.3).abs() < 1e-9);
    }

    #[test]
    fn test_summarize_empty() {
        assert_eq!(summarize(&[]), FleetSummary::default());
    }
}
