//! Filter predicates for the query engine.
//!
//! An [`AircraftFilter`] is a plain configuration record. It is evaluated as a
//! fixed chain of [`Predicate`]s combined with logical AND, where a predicate
//! that has nothing to check passes. Because every predicate is independent,
//! the order of evaluation never changes the result.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::aircraft::{Aircraft, VariantKind};

/// An inclusive `[min, max]` range. `None` on either side means unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Bounds<T> {
    /// Lower bound, inclusive.
    pub min: Option<T>,
    /// Upper bound, inclusive.
    pub max: Option<T>,
}

impl<T: PartialOrd + Copy> Bounds<T> {
    /// No restriction on either side.
    #[must_use]
    pub fn unbounded() -> Self {
        Self {
            min: None,
            max: None,
        }
    }

    /// Both sides set.
    #[must_use]
    pub fn between(min: T, max: T) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
        }
    }

    /// Only a lower bound.
    #[must_use]
    pub fn at_least(min: T) -> Self {
        Self {
            min: Some(min),
            max: None,
        }
    }

    /// Only an upper bound.
    #[must_use]
    pub fn at_most(max: T) -> Self {
        Self {
            min: None,
            max: Some(max),
        }
    }

    /// Whether neither side is set.
    #[must_use]
    pub fn is_unbounded(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }

    /// Whether `value` lies within the bounds.
    #[must_use]
    pub fn contains(&self, value: T) -> bool {
        self.min.map_or(true, |min| value >= min) && self.max.map_or(true, |max| value <= max)
    }
}

/// A single filter condition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Predicate<'a> {
    /// Case-insensitive substring of the model name. Empty matches all.
    ModelContains(Option<&'a str>),
    /// Passenger capacity range.
    PassengerCapacity(Bounds<u32>),
    /// Cargo capacity range (tons).
    CargoCapacity(Bounds<f64>),
    /// Range in kilometers.
    Range(Bounds<u32>),
    /// Fuel consumption range (liters/hour).
    FuelConsumption(Bounds<f64>),
    /// Cruising speed range (km/h).
    CruisingSpeed(Bounds<f64>),
    /// Max speed range (km/h).
    MaxSpeed(Bounds<f64>),
    /// Service ceiling range (meters).
    ServiceCeiling(Bounds<i32>),
    /// Membership in a set of variants. An empty set matches every variant.
    VariantIn(&'a BTreeSet<VariantKind>),
}

impl Predicate<'_> {
    /// Evaluate this predicate against one aircraft.
    #[must_use]
    pub fn evaluate(&self, aircraft: &Aircraft) -> bool {
        match self {
            Self::ModelContains(needle) => match needle {
                Some(needle) if !needle.is_empty() => aircraft
                    .model()
                    .to_lowercase()
                    .contains(&needle.to_lowercase()),
                _ => true,
            },
            Self::PassengerCapacity(bounds) => bounds.contains(aircraft.passenger_capacity()),
            Self::CargoCapacity(bounds) => bounds.contains(aircraft.cargo_capacity()),
            Self::Range(bounds) => bounds.contains(aircraft.range()),
            Self::FuelConsumption(bounds) => bounds.contains(aircraft.fuel_consumption()),
            Self::CruisingSpeed(bounds) => bounds.contains(aircraft.cruising_speed()),
            Self::MaxSpeed(bounds) => bounds.contains(aircraft.max_speed()),
            Self::ServiceCeiling(bounds) => bounds.contains(aircraft.service_ceiling()),
            Self::VariantIn(kinds) => kinds.is_empty() || kinds.contains(&aircraft.variant_kind()),
        }
    }
}

/// Filter configuration. Every option is independently optional; the default
/// filter matches everything.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AircraftFilter {
    /// Case-insensitive substring of the model name.
    pub model_contains: Option<String>,
    /// Passenger capacity bounds.
    pub passenger_capacity: Bounds<u32>,
    /// Cargo capacity bounds (tons).
    pub cargo_capacity: Bounds<f64>,
    /// Range bounds (km).
    pub range: Bounds<u32>,
    /// Fuel consumption bounds (liters/hour).
    pub fuel_consumption: Bounds<f64>,
    /// Cruising speed bounds (km/h).
    pub cruising_speed: Bounds<f64>,
    /// Max speed bounds (km/h).
    pub max_speed: Bounds<f64>,
    /// Service ceiling bounds (m).
    pub service_ceiling: Bounds<i32>,
    /// Variants to include. Empty means all variants.
    pub variant_kinds: BTreeSet<VariantKind>,
}

impl AircraftFilter {
    /// A filter that matches everything.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict to models containing `needle`, ignoring case.
    #[must_use]
    pub fn with_model_contains(mut self, needle: impl Into<String>) -> Self {
        self.model_contains = Some(needle.into());
        self
    }

    /// Restrict passenger capacity.
    #[must_use]
    pub fn with_passenger_capacity(mut self, bounds: Bounds<u32>) -> Self {
        self.passenger_capacity = bounds;
        self
    }

    /// Restrict cargo capacity.
    #[must_use]
    pub fn with_cargo_capacity(mut self, bounds: Bounds<f64>) -> Self {
        self.cargo_capacity = bounds;
        self
    }

    /// Restrict range.
    #[must_use]
    pub fn with_range(mut self, bounds: Bounds<u32>) -> Self {
        self.range = bounds;
        self
    }

    /// Restrict fuel consumption.
    #[must_use]
    pub fn with_fuel_consumption(mut self, bounds: Bounds<f64>) -> Self {
        self.fuel_consumption = bounds;
        self
    }

    /// Restrict cruising speed.
    #[must_use]
    pub fn with_cruising_speed(mut self, bounds: Bounds<f64>) -> Self {
        self.cruising_speed = bounds;
        self
    }

    /// Restrict max speed.
    #[must_use]
    pub fn with_max_speed(mut self, bounds: Bounds<f64>) -> Self {
        self.max_speed = bounds;
        self
    }

    /// Restrict service ceiling.
    #[must_use]
    pub fn with_service_ceiling(mut self, bounds: Bounds<i32>) -> Self {
        self.service_ceiling = bounds;
        self
    }

    /// Restrict to the given variants.
    #[must_use]
    pub fn with_variant_kinds(mut self, kinds: impl IntoIterator<Item = VariantKind>) -> Self {
        self.variant_kinds = kinds.into_iter().collect();
        self
    }

    /// The predicate chain this filter evaluates.
    #[must_use]
    pub fn predicates(&self) -> [Predicate<'_>; 9] {
        [
            Predicate::ModelContains(self.model_contains.as_deref()),
            Predicate::PassengerCapacity(self.passenger_capacity),
            Predicate::CargoCapacity(self.cargo_capacity),
            Predicate::Range(self.range),
            Predicate::FuelConsumption(self.fuel_consumption),
            Predicate::CruisingSpeed(self.cruising_speed),
            Predicate::MaxSpeed(self.max_speed),
            Predicate::ServiceCeiling(self.service_ceiling),
            Predicate::VariantIn(&self.variant_kinds),
        ]
    }

    /// Whether `aircraft` passes every predicate.
    #[must_use]
    pub fn matches(&self, aircraft: &Aircraft) -> bool {
        self.predicates()
            .iter()
            .all(|predicate| predicate.evaluate(aircraft))
    }

    /// Whether this filter restricts nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.model_contains.as_deref().map_or(true, str::is_empty)
            && self.passenger_capacity.is_unbounded()
            && self.cargo_capacity.is_unbounded()
            && self.range.is_unbounded()
            && self.fuel_consumption.is_unbounded()
            && self.cruising_speed.is_unbounded()
            && self.max_speed.is_unbounded()
            && self.service_ceiling.is_unbounded()
            && self.variant_kinds.is_empty()
    }
}
