//! Sorting for the query engine.
//!
//! Records that compare equal on the sort key are ordered by id ascending,
//! whatever the direction. Records without an id sort after those with one
//! and keep their relative input order.

use std::cmp::Ordering;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::aircraft::Aircraft;
use crate::error::Error;

/// A sortable aircraft field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    /// Model name, case-insensitive.
    Model,
    /// Passenger seats.
    PassengerCapacity,
    /// Cargo capacity.
    CargoCapacity,
    /// Range.
    Range,
    /// Fuel consumption.
    FuelConsumption,
    /// Cruising speed.
    CruisingSpeed,
    /// Max speed.
    MaxSpeed,
    /// Service ceiling.
    ServiceCeiling,
}

impl SortKey {
    /// Every sort key, in menu order.
    pub const ALL: [SortKey; 8] = [
        Self::Model,
        Self::PassengerCapacity,
        Self::CargoCapacity,
        Self::Range,
        Self::FuelConsumption,
        Self::CruisingSpeed,
        Self::MaxSpeed,
        Self::ServiceCeiling,
    ];

    /// The `snake_case` name used in config files and on the command line.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Model => "model",
            Self::PassengerCapacity => "passenger_capacity",
            Self::CargoCapacity => "cargo_capacity",
            Self::Range => "range",
            Self::FuelConsumption => "fuel_consumption",
            Self::CruisingSpeed => "cruising_speed",
            Self::MaxSpeed => "max_speed",
            Self::ServiceCeiling => "service_ceiling",
        }
    }

    /// Compare two aircraft on this key alone, ascending.
    #[must_use]
    pub fn compare(self, a: &Aircraft, b: &Aircraft) -> Ordering {
        match self {
            Self::Model => a.model().to_lowercase().cmp(&b.model().to_lowercase()),
            Self::PassengerCapacity => a.passenger_capacity().cmp(&b.passenger_capacity()),
            Self::CargoCapacity => a.cargo_capacity().total_cmp(&b.cargo_capacity()),
            Self::Range => a.range().cmp(&b.range()),
            Self::FuelConsumption => a.fuel_consumption().total_cmp(&b.fuel_consumption()),
            Self::CruisingSpeed => a.cruising_speed().total_cmp(&b.cruising_speed()),
            Self::MaxSpeed => a.max_speed().total_cmp(&b.max_speed()),
            Self::ServiceCeiling => a.service_ceiling().cmp(&b.service_ceiling()),
        }
    }
}

impl std::fmt::Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SortKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['-', ' '], "_");
        Self::ALL
            .into_iter()
            .find(|key| key.name() == normalized)
            .ok_or_else(|| Error::UnknownSortKey {
                name: s.to_string(),
            })
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    /// Smallest first.
    #[default]
    Ascending,
    /// Largest first.
    Descending,
}

impl SortDirection {
    /// Apply this direction to an ascending ordering.
    #[must_use]
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Ascending => ordering,
            Self::Descending => ordering.reverse(),
        }
    }
}

impl std::fmt::Display for SortDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ascending => write!(f, "ascending"),
            Self::Descending => write!(f, "descending"),
        }
    }
}

/// Which field to sort by, and in which direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SortSpec {
    /// Field to compare.
    pub key: SortKey,
    /// Direction of the primary comparison.
    pub direction: SortDirection,
}

impl SortSpec {
    /// Create a sort spec.
    #[must_use]
    pub fn new(key: SortKey, direction: SortDirection) -> Self {
        Self { key, direction }
    }

    /// Ascending by `key`.
    #[must_use]
    pub fn ascending(key: SortKey) -> Self {
        Self::new(key, SortDirection::Ascending)
    }

    /// Descending by `key`.
    #[must_use]
    pub fn descending(key: SortKey) -> Self {
        Self::new(key, SortDirection::Descending)
    }

    /// Full comparison: the directed key, then id ascending.
    #[must_use]
    pub fn compare(&self, a: &Aircraft, b: &Aircraft) -> Ordering {
        self.direction
            .apply(self.key.compare(a, b))
            .then_with(|| compare_ids(a.id(), b.id()))
    }
}

fn compare_ids(a: Option<i64>, b: Option<i64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Sort `aircraft` in place.
pub fn sort_aircraft(aircraft: &mut [Aircraft], spec: SortSpec) {
    aircraft.sort_by(|a, b| spec.compare(a, b));
}
