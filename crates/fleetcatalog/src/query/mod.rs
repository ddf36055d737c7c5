//! Query and sort engine.
//!
//! Everything here is a pure function over an in-memory slice of aircraft
//! supplied by the caller, typically from [`Repository::list_all`]. Nothing in
//! this module touches storage.
//!
//! [`Repository::list_all`]: crate::storage::Repository::list_all

pub mod bounds;
pub mod filter;
pub mod sort;

pub use bounds::{observed_bounds, summarize, FleetSummary, ObservedBounds};
pub use filter::{AircraftFilter, Bounds, Predicate};
pub use sort::{sort_aircraft, SortDirection, SortKey, SortSpec};

use tracing::trace;

use crate::aircraft::Aircraft;

/// Filter and optionally sort a collection of aircraft.
///
/// Returns copies of the matching aircraft. Without a sort the input order is
/// kept.
#[must_use]
pub fn query(aircraft: &[Aircraft], filter: &AircraftFilter, sort: Option<SortSpec>) -> Vec<Aircraft> {
    let mut matched: Vec<Aircraft> = aircraft
        .iter()
        .filter(|a| filter.matches(a))
        .cloned()
        .collect();

    if let Some(spec) = sort {
        sort_aircraft(&mut matched, spec);
    }

    trace!("Query matched {} of {} aircraft", matched.len(), aircraft.len());
    matched
}
