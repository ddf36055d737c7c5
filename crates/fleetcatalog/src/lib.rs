//! `fleetcatalog` - A catalog of aircraft records for a fleet operator
//!
//! This library provides the typed aircraft model, the variant factory, the
//! `SQLite`-backed repository, and the pure query and sort engine that front
//! ends build on.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod aircraft;
pub mod cli;
pub mod config;
pub mod error;
pub mod factory;
pub mod logging;
pub mod query;
pub mod storage;

pub use aircraft::{Aircraft, AircraftSpec, VariantKind};
pub use config::Config;
pub use error::{Error, Result};
pub use factory::{create_aircraft, supported_variants};
pub use logging::init_logging;
pub use query::{query, AircraftFilter, Bounds, SortDirection, SortKey, SortSpec};
pub use storage::{Repository, UpdateOutcome};
