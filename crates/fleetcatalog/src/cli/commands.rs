//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};

use crate::aircraft::{AircraftSpec, VariantKind};
use crate::query::{AircraftFilter, Bounds, SortDirection, SortKey, SortSpec};

fn parse_sort_key(s: &str) -> Result<SortKey, String> {
    s.parse::<SortKey>().map_err(|e| e.to_string())
}

fn parse_variant_kind(s: &str) -> Result<VariantKind, String> {
    s.parse::<VariantKind>().map_err(|e| e.to_string())
}

/// Attributes of an aircraft to add or update.
#[derive(Debug, Args)]
pub struct AircraftArgs {
    /// Variant name, e.g. "Passenger" or "Business Jet"
    pub variant: String,

    /// Model name
    pub model: String,

    /// Passenger seats (forced to 0 for cargo and military variants)
    #[arg(long, default_value_t = 0)]
    pub passengers: u32,

    /// Cargo capacity in tons
    #[arg(long, default_value_t = 0.0)]
    pub cargo: f64,

    /// Range in kilometers
    #[arg(long, default_value_t = 0)]
    pub range: u32,

    /// Fuel consumption in liters per hour
    #[arg(long, default_value_t = 0.0)]
    pub fuel: f64,

    /// Cruising speed in km/h
    #[arg(long, default_value_t = 0.0)]
    pub cruising_speed: f64,

    /// Maximum speed in km/h
    #[arg(long, default_value_t = 0.0)]
    pub max_speed: f64,

    /// Service ceiling in meters
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    pub ceiling: i32,

    /// Opaque image reference stored alongside the record
    #[arg(long)]
    pub image: Option<String>,
}

impl AircraftArgs {
    /// The raw attributes, before variant rules are applied.
    #[must_use]
    pub fn spec(&self) -> AircraftSpec {
        AircraftSpec {
            model: self.model.clone(),
            passenger_capacity: self.passengers,
            cargo_capacity: self.cargo,
            range: self.range,
            fuel_consumption: self.fuel,
            cruising_speed: self.cruising_speed,
            max_speed: self.max_speed,
            service_ceiling: self.ceiling,
        }
    }
}

/// Update command arguments.
#[derive(Debug, Args)]
pub struct UpdateCommand {
    /// Id of the aircraft to rewrite
    pub id: i64,

    /// New attributes (every field is replaced)
    #[command(flatten)]
    pub aircraft: AircraftArgs,
}

/// Remove command arguments.
#[derive(Debug, Args)]
#[command(group(clap::ArgGroup::new("target").required(true).args(["id", "model"])))]
pub struct RemoveCommand {
    /// Id of the aircraft to delete
    pub id: Option<i64>,

    /// Delete the first aircraft with this model name (case-insensitive)
    #[arg(short, long)]
    pub model: Option<String>,
}

/// Sort options shared by listing commands.
#[derive(Debug, Clone, Copy, Default, Args)]
pub struct SortArgs {
    /// Field to sort by (defaults to the configured sort)
    #[arg(short, long, value_parser = parse_sort_key)]
    pub sort: Option<SortKey>,

    /// Sort in descending order
    #[arg(short, long)]
    pub desc: bool,
}

impl SortArgs {
    /// Resolve against the configured default.
    #[must_use]
    pub fn resolve(&self, default: SortSpec) -> SortSpec {
        match (self.sort, self.desc) {
            (Some(key), true) => SortSpec::descending(key),
            (Some(key), false) => SortSpec::ascending(key),
            (None, true) => SortSpec::new(default.key, SortDirection::Descending),
            (None, false) => default,
        }
    }
}

/// List command arguments.
#[derive(Debug, Args)]
pub struct ListCommand {
    /// Sort options
    #[command(flatten)]
    pub sort: SortArgs,

    /// Output format
    #[arg(short, long, value_enum, default_value = "plain")]
    pub format: OutputFormat,
}

/// Search command arguments.
#[derive(Debug, Default, Args)]
pub struct SearchCommand {
    /// Case-insensitive substring of the model name
    #[arg(long)]
    pub model: Option<String>,

    /// Restrict to a variant (repeatable; none means all variants)
    #[arg(long = "variant", value_parser = parse_variant_kind)]
    pub variants: Vec<VariantKind>,

    /// Minimum passenger seats
    #[arg(long)]
    pub min_passengers: Option<u32>,
    /// Maximum passenger seats
    #[arg(long)]
    pub max_passengers: Option<u32>,

    /// Minimum cargo capacity (tons)
    #[arg(long)]
    pub min_cargo: Option<f64>,
    /// Maximum cargo capacity (tons)
    #[arg(long)]
    pub max_cargo: Option<f64>,

    /// Minimum range (km)
    #[arg(long)]
    pub min_range: Option<u32>,
    /// Maximum range (km)
    #[arg(long)]
    pub max_range: Option<u32>,

    /// Minimum fuel consumption (l/h)
    #[arg(long)]
    pub min_fuel: Option<f64>,
    /// Maximum fuel consumption (l/h)
    #[arg(long)]
    pub max_fuel: Option<f64>,

    /// Minimum cruising speed (km/h)
    #[arg(long)]
    pub min_cruising_speed: Option<f64>,
    /// Maximum cruising speed (km/h)
    #[arg(long)]
    pub max_cruising_speed: Option<f64>,

    /// Minimum max speed (km/h)
    #[arg(long)]
    pub min_max_speed: Option<f64>,
    /// Maximum max speed (km/h)
    #[arg(long)]
    pub max_max_speed: Option<f64>,

    /// Minimum service ceiling (m)
    #[arg(long, allow_negative_numbers = true)]
    pub min_ceiling: Option<i32>,
    /// Maximum service ceiling (m)
    #[arg(long, allow_negative_numbers = true)]
    pub max_ceiling: Option<i32>,

    /// Sort options
    #[command(flatten)]
    pub sort: SortArgs,

    /// Output format
    #[arg(short, long, value_enum, default_value = "plain")]
    pub format: OutputFormat,
}

impl SearchCommand {
    /// Build the query filter described by these arguments.
    #[must_use]
    pub fn to_filter(&self) -> AircraftFilter {
        AircraftFilter {
            model_contains: self.model.clone(),
            passenger_capacity: Bounds {
                min: self.min_passengers,
                max: self.max_passengers,
            },
            cargo_capacity: Bounds {
                min: self.min_cargo,
                max: self.max_cargo,
            },
            range: Bounds {
                min: self.min_range,
                max: self.max_range,
            },
            fuel_consumption: Bounds {
                min: self.min_fuel,
                max: self.max_fuel,
            },
            cruising_speed: Bounds {
                min: self.min_cruising_speed,
                max: self.max_cruising_speed,
            },
            max_speed: Bounds {
                min: self.min_max_speed,
                max: self.max_max_speed,
            },
            service_ceiling: Bounds {
                min: self.min_ceiling,
                max: self.max_ceiling,
            },
            variant_kinds: self.variants.iter().copied().collect(),
        }
    }
}

/// Bounds command arguments.
#[derive(Debug, Args)]
pub struct BoundsCommand {
    /// Restrict to a variant (repeatable; none means all variants)
    #[arg(long = "variant", value_parser = parse_variant_kind)]
    pub variants: Vec<VariantKind>,

    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

/// Output format for commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Plain text output
    #[default]
    Plain,
    /// JSON output
    Json,
}
