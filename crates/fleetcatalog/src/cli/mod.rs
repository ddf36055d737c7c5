//! Command-line interface for fleetcatalog.
//!
//! This module provides the CLI structure for the `fleetctl` binary, a thin
//! scripting surface over the factory, repository and query engine.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{
    AircraftArgs, BoundsCommand, ConfigCommand, ListCommand, OutputFormat, RemoveCommand,
    SearchCommand, SortArgs, UpdateCommand,
};

/// fleetctl - Manage an aircraft fleet catalog
///
/// Adds, updates, removes, lists and searches aircraft records stored in a
/// local `SQLite` database.
#[derive(Debug, Parser)]
#[command(name = "fleetctl")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for info, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Add a new aircraft
    Add(AircraftArgs),

    /// Rewrite an existing aircraft by id
    Update(UpdateCommand),

    /// Remove an aircraft by id or model name
    Remove(RemoveCommand),

    /// List every aircraft
    List(ListCommand),

    /// Search aircraft by model, variant and numeric ranges
    Search(SearchCommand),

    /// Show the observed range of every numeric field
    Bounds(BoundsCommand),

    /// List the supported variant names
    Variants,

    /// View or validate configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> crate::logging::Verbosity {
        if self.quiet {
            crate::logging::Verbosity::Quiet
        } else {
            match self.verbose {
                0 => crate::logging::Verbosity::Normal,
                1 => crate::logging::Verbosity::Verbose,
                _ => crate::logging::Verbosity::Trace,
            }
        }
    }
}
