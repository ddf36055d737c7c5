//! `fleetctl` - CLI for fleetcatalog
//!
//! This binary provides the command-line interface for managing the aircraft
//! catalog: adding, updating and removing records, and listing or searching
//! them with the query engine.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::collections::BTreeSet;

use anyhow::{bail, Context};
use clap::Parser;

use fleetcatalog::cli::{
    AircraftArgs, BoundsCommand, Cli, Command, ConfigCommand, ListCommand, OutputFormat,
    RemoveCommand, SearchCommand, UpdateCommand,
};
use fleetcatalog::factory;
use fleetcatalog::query::{observed_bounds, summarize, Bounds};
use fleetcatalog::{
    init_logging, query, supported_variants, Aircraft, AircraftFilter, Config, Repository,
    UpdateOutcome,
};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbosity());

    // Load configuration
    let config = Config::load_from(cli.config.clone()).context("failed to load configuration")?;

    match cli.command {
        Command::Add(args) => handle_add(&open_repository(&config)?, &args),
        Command::Update(cmd) => handle_update(&open_repository(&config)?, &cmd),
        Command::Remove(cmd) => handle_remove(&open_repository(&config)?, &cmd),
        Command::List(cmd) => handle_list(&open_repository(&config)?, &config, &cmd),
        Command::Search(cmd) => handle_search(&open_repository(&config)?, &config, &cmd),
        Command::Bounds(cmd) => handle_bounds(&open_repository(&config)?, &cmd),
        Command::Variants => {
            for name in supported_variants() {
                println!("{name}");
            }
            Ok(())
        }
        Command::Config(config_cmd) => handle_config(&config, config_cmd),
    }
}

fn open_repository(config: &Config) -> anyhow::Result<Repository> {
    Repository::open_from_config(config).with_context(|| {
        format!(
            "failed to open aircraft database at {}",
            config.database_path().display()
        )
    })
}

fn build_aircraft(args: &AircraftArgs) -> anyhow::Result<Aircraft> {
    let kind = factory::parse_variant(&args.variant)?;
    let aircraft = factory::build(kind, args.spec())?;
    Ok(match &args.image {
        Some(image) => aircraft.with_image_reference(image.clone()),
        None => aircraft,
    })
}

fn handle_add(repo: &Repository, args: &AircraftArgs) -> anyhow::Result<()> {
    let aircraft = build_aircraft(args)?;
    let Some(stored) = repo.create(&aircraft) else {
        bail!("could not store {}; see the log for details", aircraft.model());
    };
    match stored.id() {
        Some(id) => println!("Added #{id}: {stored}"),
        None => println!("Added: {stored}"),
    }
    Ok(())
}

fn handle_update(repo: &Repository, cmd: &UpdateCommand) -> anyhow::Result<()> {
    let aircraft = build_aircraft(&cmd.aircraft)?.with_id(cmd.id);
    match repo.update(&aircraft) {
        UpdateOutcome::Updated => {
            println!("Updated #{}: {aircraft}", cmd.id);
            Ok(())
        }
        UpdateOutcome::NotFound => bail!("no aircraft with id {}", cmd.id),
        UpdateOutcome::Failed => bail!("could not update #{}; see the log for details", cmd.id),
    }
}

fn handle_remove(repo: &Repository, cmd: &RemoveCommand) -> anyhow::Result<()> {
    let id = match (cmd.id, cmd.model.as_deref()) {
        (Some(id), _) => id,
        (None, Some(model)) => match repo.find_id_by_model(model) {
            Some(id) => id,
            None => bail!("no aircraft with model {model:?}"),
        },
        (None, None) => bail!("an id or --model is required"),
    };

    if !repo.delete(id) {
        bail!("no aircraft removed for id {id}");
    }
    println!("Removed #{id}");
    Ok(())
}

fn handle_list(repo: &Repository, config: &Config, cmd: &ListCommand) -> anyhow::Result<()> {
    let sort = cmd.sort.resolve(config.default_sort());
    let aircraft = query(&repo.list_all(), &AircraftFilter::new(), Some(sort));
    print_aircraft(&aircraft, cmd.format)
}

fn handle_search(repo: &Repository, config: &Config, cmd: &SearchCommand) -> anyhow::Result<()> {
    let sort = cmd.sort.resolve(config.default_sort());
    let aircraft = query(&repo.list_all(), &cmd.to_filter(), Some(sort));
    print_aircraft(&aircraft, cmd.format)
}

fn print_aircraft(aircraft: &[Aircraft], format: OutputFormat) -> anyhow::Result<()> {
    let summary = summarize(aircraft);
    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "aircraft": aircraft,
                "summary": summary,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            for a in aircraft {
                match a.id() {
                    Some(id) => println!("{id:>5}  {a}"),
                    None => println!("    -  {a}"),
                }
            }
            if !aircraft.is_empty() {
                println!();
            }
            println!(
                "Aircraft: {} | Passenger seats: {} | Cargo capacity: {:.2} t",
                summary.aircraft, summary.passengers, summary.cargo_tons
            );
        }
    }
    Ok(())
}

fn handle_bounds(repo: &Repository, cmd: &BoundsCommand) -> anyhow::Result<()> {
    let kinds: BTreeSet<_> = cmd.variants.iter().copied().collect();
    let bounds = observed_bounds(&repo.list_all(), &kinds);

    if cmd.json {
        println!("{}", serde_json::to_string_pretty(&bounds)?);
        return Ok(());
    }

    println!("Observed bounds over {} aircraft", bounds.matched);
    println!("================================");
    println!("  Passengers:       {}", show(&bounds.passenger_capacity));
    println!("  Cargo (t):        {}", show(&bounds.cargo_capacity));
    println!("  Range (km):       {}", show(&bounds.range));
    println!("  Fuel (l/h):       {}", show(&bounds.fuel_consumption));
    println!("  Cruise (km/h):    {}", show(&bounds.cruising_speed));
    println!("  Max speed (km/h): {}", show(&bounds.max_speed));
    println!("  Ceiling (m):      {}", show(&bounds.service_ceiling));
    Ok(())
}

fn show<T: std::fmt::Display>(bounds: &Bounds<T>) -> String {
    match (&bounds.min, &bounds.max) {
        (Some(min), Some(max)) => format!("{min} .. {max}"),
        (Some(min), None) => format!("{min} .."),
        (None, Some(max)) => format!(".. {max}"),
        (None, None) => "-".to_string(),
    }
}

fn handle_config(config: &Config, cmd: ConfigCommand) -> anyhow::Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                let sort = config.default_sort();
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Storage]");
                println!("  Database path:      {}", config.database_path().display());
                println!("  Busy timeout (ms):  {}", config.storage.busy_timeout_ms);
                println!();
                println!("[Query]");
                println!("  Default sort:       {}", sort.key);
                println!("  Direction:          {}", sort.direction);
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            match Config::load_from(Some(path)) {
                Ok(_) => println!("Configuration is valid."),
                Err(e) => bail!("configuration error: {e}"),
            }
        }
    }
    Ok(())
}
