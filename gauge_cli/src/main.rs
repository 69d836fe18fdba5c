//! gauge CLI - run any calculator from the command line.
//!
//! ```bash
//! gauge list
//! gauge schema bmi
//! gauge defaults life_expectancy > input.json
//! gauge run life_expectancy --input input.json --set exercise_days=5
//! gauge run bmi --set height_cm=180 --set weight_kg=75 --imperial
//! ```

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use gauge_core::settings::{Settings, UnitSystem};

mod commands;
mod display;

#[derive(Parser)]
#[command(name = "gauge")]
#[command(about = "Deterministic health, fertility and cost calculators", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Settings file (TOML)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Display heights, weights and volumes in imperial units
    #[arg(long, global = true)]
    imperial: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List available calculators
    List {
        /// Print the catalog as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the fields and formulas of a calculator
    Schema {
        /// Calculator id (e.g., bmi, life_expectancy)
        id: String,

        /// Print the schema as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print a calculator's default input as JSON
    Defaults {
        /// Calculator id
        id: String,
    },

    /// Validate input and run a calculator
    Run {
        /// Calculator id
        id: String,

        /// JSON input file ("-" reads stdin)
        #[arg(short, long, value_name = "FILE")]
        input: Option<PathBuf>,

        /// Field assignment, repeatable (e.g., --set weight_kg=80)
        #[arg(short, long = "set", value_name = "KEY=VALUE")]
        set: Vec<String>,

        /// Start from the calculator's default input
        #[arg(short, long)]
        defaults: bool,

        /// Print the report (or the validation errors) as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Show help if no command provided
    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    let settings = load_settings(cli.config.as_ref(), cli.imperial)?;

    match command {
        Commands::List { json } => commands::list::list_calculators(json),
        Commands::Schema { id, json } => commands::schema::show_schema(&id, json),
        Commands::Defaults { id } => commands::defaults::show_defaults(&id),
        Commands::Run {
            id,
            input,
            set,
            defaults,
            json,
        } => commands::run::run(
            &id,
            &commands::run::RunOptions {
                input,
                assignments: set,
                start_from_defaults: defaults,
                json,
            },
            &settings,
        ),
    }
}

/// Logs go to stderr so stdout stays clean for results.
fn init_tracing(verbose: u8) {
    let default_directive = match verbose {
        0 => "gauge=info",
        1 => "gauge=debug",
        _ => "gauge=trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn load_settings(config: Option<&PathBuf>, imperial: bool) -> Result<Settings> {
    let settings = match config {
        Some(path) => Settings::load(path).with_context(|| format!("Failed to load settings from {}", path.display()))?,
        None => Settings::default(),
    };

    Ok(if imperial {
        settings.with_unit_system(UnitSystem::Imperial)
    } else {
        settings
    })
}
