//! Mule CLI - command-line driver for the land-grant economy.

// Allow print in the CLI binary
#![allow(clippy::print_stdout, clippy::print_stderr)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

mod cli;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Mule - land grants, MULEs and the production that follows
#[derive(Parser, Debug)]
#[command(name = "mule")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Log refused selections, purchases and production details
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Run production rounds and apply them to every stockpile
    Simulate {
        /// Scenario JSON file (default: generated board, no land taken)
        #[arg(long)]
        scenario: Option<PathBuf>,

        /// Seed for a generated board (default: 42)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Rounds to simulate (default: scenario value, else 12)
        #[arg(short, long)]
        rounds: Option<u32>,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: cli::OutputFormat,
    },

    /// Print the board
    Show {
        /// Scenario JSON file (default: generated board)
        #[arg(long)]
        scenario: Option<PathBuf>,

        /// Seed for a generated board (default: 42)
        #[arg(short, long)]
        seed: Option<u64>,
    },

    /// Check a scenario file for errors
    Validate {
        /// Scenario JSON file to validate
        #[arg(required = true)]
        scenario: PathBuf,
    },
}

/// Install the stderr log subscriber; `RUST_LOG` wins over `--verbose`.
fn init_logging(verbose: bool) {
    let default = if verbose { "mule=debug" } else { "mule=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    let result = match args.command {
        Commands::Simulate {
            scenario,
            seed,
            rounds,
            format,
        } => cli::simulate::execute(scenario.as_deref(), seed, rounds, format),

        Commands::Show { scenario, seed } => cli::show::execute(scenario.as_deref(), seed),

        Commands::Validate { scenario } => cli::validate::execute(&scenario),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
