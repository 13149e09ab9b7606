//! CLI command implementations for Mule.

pub(crate) mod show;
pub(crate) mod simulate;
pub(crate) mod validate;

mod output;

use clap::ValueEnum;
use mule::{Scenario, ScenarioError, SimulationConfig};
use std::error::Error;
use std::fmt;
use std::path::Path;

/// Seed used for generated boards when none is given.
const DEFAULT_SEED: u64 = 42;

/// Output format for the `simulate` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// Machine-readable JSON output.
    Json,
}

/// CLI error type.
#[derive(Debug)]
pub(crate) struct CliError {
    message: String,
}

impl CliError {
    /// Create a new CLI error.
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for CliError {}

impl From<ScenarioError> for CliError {
    fn from(e: ScenarioError) -> Self {
        Self::new(e.to_string())
    }
}

impl From<mule::ProductionError> for CliError {
    fn from(e: mule::ProductionError) -> Self {
        Self::new(e.to_string())
    }
}

/// Load the scenario file, or fall back to a generated board.
fn load_scenario(
    path: Option<&Path>,
    seed: Option<u64>,
    config: &SimulationConfig,
) -> Result<Scenario, CliError> {
    match path {
        Some(path) => {
            let mut scenario = Scenario::load(path).map_err(|e| {
                CliError::new(format!("Failed to load {}: {e}", path.display()))
            })?;
            if seed.is_some() {
                scenario.seed = seed;
            }
            Ok(scenario)
        }
        None => Ok(Scenario::generated(seed.unwrap_or(DEFAULT_SEED), config)),
    }
}
