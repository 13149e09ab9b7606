//! Show command implementation.

use super::output::format_board;
use super::{load_scenario, CliError};
use mule::SimulationConfig;
use std::path::Path;

/// Execute the show command.
///
/// # Errors
///
/// Returns an error if the scenario cannot be loaded or built.
pub(crate) fn execute(scenario: Option<&Path>, seed: Option<u64>) -> Result<(), CliError> {
    let config = SimulationConfig::default();
    let scenario = load_scenario(scenario, seed, &config)?;
    let (map, players) = scenario.build(&config)?;

    println!("{} ({}x{})", scenario.name, map.columns(), map.rows());
    println!();
    print!("{}", format_board(&map));
    println!();
    for player in &players {
        println!(
            "  Player {} ({}): {} tiles",
            player.id,
            player.name,
            map.land_owned_by(player.id)
        );
    }

    Ok(())
}
