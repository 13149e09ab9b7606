//! Scenario validation command implementation.

use super::CliError;
use mule::game::check_invariants;
use mule::{Scenario, SimulationConfig};
use std::path::Path;

/// Execute the validate command.
///
/// # Errors
///
/// Returns an error if the scenario cannot be read, parsed or built, or if
/// the built map breaks an ownership invariant.
pub(crate) fn execute(path: &Path) -> Result<(), CliError> {
    println!("Validating: {}", path.display());
    println!();

    let scenario = match Scenario::load(path) {
        Ok(scenario) => {
            print_check("Scenario parses", true);
            scenario
        }
        Err(e) => {
            print_check("Scenario parses", false);
            return Err(e.into());
        }
    };

    let config = SimulationConfig::default();
    let (map, players) = match scenario.build(&config) {
        Ok(built) => {
            print_check("Board and holdings apply", true);
            built
        }
        Err(e) => {
            print_check("Board and holdings apply", false);
            return Err(e.into());
        }
    };

    let violations = check_invariants(&map);
    print_check("Ownership invariants", violations.is_empty());
    if let Some(first) = violations.first() {
        for violation in &violations {
            println!("    {violation}");
        }
        return Err(CliError::new(first.to_string()));
    }

    let developed = map.iter().filter(|(_, tile)| tile.has_mule()).count();

    println!();
    println!("Summary:");
    println!("  Name:       {}", scenario.name);
    println!("  Board:      {}x{}", map.columns(), map.rows());
    println!("  Players:    {}", players.len());
    println!("  Holdings:   {}", scenario.holdings.len());
    println!("  MULEs:      {developed}");
    println!("  Rounds:     {}", scenario.rounds(None, &config));
    println!();
    println!("Validation successful!");

    Ok(())
}

fn print_check(name: &str, ok: bool) {
    let status = if ok { "OK" } else { "FAILED" };
    let symbol = if ok { "✓" } else { "✗" };
    println!("  {symbol} {name}: {status}");
}
