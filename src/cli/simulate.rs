//! Simulate command implementation.

use super::output::{format_board, format_round, JsonSimulation, PlayerRound, RoundRecord};
use super::{load_scenario, CliError, OutputFormat};
use mule::{calculate_production, SimulationConfig};
use std::path::Path;
use tracing::info;

/// Longest simulation the CLI will run.
const MAX_ROUNDS: u32 = 10_000;

/// Check a requested round count before anything is simulated.
fn check_rounds(rounds: u32) -> Result<i32, CliError> {
    if rounds > MAX_ROUNDS {
        return Err(CliError::new(format!(
            "Cannot simulate {rounds} rounds: the limit is {MAX_ROUNDS}"
        )));
    }
    i32::try_from(rounds)
        .map_err(|_| CliError::new(format!("Round count {rounds} is out of range")))
}

/// Execute the simulate command.
///
/// Plays the turn controller: each round computes production for the whole
/// roster, then applies it to every stockpile before the next round.
///
/// # Errors
///
/// Returns an error if the scenario cannot be loaded or built, or if the
/// round count exceeds the CLI limit.
pub(crate) fn execute(
    scenario: Option<&Path>,
    seed: Option<u64>,
    rounds: Option<u32>,
    format: OutputFormat,
) -> Result<(), CliError> {
    let config = SimulationConfig::default();
    let scenario = load_scenario(scenario, seed, &config)?;
    let (map, mut players) = scenario.build(&config)?;
    let rounds = scenario.rounds(rounds, &config);
    let last_round = check_rounds(rounds)?;

    info!(scenario = %scenario.name, rounds, players = players.len(), "simulation started");

    let mut records = Vec::new();
    for round in 0..last_round {
        let report = calculate_production(&map, &players, round)?;

        let mut entries = Vec::with_capacity(players.len());
        for player in &mut players {
            let Some(production) = report.get(&player.id) else {
                continue;
            };
            let before = player.stock;
            player.apply_production(production);
            entries.push(PlayerRound {
                id: player.id,
                before,
                production: *production,
                after: player.stock,
            });
        }

        records.push(RoundRecord {
            round: round.unsigned_abs(),
            players: entries,
        });
    }

    match format {
        OutputFormat::Text => {
            println!("Scenario: {}", scenario.name);
            println!();
            print!("{}", format_board(&map));
            println!();
            for record in &records {
                print!("{}", format_round(record, &players));
            }
            println!();
            println!("Final stock:");
            for player in &players {
                let stock = player.stock;
                println!(
                    "  Player {} ({}): food {} energy {} smithore {} crystite {}",
                    player.id, player.name, stock.food, stock.energy, stock.smithore, stock.crystite
                );
            }
        }
        OutputFormat::Json => {
            let json = JsonSimulation::new(&scenario.name, &records, &players);
            let text = serde_json::to_string_pretty(&json)
                .map_err(|e| CliError::new(format!("JSON serialization failed: {e}")))?;
            println!("{text}");
        }
    }

    Ok(())
}
