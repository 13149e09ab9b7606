//! Output formatting utilities for CLI.

// Allow format! with push_str for readability - the allocation overhead is negligible for text rendering
#![allow(clippy::format_push_string)]

use mule::game::{PlayerProduction, Stockpile};
use mule::{Player, PlayerId, ProductionResult, ResourceType, WorldMap};
use serde::Serialize;

/// One round of a simulation, as applied to the stockpiles.
#[derive(Debug)]
pub(super) struct RoundRecord {
    /// Round number (0-indexed).
    pub(super) round: u32,
    /// One entry per player.
    pub(super) players: Vec<PlayerRound>,
}

/// One player's round: stock before, computed results, stock after.
#[derive(Debug)]
pub(super) struct PlayerRound {
    /// Player ID.
    pub(super) id: PlayerId,
    /// Stock before applying the round.
    pub(super) before: Stockpile,
    /// Computed results.
    pub(super) production: PlayerProduction,
    /// Stock after applying the round.
    pub(super) after: Stockpile,
}

/// JSON-serializable simulation.
#[derive(Debug, Serialize)]
pub(super) struct JsonSimulation {
    /// Scenario name.
    pub(super) scenario: String,
    /// Rounds in order.
    pub(super) rounds: Vec<JsonRound>,
    /// Final stock per player.
    pub(super) final_stock: Vec<JsonPlayerStock>,
}

/// JSON-serializable round.
#[derive(Debug, Serialize)]
pub(super) struct JsonRound {
    /// Round number.
    pub(super) round: u32,
    /// Ledger lines, one per player and resource.
    pub(super) ledger: Vec<JsonLedgerLine>,
}

/// JSON-serializable ledger line.
#[derive(Debug, Serialize)]
pub(super) struct JsonLedgerLine {
    /// Player ID.
    pub(super) player: PlayerId,
    /// Resource accounted.
    pub(super) resource: ResourceType,
    /// Stock before the round.
    pub(super) stock_before: u32,
    /// Stock after applying the round.
    pub(super) stock_after: u32,
    /// Computed quantities.
    #[serde(flatten)]
    pub(super) result: ProductionResult,
}

/// JSON-serializable final stock.
#[derive(Debug, Serialize)]
pub(super) struct JsonPlayerStock {
    /// Player ID.
    pub(super) id: PlayerId,
    /// Player name.
    pub(super) name: String,
    /// Stock on hand.
    pub(super) stock: Stockpile,
}

impl JsonSimulation {
    /// Create from round records.
    pub(super) fn new(scenario: &str, records: &[RoundRecord], players: &[Player]) -> Self {
        Self {
            scenario: scenario.to_string(),
            rounds: records
                .iter()
                .map(|record| JsonRound {
                    round: record.round,
                    ledger: record
                        .players
                        .iter()
                        .flat_map(|entry| {
                            entry.production.iter().map(move |(resource, result)| {
                                JsonLedgerLine {
                                    player: entry.id,
                                    resource,
                                    stock_before: entry.before.get(resource),
                                    stock_after: entry.after.get(resource),
                                    result: *result,
                                }
                            })
                        })
                        .collect(),
                })
                .collect(),
            final_stock: players
                .iter()
                .map(|p| JsonPlayerStock {
                    id: p.id,
                    name: p.name.clone(),
                    stock: p.stock,
                })
                .collect(),
        }
    }
}

/// Format a round ledger as human-readable text.
pub(super) fn format_round(record: &RoundRecord, players: &[Player]) -> String {
    let mut output = format!("Round {}\n", record.round);

    for entry in &record.players {
        let name = players
            .iter()
            .find(|p| p.id == entry.id)
            .map_or("Unknown", |p| p.name.as_str());
        output.push_str(&format!("  Player {} ({name})\n", entry.id));

        for (resource, result) in entry.production.iter() {
            output.push_str(&format!(
                "    {:<9} {:>4} +{:<3} -{:<3} spoil {:<3} -> {:>4}  (next round needs {})\n",
                resource.name(),
                entry.before.get(resource),
                result.production,
                result.usage,
                result.spoilage,
                entry.after.get(resource),
                result.requirement,
            ));
        }
    }

    output
}

/// Format the board as text.
///
/// Each cell shows terrain, owner (or `.`) and MULE (or `-`); the cursor
/// cell is bracketed.
pub(super) fn format_board(map: &WorldMap) -> String {
    let mut output = String::from("   ");
    for x in 0..map.columns() {
        output.push_str(&format!(" {x:^3} "));
    }
    output.push('\n');

    let cursor = map.cursor();
    let mut row = None;
    for (coord, tile) in map.iter() {
        if row != Some(coord.y) {
            if row.is_some() {
                output.push('\n');
            }
            output.push_str(&format!("{:>3}", coord.y));
            row = Some(coord.y);
        }

        let owner = tile
            .owner()
            .map_or('.', |id| char::from_digit(u32::from(id) % 36, 36).unwrap_or('?'));
        let mule = tile.mule().map_or('-', mule::MuleType::symbol);
        let (open, close) = if coord == cursor { ('[', ']') } else { (' ', ' ') };
        output.push_str(&format!(
            "{open}{}{owner}{mule}{close}",
            tile.terrain().symbol()
        ));
    }
    output.push('\n');

    output.push_str(
        "\nLegend: P=Plain R=River 1-3=Mountain  2nd=Owner  3rd=MULE (f/e/s/c)  []=Cursor\n",
    );
    output
}
