//! Scenario files and simulation settings.
//!
//! A scenario is a JSON document describing the board, the colonists and the
//! land they start with:
//!
//! ```json
//! {
//!   "name": "river valley",
//!   "map": ["P1R2P", "PPR3P"],
//!   "players": [{ "id": 1, "name": "Red", "stock": { "food": 8, "energy": 4 } }],
//!   "holdings": [{ "player": 1, "col": 2, "row": 0, "mule": "food" }],
//!   "rounds": 12
//! }
//! ```
//!
//! Terrain symbols are `P` (plain), `R` (river) and `1`-`3` (mountain grade);
//! whitespace inside a row is ignored. When `map` is empty the board is
//! generated from `seed`.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::MapError;
use crate::game::{
    generate_map, Coord, Grid, MuleType, Player, PlayerId, Stockpile, TerrainType, WorldMap,
};

/// Settings used when a scenario leaves something out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulationConfig {
    /// Rounds to simulate.
    pub rounds: u32,
    /// Columns of a generated map.
    pub map_cols: u16,
    /// Rows of a generated map.
    pub map_rows: u16,
    /// Colonists in a generated scenario.
    pub players: u8,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            rounds: 12,
            map_cols: 9,
            map_rows: 5,
            players: 2,
        }
    }
}

/// Errors raised while loading or building a scenario.
#[derive(Debug, Error)]
pub enum ScenarioError {
    /// The file could not be read.
    #[error("failed to read scenario: {0}")]
    Io(#[from] std::io::Error),
    /// The document is not valid scenario JSON.
    #[error("failed to parse scenario: {0}")]
    Json(#[from] serde_json::Error),
    /// The board could not be built or a holding could not be applied.
    #[error(transparent)]
    Map(#[from] MapError),
    /// A map row contains a character that is not a terrain symbol.
    #[error("unknown terrain symbol {symbol:?} at row {row}, column {col}")]
    UnknownTerrain {
        /// Row of the bad symbol.
        row: usize,
        /// Column of the bad symbol.
        col: usize,
        /// The offending character.
        symbol: char,
    },
    /// Map rows have different lengths.
    #[error("map row {row} has {actual} tiles, expected {expected}")]
    RaggedMap {
        /// Row index.
        row: usize,
        /// Width of the first row.
        expected: usize,
        /// Width of this row.
        actual: usize,
    },
    /// The map is wider or taller than a grid can hold.
    #[error("map is too large: {cols}x{rows}")]
    MapTooLarge {
        /// Columns requested.
        cols: usize,
        /// Rows requested.
        rows: usize,
    },
    /// The scenario lists no players.
    #[error("scenario must define at least one player")]
    NoPlayers,
    /// Two players share an id.
    #[error("player id {0} defined more than once")]
    DuplicatePlayer(PlayerId),
    /// A holding references a player that is not listed.
    #[error("holding references unknown player {0}")]
    UnknownPlayer(PlayerId),
    /// Two holdings claim the same tile.
    #[error("player {player} cannot hold ({col}, {row}): already owned")]
    TakenTile {
        /// Player whose claim was refused.
        player: PlayerId,
        /// Column of the tile.
        col: u16,
        /// Row of the tile.
        row: u16,
    },
}

/// A colonist as listed in a scenario.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSpec {
    /// Player id.
    pub id: PlayerId,
    /// Display name; defaults to `Player <id>`.
    #[serde(default)]
    pub name: Option<String>,
    /// Starting stock; defaults to the beginner allotment.
    #[serde(default = "Stockpile::starting")]
    pub stock: Stockpile,
}

/// A tile a player starts with, optionally already developed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Holding {
    /// Owning player.
    pub player: PlayerId,
    /// Column of the tile.
    pub col: u16,
    /// Row of the tile.
    pub row: u16,
    /// MULE installed on the tile.
    #[serde(default)]
    pub mule: Option<MuleType>,
}

/// A complete starting position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    /// Scenario name.
    pub name: String,
    /// Seed for a generated board.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Board rows as terrain symbols; empty means generate.
    #[serde(default)]
    pub map: Vec<String>,
    /// Colonists.
    pub players: Vec<PlayerSpec>,
    /// Starting land.
    #[serde(default)]
    pub holdings: Vec<Holding>,
    /// Rounds to simulate.
    #[serde(default)]
    pub rounds: Option<u32>,
}

impl Scenario {
    /// Load a scenario from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ScenarioError> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Parse a scenario from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`ScenarioError::Json`] if the text is not a valid scenario.
    pub fn from_json(text: &str) -> Result<Self, ScenarioError> {
        Ok(serde_json::from_str(text)?)
    }

    /// A scenario on a generated board with no land taken yet.
    #[must_use]
    pub fn generated(seed: u64, config: &SimulationConfig) -> Self {
        Self {
            name: format!("generated-{seed}"),
            seed: Some(seed),
            map: Vec::new(),
            players: (1..=config.players)
                .map(|id| PlayerSpec {
                    id,
                    name: None,
                    stock: Stockpile::starting(),
                })
                .collect(),
            holdings: Vec::new(),
            rounds: Some(config.rounds),
        }
    }

    /// Rounds to simulate: the override, else the scenario's, else the default.
    #[must_use]
    pub fn rounds(&self, override_rounds: Option<u32>, config: &SimulationConfig) -> u32 {
        override_rounds.or(self.rounds).unwrap_or(config.rounds)
    }

    /// Build the board described by `map`, or generate one from `seed`.
    ///
    /// # Errors
    ///
    /// Returns an error for unknown symbols, ragged rows or empty boards.
    pub fn grid(&self, config: &SimulationConfig) -> Result<Grid, ScenarioError> {
        if self.map.is_empty() {
            return Ok(generate_map(
                self.seed.unwrap_or_default(),
                config.map_cols,
                config.map_rows,
            )?);
        }

        let mut terrain = Vec::new();
        let mut width = None;

        for (row, line) in self.map.iter().enumerate() {
            let start = terrain.len();
            for (col, symbol) in line.chars().filter(|c| !c.is_whitespace()).enumerate() {
                let kind = TerrainType::from_symbol(symbol)
                    .ok_or(ScenarioError::UnknownTerrain { row, col, symbol })?;
                terrain.push(kind);
            }

            let actual = terrain.len() - start;
            let expected = *width.get_or_insert(actual);
            if actual != expected {
                return Err(ScenarioError::RaggedMap {
                    row,
                    expected,
                    actual,
                });
            }
        }

        let cols_len = width.unwrap_or_default();
        let rows_len = self.map.len();
        let (Ok(cols), Ok(rows)) = (u16::try_from(cols_len), u16::try_from(rows_len)) else {
            return Err(ScenarioError::MapTooLarge {
                cols: cols_len,
                rows: rows_len,
            });
        };

        Ok(Grid::from_terrain(cols, rows, &terrain)?)
    }

    /// Build the world map and roster, applying every holding.
    ///
    /// Holdings go through the same select/buy/install calls a player would
    /// make, so a built scenario always satisfies the ownership invariants.
    ///
    /// # Errors
    ///
    /// Returns an error if the board is invalid, players are missing or
    /// duplicated, or a holding cannot be applied.
    pub fn build(
        &self,
        config: &SimulationConfig,
    ) -> Result<(WorldMap, Vec<Player>), ScenarioError> {
        if self.players.is_empty() {
            return Err(ScenarioError::NoPlayers);
        }

        let mut ids = BTreeSet::new();
        let mut players = Vec::with_capacity(self.players.len());
        for spec in &self.players {
            if !ids.insert(spec.id) {
                return Err(ScenarioError::DuplicatePlayer(spec.id));
            }
            let name = spec
                .name
                .clone()
                .unwrap_or_else(|| format!("Player {}", spec.id));
            let mut player = Player::new(spec.id, name);
            player.stock = spec.stock;
            players.push(player);
        }

        let mut map = WorldMap::new(self.grid(config)?, ids.iter().copied());

        for holding in &self.holdings {
            if !ids.contains(&holding.player) {
                return Err(ScenarioError::UnknownPlayer(holding.player));
            }
            map.grid().get(Coord::new(holding.col, holding.row))?;
            map.select(i32::from(holding.col), i32::from(holding.row));

            if !map.buy_tile(holding.player) {
                return Err(ScenarioError::TakenTile {
                    player: holding.player,
                    col: holding.col,
                    row: holding.row,
                });
            }
            if let Some(mule) = holding.mule {
                map.install_mule(holding.player, mule)?;
            }
        }

        map.select(0, 0);
        Ok((map, players))
    }
}
