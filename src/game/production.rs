//! Production engine: per-round usage, requirement, spoilage and output.
//!
//! Everything here is a pure function of its inputs. [`calculate_production`]
//! reads the map and the player stockpiles and returns a fresh report; the
//! caller decides when to apply it (see [`Player::apply_production`]).
//!
//! # Rules
//!
//! - Food upkeep starts at 3 units and rises by 1 every 4 rounds.
//! - Every non-energy MULE draws 1 energy per round.
//! - Smithore and crystite have no upkeep.
//! - Food above `requirement + 1` loses half, energy loses a quarter, smithore
//!   and crystite lose whatever exceeds 50 units.
//! - Each MULE yields the base rate of its terrain for its resource.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::{trace, warn};

use crate::error::ProductionError;
use crate::game::{MuleType, Player, PlayerId, ResourceType, TerrainType, WorldMap};

/// Base output of one MULE, indexed by terrain then resource.
///
/// Columns are food, energy, smithore, crystite.
pub const BASE_PRODUCTION: [[u32; ResourceType::COUNT]; TerrainType::COUNT] = [
    [2, 3, 1, 0], // plain
    [4, 2, 0, 0], // river
    [1, 1, 2, 0], // mountain 1
    [1, 1, 3, 0], // mountain 2
    [1, 1, 4, 0], // mountain 3
];

/// Units of smithore or crystite that can be stored without loss.
pub const STORAGE_CAP: u32 = 50;

/// Food upkeep in round 0.
const BASE_FOOD_USAGE: u32 = 3;

/// Rounds between food upkeep increases.
const FOOD_USAGE_PERIOD: u32 = 4;

/// One round's accounting for one player and one resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ProductionResult {
    /// Units consumed this round.
    pub usage: u32,
    /// Units lost from the stockpile this round.
    pub spoilage: u32,
    /// Units produced this round.
    pub production: u32,
    /// Usage expected next round. Informational only.
    pub requirement: u32,
}

impl ProductionResult {
    /// Net stock change: `production - usage - spoilage`.
    #[must_use]
    pub fn net(&self) -> i64 {
        i64::from(self.production) - i64::from(self.usage) - i64::from(self.spoilage)
    }
}

/// Results for every resource of one player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PlayerProduction {
    results: [ProductionResult; ResourceType::COUNT],
}

impl PlayerProduction {
    /// Result for `resource`.
    #[must_use]
    pub const fn get(&self, resource: ResourceType) -> &ProductionResult {
        &self.results[resource.index()]
    }

    /// Iterate over results in resource table order.
    pub fn iter(&self) -> impl Iterator<Item = (ResourceType, &ProductionResult)> + '_ {
        ResourceType::ALL.into_iter().zip(self.results.iter())
    }
}

/// Results for every player, keyed by id.
pub type ProductionReport = BTreeMap<PlayerId, PlayerProduction>;

/// Base output of one MULE producing `resource` on `terrain`.
#[must_use]
#[inline]
pub const fn base_production_of(terrain: TerrainType, resource: ResourceType) -> u32 {
    BASE_PRODUCTION[terrain.index()][resource.index()]
}

/// Clamp `quantity` into `[min, max]`.
///
/// # Panics
///
/// Panics if `min > max`; an empty range is a bug in the caller.
#[must_use]
pub const fn bound(quantity: u32, min: u32, max: u32) -> u32 {
    assert!(min <= max, "can't bound by an empty range: min > max");
    if quantity < min {
        min
    } else if quantity > max {
        max
    } else {
        quantity
    }
}

/// Units of `resource` that `player` consumes in `round`.
#[must_use]
pub fn usage_of(resource: ResourceType, player: PlayerId, map: &WorldMap, round: u32) -> u32 {
    match resource {
        ResourceType::Food => round / FOOD_USAGE_PERIOD + BASE_FOOD_USAGE,
        ResourceType::Energy => {
            let powered: usize = MuleType::ALL
                .into_iter()
                .filter(|mule| mule.consumes_energy())
                .map(|mule| map.count_tiles_with_mule(player, mule))
                .sum();
            u32::try_from(powered).unwrap_or(u32::MAX)
        }
        ResourceType::Smithore | ResourceType::Crystite => 0,
    }
}

/// Units of `resource` that spoil from a stock of `quantity`.
#[must_use]
pub const fn spoilage_of(resource: ResourceType, quantity: u32, requirement: u32) -> u32 {
    match resource {
        ResourceType::Food => {
            if quantity > requirement.saturating_add(1) {
                quantity / 2
            } else {
                0
            }
        }
        ResourceType::Energy => quantity / 4,
        ResourceType::Smithore | ResourceType::Crystite => {
            quantity - bound(quantity, 0, STORAGE_CAP)
        }
    }
}

/// Units of `resource` produced by `player`'s MULEs.
#[must_use]
pub fn production_of(resource: ResourceType, player: PlayerId, map: &WorldMap) -> u32 {
    map.tiles_with_mule(player, resource.produced_by())
        .map(|(_, tile)| base_production_of(tile.terrain(), resource))
        .fold(0u32, u32::saturating_add)
}

/// Compute one round of production for every player.
///
/// Economies of scale and learning-curve bonuses are not modelled.
/// Player ids in `players` must be unique; the report holds one entry per id.
///
/// # Errors
///
/// Returns [`ProductionError::NegativeRound`] if `round < 0`.
pub fn calculate_production(
    map: &WorldMap,
    players: &[Player],
    round: i32,
) -> Result<ProductionReport, ProductionError> {
    let Ok(round) = u32::try_from(round) else {
        warn!(round, "production requested for a negative round");
        return Err(ProductionError::NegativeRound(round));
    };

    let mut report = ProductionReport::new();

    for player in players {
        let mut results = [ProductionResult::default(); ResourceType::COUNT];

        for resource in ResourceType::ALL {
            let usage = usage_of(resource, player.id, map, round);
            let requirement = usage_of(resource, player.id, map, round.saturating_add(1));
            let spoilage = spoilage_of(resource, player.stock_of(resource), requirement);
            let production = production_of(resource, player.id, map);

            results[resource.index()] = ProductionResult {
                usage,
                spoilage,
                production,
                requirement,
            };
        }

        trace!(player = player.id, round, ?results, "production calculated");
        let previous = report.insert(player.id, PlayerProduction { results });
        debug_assert!(previous.is_none(), "player {} listed twice", player.id);
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Coord, Grid};

    /// One-row map with a MULE of the given kind on each listed terrain, all owned by player 1.
    fn developed_map(tiles: &[(TerrainType, MuleType)]) -> WorldMap {
        let cols = u16::try_from(tiles.len()).unwrap();
        let grid = Grid::from_fn(cols, 1, |c| tiles[usize::from(c.x)].0).unwrap();
        let mut map = WorldMap::new(grid, [1]);
        for (x, (_, mule)) in tiles.iter().enumerate() {
            map.select(i32::try_from(x).unwrap(), 0);
            assert!(map.buy_tile(1));
            map.install_mule(1, *mule).unwrap();
        }
        map
    }

    #[test]
    fn test_base_production_table() {
        use ResourceType::{Crystite, Energy, Food, Smithore};
        use TerrainType::{Mountain1, Mountain2, Mountain3, Plain, River};

        let expected = [
            (Plain, [2, 3, 1, 0]),
            (River, [4, 2, 0, 0]),
            (Mountain1, [1, 1, 2, 0]),
            (Mountain2, [1, 1, 3, 0]),
            (Mountain3, [1, 1, 4, 0]),
        ];
        for (terrain, row) in expected {
            for (resource, value) in [Food, Energy, Smithore, Crystite].into_iter().zip(row) {
                assert_eq!(
                    base_production_of(terrain, resource),
                    value,
                    "{terrain:?} {resource}"
                );
            }
        }
    }

    #[test]
    fn test_food_usage_steps_every_four_rounds() {
        let map = WorldMap::new(Grid::new(1, 1).unwrap(), [1]);
        let usage: Vec<_> = (0..12)
            .map(|round| usage_of(ResourceType::Food, 1, &map, round))
            .collect();
        assert_eq!(usage, vec![3, 3, 3, 3, 4, 4, 4, 4, 5, 5, 5, 5]);
    }

    #[test]
    fn test_energy_usage_counts_non_energy_mules() {
        let map = developed_map(&[
            (TerrainType::Plain, MuleType::Food),
            (TerrainType::Plain, MuleType::Energy),
            (TerrainType::Mountain2, MuleType::Smithore),
            (TerrainType::Mountain1, MuleType::Crystite),
        ]);
        assert_eq!(usage_of(ResourceType::Energy, 1, &map, 0), 3);
        assert_eq!(usage_of(ResourceType::Smithore, 1, &map, 0), 0);
        assert_eq!(usage_of(ResourceType::Crystite, 1, &map, 7), 0);
    }

    #[test]
    fn test_food_spoilage() {
        assert_eq!(spoilage_of(ResourceType::Food, 10, 5), 5);
        assert_eq!(spoilage_of(ResourceType::Food, 6, 5), 0);
        assert_eq!(spoilage_of(ResourceType::Food, 7, 5), 3);
        assert_eq!(spoilage_of(ResourceType::Food, 0, 3), 0);
    }

    #[test]
    fn test_energy_spoilage() {
        assert_eq!(spoilage_of(ResourceType::Energy, 9, 0), 2);
        assert_eq!(spoilage_of(ResourceType::Energy, 3, 0), 0);
    }

    #[test]
    fn test_ore_spoilage_above_cap() {
        assert_eq!(spoilage_of(ResourceType::Smithore, 60, 0), 10);
        assert_eq!(spoilage_of(ResourceType::Smithore, 40, 99), 0);
        assert_eq!(spoilage_of(ResourceType::Crystite, 50, 0), 0);
        assert_eq!(spoilage_of(ResourceType::Crystite, 51, 0), 1);
    }

    #[test]
    fn test_bound() {
        assert_eq!(bound(5, 1, 10), 5);
        assert_eq!(bound(0, 1, 10), 1);
        assert_eq!(bound(11, 1, 10), 10);
        assert_eq!(bound(7, 7, 7), 7);
    }

    #[test]
    #[should_panic(expected = "min > max")]
    fn test_bound_rejects_empty_range() {
        let _ = bound(5, 10, 1);
    }

    #[test]
    fn test_negative_round_rejected() {
        let map = WorldMap::new(Grid::new(1, 1).unwrap(), [1]);
        let players = vec![Player::new(1, "Red")];
        assert_eq!(
            calculate_production(&map, &players, -1),
            Err(ProductionError::NegativeRound(-1))
        );
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "listed twice")]
    fn test_duplicate_player_ids_caught() {
        let map = WorldMap::new(Grid::new(1, 1).unwrap(), [1]);
        let players = vec![Player::new(1, "Red"), Player::new(1, "Also red")];
        let _ = calculate_production(&map, &players, 0);
    }

    #[test]
    fn test_single_food_mule_round_zero() {
        let map = developed_map(&[(TerrainType::Plain, MuleType::Food)]);
        let mut player = Player::new(1, "Red");
        player.stock.food = 0;

        let report = calculate_production(&map, &[player], 0).unwrap();
        let food = report[&1].get(ResourceType::Food);
        assert_eq!(food.production, 2);
        assert_eq!(food.usage, 3);
        assert_eq!(food.requirement, 3);
        assert_eq!(food.spoilage, 0);
        assert_eq!(food.net(), -1);

        let energy = report[&1].get(ResourceType::Energy);
        assert_eq!(energy.usage, 1);
        assert_eq!(energy.production, 0);
    }

    #[test]
    fn test_production_sums_over_terrain() {
        let map = developed_map(&[
            (TerrainType::River, MuleType::Food),
            (TerrainType::Plain, MuleType::Food),
            (TerrainType::Mountain3, MuleType::Smithore),
            (TerrainType::Mountain1, MuleType::Smithore),
        ]);
        assert_eq!(production_of(ResourceType::Food, 1, &map), 6);
        assert_eq!(production_of(ResourceType::Smithore, 1, &map), 6);
        assert_eq!(production_of(ResourceType::Energy, 1, &map), 0);
    }

    #[test]
    fn test_landless_player_produces_nothing() {
        let map = developed_map(&[(TerrainType::Plain, MuleType::Energy)]);
        let players = vec![Player::new(1, "Red"), Player::new(2, "Blue")];

        for round in [0, 5, 40] {
            let report = calculate_production(&map, &players, round).unwrap();
            for (_, result) in report[&2].iter() {
                assert_eq!(result.production, 0);
            }
        }
    }

    #[test]
    fn test_calculation_is_repeatable_and_read_only() {
        let map = developed_map(&[(TerrainType::River, MuleType::Food)]);
        let players = vec![Player::new(1, "Red")];
        let first = calculate_production(&map, &players, 3).unwrap();
        let second = calculate_production(&map, &players, 3).unwrap();
        assert_eq!(first, second);
        assert_eq!(players[0].stock_of(ResourceType::Food), 8);
        assert_eq!(map.cursor(), Coord::new(0, 0));
    }

    #[test]
    fn test_requirement_looks_one_round_ahead() {
        let map = WorldMap::new(Grid::new(1, 1).unwrap(), [1]);
        let players = vec![Player::new(1, "Red")];
        let report = calculate_production(&map, &players, 3).unwrap();
        let food = report[&1].get(ResourceType::Food);
        assert_eq!(food.usage, 3);
        assert_eq!(food.requirement, 4);
        // 8 food > 4 + 1, so half spoils
        assert_eq!(food.spoilage, 4);
    }
}
