//! Property-based tests for the world map and production engine.
//!
//! Run with: cargo test --release prop_world

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]

use proptest::prelude::*;

use mule::game::{check_invariants, generate_map, usage_of, Stockpile};
use mule::{calculate_production, Grid, MuleType, Player, ResourceType, WorldMap};

/// A map operation a player could issue.
#[derive(Debug, Clone)]
enum Op {
    Select(i32, i32),
    Move(u8),
    Buy(u8),
    Install(u8, u8),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (-3i32..12, -3i32..12).prop_map(|(x, y)| Op::Select(x, y)),
        (0u8..6).prop_map(Op::Move),
        (1u8..=3).prop_map(Op::Buy),
        (1u8..=3, 0u8..4).prop_map(|(p, m)| Op::Install(p, m)),
    ]
}

fn apply(map: &mut WorldMap, op: &Op) {
    match *op {
        Op::Select(x, y) => {
            map.select(x, y);
        }
        Op::Move(dir) => {
            match dir {
                0 => map.select_up(),
                1 => map.select_down(),
                2 => map.select_left(),
                3 => map.select_right(),
                4 => map.select_left_wrap(),
                _ => map.select_right_wrap(),
            };
        }
        Op::Buy(player) => {
            map.buy_tile(player);
        }
        Op::Install(player, mule) => {
            let _ = map.install_mule(player, MuleType::ALL[usize::from(mule)]);
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(2000))]

    /// Selection succeeds exactly for on-map coordinates; misses leave the cursor alone.
    #[test]
    fn prop_select_respects_bounds(
        cols in 1u16..12,
        rows in 1u16..12,
        x in -20i32..20,
        y in -20i32..20,
    ) {
        let mut map = WorldMap::new(Grid::new(cols, rows).unwrap(), [1]);
        map.select(i32::from(cols) - 1, i32::from(rows) - 1);
        let before = map.cursor();

        let inside = x >= 0 && y >= 0 && x < i32::from(cols) && y < i32::from(rows);
        prop_assert_eq!(map.select(x, y), inside);
        if inside {
            prop_assert_eq!(i32::from(map.cursor().x), x);
            prop_assert_eq!(i32::from(map.cursor().y), y);
        } else {
            prop_assert_eq!(map.cursor(), before);
        }
    }

    /// Iteration visits every tile exactly once.
    #[test]
    fn prop_iter_visits_every_tile(cols in 1u16..20, rows in 1u16..20, seed in any::<u64>()) {
        let grid = generate_map(seed, cols, rows).unwrap();
        prop_assert_eq!(grid.iter().count(), usize::from(cols) * usize::from(rows));
        prop_assert_eq!(grid.tile_count(), grid.tiles().len());
    }

    /// Any sequence of player actions keeps tile owners and holdings in agreement.
    #[test]
    fn prop_ownership_stays_consistent(ops in prop::collection::vec(op_strategy(), 0..80)) {
        let mut map = WorldMap::new(Grid::new(6, 4).unwrap(), [1, 2, 3]);
        for op in &ops {
            apply(&mut map, op);
        }

        let violations = check_invariants(&map);
        prop_assert!(violations.is_empty(), "{:?}", violations);

        for player in 1..=3 {
            let counted = map.iter().filter(|(_, t)| t.owner() == Some(player)).count();
            prop_assert_eq!(map.land_owned_by(player), counted);
        }
    }

    /// Right-wrapping cols*rows times returns the cursor to where it started.
    #[test]
    fn prop_wrap_is_a_cycle(cols in 1u16..10, rows in 1u16..10, x in 0u16..10, y in 0u16..10) {
        let mut map = WorldMap::new(Grid::new(cols, rows).unwrap(), [1]);
        map.select(i32::from(x % cols), i32::from(y % rows));
        let start = map.cursor();

        for _ in 0..usize::from(cols) * usize::from(rows) {
            prop_assert!(map.select_right_wrap());
        }
        prop_assert_eq!(map.cursor(), start);
    }

    /// Food upkeep never falls as rounds pass.
    #[test]
    fn prop_food_usage_monotonic(round in 0u32..100_000) {
        let map = WorldMap::new(Grid::new(1, 1).unwrap(), [1]);
        let now = usage_of(ResourceType::Food, 1, &map, round);
        let next = usage_of(ResourceType::Food, 1, &map, round + 1);
        prop_assert!(next >= now);
        prop_assert!(now >= 3);
    }

    /// A player without land produces nothing and only eats.
    #[test]
    fn prop_landless_player_produces_nothing(
        round in 0i32..1000,
        food in 0u32..500,
        energy in 0u32..500,
    ) {
        let map = WorldMap::new(generate_map(9, 9, 5).unwrap(), [1]);
        let mut player = Player::new(1, "Drifter");
        player.stock = Stockpile { food, energy, ..Stockpile::default() };

        let report = calculate_production(&map, &[player], round).unwrap();
        let production = &report[&1];
        for resource in ResourceType::ALL {
            prop_assert_eq!(production.get(resource).production, 0);
        }
        prop_assert_eq!(production.get(ResourceType::Energy).usage, 0);
    }

    /// Applying a round never leaves a negative or inflated stock.
    #[test]
    fn prop_stock_update_bounded(
        ops in prop::collection::vec(op_strategy(), 0..40),
        round in 0i32..48,
        food in 0u32..100,
    ) {
        let mut map = WorldMap::new(Grid::new(6, 4).unwrap(), [1, 2, 3]);
        for op in &ops {
            apply(&mut map, op);
        }
        let mut player = Player::new(1, "Red");
        player.stock.food = food;

        let report = calculate_production(&map, std::slice::from_ref(&player), round).unwrap();
        let production = report[&1];
        let before = player.stock;
        player.apply_production(&production);

        for resource in ResourceType::ALL {
            let result = production.get(resource);
            let expected = (i64::from(before.get(resource)) + result.net()).max(0);
            prop_assert_eq!(i64::from(player.stock_of(resource)), expected);
        }
    }
}
