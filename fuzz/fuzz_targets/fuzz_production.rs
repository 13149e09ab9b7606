#![no_main]

//! Production fuzzer.
//!
//! Arbitrary boards, holdings, stock and rounds must never panic, and the
//! applied stock must match the ledger clamped at zero.

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use mule::game::generate_map;
use mule::{calculate_production, MuleType, Player, ResourceType, WorldMap};

/// Structured input for production fuzzing.
#[derive(Arbitrary, Debug)]
struct ProductionInput {
    seed: u64,
    cols: u8,
    rows: u8,
    round: i32,
    stock: [u32; 4],
    holdings: Vec<(u8, u8, u8)>,
}

fuzz_target!(|input: ProductionInput| {
    let cols = u16::from(input.cols % 20);
    let rows = u16::from(input.rows % 20);
    let Ok(grid) = generate_map(input.seed, cols, rows) else {
        return;
    };
    let mut map = WorldMap::new(grid, [1]);

    for &(x, y, mule) in input.holdings.iter().take(64) {
        if map.select(i32::from(x), i32::from(y)) && map.buy_tile(1) {
            let _ = map.install_mule(1, MuleType::ALL[usize::from(mule) % 4]);
        }
    }

    let mut player = Player::new(1, "fuzz");
    for resource in ResourceType::ALL {
        player.stock.set(resource, input.stock[resource.index()]);
    }

    let report = match calculate_production(&map, std::slice::from_ref(&player), input.round) {
        Ok(report) => report,
        Err(_) => {
            assert!(input.round < 0);
            return;
        }
    };

    let production = report[&1];
    let before = player.stock;
    player.apply_production(&production);
    for resource in ResourceType::ALL {
        let result = production.get(resource);
        let expected = (i64::from(before.get(resource)) + result.net()).max(0);
        assert_eq!(i64::from(player.stock_of(resource)), expected);
    }
});
