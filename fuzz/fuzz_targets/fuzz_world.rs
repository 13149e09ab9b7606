#![no_main]

//! World map fuzzer.
//!
//! Drives the cursor and the land office with arbitrary actions and checks
//! that ownership bookkeeping never drifts from the tiles.

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use mule::game::check_invariants;
use mule::{Grid, MuleType, WorldMap};

/// A fuzzer-generated player action.
#[derive(Arbitrary, Debug, Clone, Copy)]
enum Action {
    Select { x: i16, y: i16 },
    Relative { dx: i32, dy: i32 },
    LeftWrap,
    RightWrap,
    Buy { player: u8 },
    Install { player: u8, mule: u8 },
}

/// Structured input for world fuzzing.
#[derive(Arbitrary, Debug)]
struct WorldInput {
    cols: u8,
    rows: u8,
    players: u8,
    actions: Vec<Action>,
}

fuzz_target!(|input: WorldInput| {
    let cols = u16::from(input.cols % 16);
    let rows = u16::from(input.rows % 16);
    let Ok(grid) = Grid::new(cols, rows) else {
        return;
    };
    let players = input.players % 8 + 1;
    let mut map = WorldMap::new(grid, 1..=players);

    for action in input.actions.iter().take(256) {
        match *action {
            Action::Select { x, y } => {
                let moved = map.select(i32::from(x), i32::from(y));
                let inside = x >= 0 && y >= 0 && (x as u16) < cols && (y as u16) < rows;
                assert_eq!(moved, inside);
            }
            Action::Relative { dx, dy } => {
                map.select_rel(dx, dy);
            }
            Action::LeftWrap => assert!(map.select_left_wrap()),
            Action::RightWrap => assert!(map.select_right_wrap()),
            Action::Buy { player } => {
                let owner = map.cursor_tile().owner();
                let bought = map.buy_tile(player);
                assert_eq!(bought, owner.is_none() || owner == Some(player));
            }
            Action::Install { player, mule } => {
                let mule = MuleType::ALL[usize::from(mule) % MuleType::ALL.len()];
                let _ = map.install_mule(player, mule);
            }
        }

        let violations = check_invariants(&map);
        assert!(violations.is_empty(), "{violations:?}");
    }
});
