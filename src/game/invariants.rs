//! Map invariants - sanity checks that detect bookkeeping bugs.
//!
//! `WorldMap` keeps ownership both on tiles and in per-player sets. These
//! checks should NEVER fail for a map mutated only through its public API.

use crate::game::WorldMap;

/// Invariant violation error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub message: String,
}

impl std::fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Invariant violation: {}", self.message)
    }
}

impl std::error::Error for InvariantViolation {}

/// Check all map invariants.
///
/// Returns a list of violations found, or empty if all invariants hold.
#[must_use]
pub fn check_invariants(map: &WorldMap) -> Vec<InvariantViolation> {
    let mut violations = Vec::new();

    if !map.grid().in_bounds(map.cursor()) {
        violations.push(InvariantViolation {
            message: format!("Cursor {:?} is off the grid", map.cursor()),
        });
    }

    // Tile owner -> holdings set
    for (coord, tile) in map.iter() {
        match tile.owner() {
            Some(owner) => {
                if !map.owned_by(owner).any(|c| c == coord) {
                    violations.push(InvariantViolation {
                        message: format!(
                            "Tile at {coord:?} is owned by player {owner} but missing from their holdings"
                        ),
                    });
                }
            }
            None => {
                if let Some(mule) = tile.mule() {
                    violations.push(InvariantViolation {
                        message: format!("Unowned tile at {coord:?} has a {mule:?} MULE"),
                    });
                }
            }
        }
    }

    // Holdings set -> tile owner
    for player in map.players() {
        for coord in map.owned_by(player) {
            let owner = map.grid().get(coord).ok().and_then(|tile| tile.owner());
            if owner != Some(player) {
                violations.push(InvariantViolation {
                    message: format!(
                        "Player {player} holds {coord:?} but the tile owner is {owner:?}"
                    ),
                });
            }
        }
    }

    violations
}
