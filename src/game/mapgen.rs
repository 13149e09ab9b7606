//! Deterministic terrain generation.
//!
//! A river runs down the centre column; roughly a quarter of the remaining
//! tiles are mountains of grade 1 to 3, the rest are plains.

use crate::error::MapError;
use crate::game::{Coord, Grid, TerrainType};

/// Chance, out of 100, that a non-river tile is a mountain.
const MOUNTAIN_PERCENT: u32 = 25;

/// Deterministic PRNG using xorshift64.
#[derive(Debug, Clone, Copy)]
struct Rng {
    state: u64,
}

impl Rng {
    /// Create a new RNG with the given seed.
    const fn new(seed: u64) -> Self {
        // Ensure non-zero state
        let state = if seed == 0 { 0x5555_5555_5555_5555 } else { seed };
        Self { state }
    }

    /// Generate next random u64.
    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    /// Generate random u32 in [0, max).
    fn next_u32(&mut self, max: u32) -> u32 {
        if max == 0 {
            return 0;
        }
        u32::try_from(self.next_u64() % u64::from(max)).unwrap_or(0)
    }
}

/// Generate a `cols` x `rows` grid from `seed`.
///
/// The same seed and dimensions always produce the same terrain.
///
/// # Errors
///
/// Returns [`MapError::EmptyGrid`] if either dimension is zero.
pub fn generate_map(seed: u64, cols: u16, rows: u16) -> Result<Grid, MapError> {
    let mut rng = Rng::new(seed);
    let river = cols / 2;

    Grid::from_fn(cols, rows, |coord: Coord| {
        if coord.x == river {
            return TerrainType::River;
        }
        if rng.next_u32(100) >= MOUNTAIN_PERCENT {
            return TerrainType::Plain;
        }
        match rng.next_u32(3) {
            0 => TerrainType::Mountain1,
            1 => TerrainType::Mountain2,
            _ => TerrainType::Mountain3,
        }
    })
}
