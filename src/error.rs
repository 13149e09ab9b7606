//! Error types for the land map and the production engine.

use thiserror::Error;

use crate::game::{Coord, PlayerId};

/// Errors raised by grid and world-map operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MapError {
    /// A coordinate fell outside `[0, cols) x [0, rows)`.
    #[error("coordinate ({x}, {y}) is outside the {cols}x{rows} grid")]
    OutOfRange {
        /// Requested column.
        x: i64,
        /// Requested row.
        y: i64,
        /// Number of columns in the grid.
        cols: u16,
        /// Number of rows in the grid.
        rows: u16,
    },
    /// A grid needs at least one row and one column.
    #[error("grid dimensions must be non-zero, got {cols}x{rows}")]
    EmptyGrid {
        /// Requested number of columns.
        cols: u16,
        /// Requested number of rows.
        rows: u16,
    },
    /// The terrain list does not cover the grid exactly.
    #[error("expected {expected} terrain entries, got {actual}")]
    TerrainCount {
        /// `cols * rows`.
        expected: usize,
        /// Entries supplied.
        actual: usize,
    },
    /// The owner of an unowned tile was requested.
    #[error("tile at {0:?} has no owner")]
    Unowned(Coord),
    /// A player tried to develop land they do not own.
    #[error("player {player} does not own tile at {coord:?}")]
    NotOwner {
        /// Player attempting the operation.
        player: PlayerId,
        /// Tile under the cursor.
        coord: Coord,
    },
    /// The tile already hosts an installation.
    #[error("tile at {0:?} already has a MULE installed")]
    AlreadyDeveloped(Coord),
}

/// Errors raised by the production engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ProductionError {
    /// Production was requested for a round before the first.
    #[error("can't calculate production for round {0}: negative round")]
    NegativeRound(i32),
}
