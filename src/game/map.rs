//! Grid, tile and terrain types.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::error::MapError;
use crate::game::{MuleType, PlayerId};

/// A coordinate on the grid.
///
/// Coordinates order row-major: by row, then by column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coord {
    /// X coordinate (column).
    pub x: u16,
    /// Y coordinate (row).
    pub y: u16,
}

impl Coord {
    /// Create a new coordinate.
    #[must_use]
    pub const fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }
}

impl Ord for Coord {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.y, self.x).cmp(&(other.y, other.x))
    }
}

impl PartialOrd for Coord {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Terrain of a tile. Fixed once the grid is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum TerrainType {
    /// Open plain, best for energy.
    Plain = 0,
    /// River bank, best for food.
    River = 1,
    /// Mountain with one peak.
    Mountain1 = 2,
    /// Mountain with two peaks.
    Mountain2 = 3,
    /// Mountain with three peaks, richest in smithore.
    Mountain3 = 4,
}

impl TerrainType {
    /// Number of terrain kinds.
    pub const COUNT: usize = 5;

    /// All terrain kinds in table order.
    pub const ALL: [TerrainType; Self::COUNT] = [
        TerrainType::Plain,
        TerrainType::River,
        TerrainType::Mountain1,
        TerrainType::Mountain2,
        TerrainType::Mountain3,
    ];

    /// Position of this terrain in per-terrain tables.
    #[must_use]
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Check if this terrain is any mountain grade.
    #[must_use]
    pub const fn is_mountain(self) -> bool {
        matches!(
            self,
            TerrainType::Mountain1 | TerrainType::Mountain2 | TerrainType::Mountain3
        )
    }

    /// Board and scenario-file symbol.
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            TerrainType::Plain => 'P',
            TerrainType::River => 'R',
            TerrainType::Mountain1 => '1',
            TerrainType::Mountain2 => '2',
            TerrainType::Mountain3 => '3',
        }
    }

    /// Parse a terrain symbol (case-insensitive for letters).
    #[must_use]
    pub const fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            'P' | 'p' => Some(TerrainType::Plain),
            'R' | 'r' => Some(TerrainType::River),
            '1' => Some(TerrainType::Mountain1),
            '2' => Some(TerrainType::Mountain2),
            '3' => Some(TerrainType::Mountain3),
            _ => None,
        }
    }
}

/// A single grid cell.
///
/// Owner and installation are written only by [`WorldMap`](crate::game::WorldMap),
/// which guarantees that an unowned tile never carries a MULE.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Tile {
    terrain: TerrainType,
    owner: Option<PlayerId>,
    mule: Option<MuleType>,
}

impl Tile {
    /// Create an unowned, undeveloped tile.
    #[must_use]
    pub const fn new(terrain: TerrainType) -> Self {
        Self {
            terrain,
            owner: None,
            mule: None,
        }
    }

    /// Terrain of this tile.
    #[must_use]
    pub const fn terrain(&self) -> TerrainType {
        self.terrain
    }

    /// Owner of this tile, if any.
    #[must_use]
    pub const fn owner(&self) -> Option<PlayerId> {
        self.owner
    }

    /// Check if some player owns this tile.
    #[must_use]
    pub const fn has_owner(&self) -> bool {
        self.owner.is_some()
    }

    /// Installed MULE, if any.
    #[must_use]
    pub const fn mule(&self) -> Option<MuleType> {
        self.mule
    }

    /// Check if a MULE is installed.
    #[must_use]
    pub const fn has_mule(&self) -> bool {
        self.mule.is_some()
    }

    pub(crate) fn set_owner(&mut self, player: PlayerId) {
        self.owner = Some(player);
    }

    pub(crate) fn set_mule(&mut self, mule: MuleType) {
        self.mule = Some(mule);
    }
}

/// A point in the view layer's coordinate space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    /// Horizontal position.
    pub x: f64,
    /// Vertical position.
    pub y: f64,
}

impl Point {
    /// Create a new point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// On-screen placement of the grid, supplied by the view layer.
///
/// Cell `(col, row)` covers the half-open rectangle starting at
/// `origin + (col * cell_width, row * cell_height)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellGeometry {
    /// Top-left corner of cell (0, 0).
    pub origin: Point,
    /// Width of one cell.
    pub cell_width: f64,
    /// Height of one cell.
    pub cell_height: f64,
}

impl CellGeometry {
    /// Create a geometry with square-or-not cells anchored at `origin`.
    #[must_use]
    pub const fn new(origin: Point, cell_width: f64, cell_height: f64) -> Self {
        Self {
            origin,
            cell_width,
            cell_height,
        }
    }
}

/// Rectangular tile storage with a movable cursor.
#[derive(Debug, Clone)]
pub struct Grid {
    /// Number of columns.
    cols: u16,
    /// Number of rows.
    rows: u16,
    /// Tiles stored in row-major order.
    tiles: Vec<Tile>,
    /// Selected tile; always in bounds.
    cursor: Coord,
}

impl Grid {
    /// Create a grid of plains.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::EmptyGrid`] if either dimension is zero.
    pub fn new(cols: u16, rows: u16) -> Result<Self, MapError> {
        Self::from_fn(cols, rows, |_| TerrainType::Plain)
    }

    /// Create a grid whose terrain is chosen per coordinate, row by row.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::EmptyGrid`] if either dimension is zero.
    pub fn from_fn(
        cols: u16,
        rows: u16,
        mut terrain: impl FnMut(Coord) -> TerrainType,
    ) -> Result<Self, MapError> {
        if cols == 0 || rows == 0 {
            return Err(MapError::EmptyGrid { cols, rows });
        }

        let tiles = (0..rows)
            .flat_map(|y| (0..cols).map(move |x| Coord::new(x, y)))
            .map(|coord| Tile::new(terrain(coord)))
            .collect();

        Ok(Self {
            cols,
            rows,
            tiles,
            cursor: Coord::new(0, 0),
        })
    }

    /// Create a grid from terrain listed in row-major order.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::EmptyGrid`] for a zero dimension and
    /// [`MapError::TerrainCount`] if `terrain.len() != cols * rows`.
    pub fn from_terrain(cols: u16, rows: u16, terrain: &[TerrainType]) -> Result<Self, MapError> {
        let expected = usize::from(cols) * usize::from(rows);
        if cols != 0 && rows != 0 && terrain.len() != expected {
            return Err(MapError::TerrainCount {
                expected,
                actual: terrain.len(),
            });
        }
        let mut kinds = terrain.iter().copied();
        Self::from_fn(cols, rows, |_| kinds.next().unwrap_or(TerrainType::Plain))
    }

    /// Number of columns.
    #[must_use]
    pub const fn cols(&self) -> u16 {
        self.cols
    }

    /// Number of rows.
    #[must_use]
    pub const fn rows(&self) -> u16 {
        self.rows
    }

    /// Current cursor position.
    #[must_use]
    pub const fn cursor(&self) -> Coord {
        self.cursor
    }

    /// Total number of tiles.
    #[must_use]
    pub fn tile_count(&self) -> usize {
        self.tiles.len()
    }

    /// Raw tiles in row-major order.
    #[must_use]
    #[inline]
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Check if a coordinate is within the grid.
    #[must_use]
    pub const fn in_bounds(&self, coord: Coord) -> bool {
        coord.x < self.cols && coord.y < self.rows
    }

    fn coord_to_index(&self, coord: Coord) -> Option<usize> {
        if self.in_bounds(coord) {
            Some(usize::from(coord.y) * usize::from(self.cols) + usize::from(coord.x))
        } else {
            None
        }
    }

    fn out_of_range(&self, coord: Coord) -> MapError {
        MapError::OutOfRange {
            x: i64::from(coord.x),
            y: i64::from(coord.y),
            cols: self.cols,
            rows: self.rows,
        }
    }

    /// Get the tile at a coordinate.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::OutOfRange`] if the coordinate is off the grid.
    pub fn get(&self, coord: Coord) -> Result<&Tile, MapError> {
        self.coord_to_index(coord)
            .map(|idx| &self.tiles[idx])
            .ok_or_else(|| self.out_of_range(coord))
    }

    pub(crate) fn get_mut(&mut self, coord: Coord) -> Result<&mut Tile, MapError> {
        match self.coord_to_index(coord) {
            Some(idx) => Ok(&mut self.tiles[idx]),
            None => Err(self.out_of_range(coord)),
        }
    }

    /// Move the cursor.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::OutOfRange`] if the coordinate is off the grid; the
    /// cursor is left where it was.
    pub fn select(&mut self, coord: Coord) -> Result<(), MapError> {
        if !self.in_bounds(coord) {
            return Err(self.out_of_range(coord));
        }
        self.cursor = coord;
        Ok(())
    }

    /// Tile under the cursor.
    #[must_use]
    pub fn cursor_tile(&self) -> &Tile {
        let idx = usize::from(self.cursor.y) * usize::from(self.cols) + usize::from(self.cursor.x);
        &self.tiles[idx]
    }

    pub(crate) fn cursor_tile_mut(&mut self) -> &mut Tile {
        let idx = usize::from(self.cursor.y) * usize::from(self.cols) + usize::from(self.cursor.x);
        &mut self.tiles[idx]
    }

    /// Iterate over all coordinates and tiles in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Coord, &Tile)> + '_ {
        let cols = self.cols;
        (0..self.rows)
            .flat_map(move |y| (0..cols).map(move |x| Coord::new(x, y)))
            .zip(self.tiles.iter())
    }

    /// Check whether `point` lies in the on-screen cell of `coord`.
    ///
    /// Coordinates off the grid never contain any point.
    #[must_use]
    pub fn is_inside(&self, geometry: &CellGeometry, point: Point, coord: Coord) -> bool {
        if !self.in_bounds(coord) {
            return false;
        }
        let left = geometry.origin.x + f64::from(coord.x) * geometry.cell_width;
        let top = geometry.origin.y + f64::from(coord.y) * geometry.cell_height;

        point.x >= left
            && point.x < left + geometry.cell_width
            && point.y >= top
            && point.y < top + geometry.cell_height
    }

    /// Find the cell containing `point`, if it is over the grid.
    #[must_use]
    pub fn cell_at(&self, geometry: &CellGeometry, point: Point) -> Option<Coord> {
        if geometry.cell_width <= 0.0 || geometry.cell_height <= 0.0 {
            return None;
        }
        let col = ((point.x - geometry.origin.x) / geometry.cell_width).floor();
        let row = ((point.y - geometry.origin.y) / geometry.cell_height).floor();
        if col < 0.0 || row < 0.0 || col >= f64::from(self.cols) || row >= f64::from(self.rows) {
            return None;
        }

        // Both values are integral and below u16::MAX after the range check.
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let coord = Coord::new(col as u16, row as u16);
        Some(coord)
    }
}
