//! The land-grant map: grid, cursor navigation, and ownership bookkeeping.
//!
//! Ownership is stored twice: on each [`Tile`] and in a per-player set of
//! coordinates. The set keeps "how much land does P hold" and "where are P's
//! MULEs" proportional to P's holdings instead of the grid size. Every write
//! goes through `WorldMap::assign_owner`, so for all players `p` and
//! coordinates `c`, `c ∈ owned[p]` iff `tile(c).owner == Some(p)`.

use std::collections::{BTreeMap, BTreeSet};

use tracing::debug;

use crate::error::MapError;
use crate::game::{CellGeometry, Coord, Grid, MuleType, PlayerId, Point, Tile};

/// Grid plus per-player holdings.
#[derive(Debug, Clone)]
pub struct WorldMap {
    grid: Grid,
    owned: BTreeMap<PlayerId, BTreeSet<Coord>>,
}

impl WorldMap {
    /// Wrap a grid, registering every listed player.
    ///
    /// Owners already recorded on the tiles (a grid cloned from another map)
    /// are carried into the holdings, so the new map starts consistent.
    #[must_use]
    pub fn new(grid: Grid, players: impl IntoIterator<Item = PlayerId>) -> Self {
        let owned = players
            .into_iter()
            .map(|player| (player, BTreeSet::new()))
            .collect();
        let held: Vec<(Coord, PlayerId)> = grid
            .iter()
            .filter_map(|(coord, tile)| tile.owner().map(|owner| (coord, owner)))
            .collect();

        let mut map = Self { grid, owned };
        for (coord, owner) in held {
            map.assign_owner(coord, owner);
        }
        map
    }

    /// The underlying grid (read-only).
    #[must_use]
    pub const fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Number of columns.
    #[must_use]
    pub const fn columns(&self) -> u16 {
        self.grid.cols()
    }

    /// Number of rows.
    #[must_use]
    pub const fn rows(&self) -> u16 {
        self.grid.rows()
    }

    /// Iterate over all tiles in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Coord, &Tile)> + '_ {
        self.grid.iter()
    }

    /// Players known to this map, in id order.
    pub fn players(&self) -> impl Iterator<Item = PlayerId> + '_ {
        self.owned.keys().copied()
    }

    /// Number of tiles owned by `player`.
    #[must_use]
    pub fn land_owned_by(&self, player: PlayerId) -> usize {
        self.owned.get(&player).map_or(0, BTreeSet::len)
    }

    /// Coordinates owned by `player`, in row-major order.
    pub fn owned_by(&self, player: PlayerId) -> impl Iterator<Item = Coord> + '_ {
        self.owned.get(&player).into_iter().flatten().copied()
    }

    /// Buy the tile under the cursor for `player`.
    ///
    /// Returns `true` if the tile is now owned by `player` (newly bought or
    /// already theirs). A tile owned by someone else is left untouched and
    /// `false` is returned.
    pub fn buy_tile(&mut self, player: PlayerId) -> bool {
        let coord = self.grid.cursor();
        match self.grid.cursor_tile().owner() {
            None => {
                self.assign_owner(coord, player);
                debug!(player, x = coord.x, y = coord.y, "tile purchased");
                true
            }
            Some(owner) if owner == player => true,
            Some(owner) => {
                debug!(player, owner, x = coord.x, y = coord.y, "tile already owned");
                false
            }
        }
    }

    /// Record `player` as owner of `coord` on the tile and in the holdings set.
    ///
    /// Off-map coordinates are ignored; callers pass the cursor or a
    /// coordinate taken from the grid itself.
    fn assign_owner(&mut self, coord: Coord, player: PlayerId) {
        if let Ok(tile) = self.grid.get_mut(coord) {
            tile.set_owner(player);
            self.owned.entry(player).or_default().insert(coord);
        }
    }

    /// Owner of the tile under the cursor.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::Unowned`] if nobody owns it; check
    /// [`Tile::has_owner`] first when that is a normal outcome.
    pub fn get_owner(&self) -> Result<PlayerId, MapError> {
        self.grid
            .cursor_tile()
            .owner()
            .ok_or_else(|| MapError::Unowned(self.grid.cursor()))
    }

    /// Install a MULE on the tile under the cursor.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::NotOwner`] unless `player` owns the tile, and
    /// [`MapError::AlreadyDeveloped`] if a MULE is already installed.
    pub fn install_mule(&mut self, player: PlayerId, mule: MuleType) -> Result<(), MapError> {
        let coord = self.grid.cursor();
        let tile = self.grid.cursor_tile_mut();
        if tile.owner() != Some(player) {
            return Err(MapError::NotOwner { player, coord });
        }
        if tile.has_mule() {
            return Err(MapError::AlreadyDeveloped(coord));
        }
        tile.set_mule(mule);
        debug!(player, ?mule, x = coord.x, y = coord.y, "mule installed");
        Ok(())
    }

    /// Tiles owned by `player` with `mule` installed.
    pub fn tiles_with_mule(
        &self,
        player: PlayerId,
        mule: MuleType,
    ) -> impl Iterator<Item = (Coord, &Tile)> + '_ {
        self.owned_by(player).filter_map(move |coord| {
            self.grid
                .get(coord)
                .ok()
                .filter(|tile| tile.mule() == Some(mule))
                .map(|tile| (coord, tile))
        })
    }

    /// Number of tiles owned by `player` with `mule` installed.
    #[must_use]
    pub fn count_tiles_with_mule(&self, player: PlayerId, mule: MuleType) -> usize {
        self.tiles_with_mule(player, mule).count()
    }

    /// Current cursor position.
    #[must_use]
    pub const fn cursor(&self) -> Coord {
        self.grid.cursor()
    }

    /// Tile under the cursor.
    #[must_use]
    pub fn cursor_tile(&self) -> &Tile {
        self.grid.cursor_tile()
    }

    /// Move the cursor to `(x, y)`.
    ///
    /// Off-map requests are routine input noise: they leave the cursor in place,
    /// log at debug level and return `false`.
    pub fn select(&mut self, x: i32, y: i32) -> bool {
        let target = u16::try_from(x)
            .ok()
            .zip(u16::try_from(y).ok())
            .map(|(x, y)| Coord::new(x, y));

        match target.map(|coord| self.grid.select(coord)) {
            Some(Ok(())) => true,
            _ => {
                debug!(x, y, "cannot select off map");
                false
            }
        }
    }

    /// Move the cursor by `(dx, dy)`.
    pub fn select_rel(&mut self, dx: i32, dy: i32) -> bool {
        let cursor = self.grid.cursor();
        match (
            i32::from(cursor.x).checked_add(dx),
            i32::from(cursor.y).checked_add(dy),
        ) {
            (Some(x), Some(y)) => self.select(x, y),
            _ => {
                debug!(dx, dy, "cannot select off map");
                false
            }
        }
    }

    /// Move the cursor one row up.
    pub fn select_up(&mut self) -> bool {
        self.select_rel(0, -1)
    }

    /// Move the cursor one row down.
    pub fn select_down(&mut self) -> bool {
        self.select_rel(0, 1)
    }

    /// Move the cursor one column left.
    pub fn select_left(&mut self) -> bool {
        self.select_rel(-1, 0)
    }

    /// Move the cursor one column right.
    pub fn select_right(&mut self) -> bool {
        self.select_rel(1, 0)
    }

    /// Move left, wrapping from column 0 to the last column of the row above.
    ///
    /// From the top-left tile the cursor wraps to the bottom-right tile, so the
    /// traversal is a single cycle through all tiles in reverse row-major order.
    pub fn select_left_wrap(&mut self) -> bool {
        let Coord { x, y } = self.grid.cursor();
        if x > 0 {
            return self.select_rel(-1, 0);
        }
        let row = if y == 0 { self.rows() - 1 } else { y - 1 };
        self.select(i32::from(self.columns()) - 1, i32::from(row))
    }

    /// Move right, wrapping from the last column to column 0 of the next row.
    ///
    /// From the bottom-right tile the cursor wraps to the top-left tile.
    pub fn select_right_wrap(&mut self) -> bool {
        let Coord { x, y } = self.grid.cursor();
        if x + 1 < self.columns() {
            return self.select_rel(1, 0);
        }
        let row = if y + 1 >= self.rows() { 0 } else { y + 1 };
        self.select(0, i32::from(row))
    }

    /// Check whether `point` lies in the on-screen cell at `(column, row)`.
    #[must_use]
    pub fn is_inside(&self, geometry: &CellGeometry, point: Point, column: u16, row: u16) -> bool {
        self.grid.is_inside(geometry, point, Coord::new(column, row))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::TerrainType;

    fn test_map() -> WorldMap {
        WorldMap::new(Grid::new(4, 3).unwrap(), [1, 2])
    }

    #[test]
    fn test_select_in_and_out_of_bounds() {
        let mut map = test_map();
        assert!(map.select(3, 2));
        assert_eq!(map.cursor(), Coord::new(3, 2));

        assert!(!map.select(4, 2));
        assert!(!map.select(-1, 0));
        assert!(!map.select(0, 3));
        assert_eq!(map.cursor(), Coord::new(3, 2));
    }

    #[test]
    fn test_select_rel_extreme_offsets() {
        let mut map = test_map();
        map.select(2, 1);
        assert!(!map.select_rel(i32::MAX, 0));
        assert!(!map.select_rel(0, i32::MIN));
        assert!(!map.select_rel(i32::MIN, i32::MAX));
        assert_eq!(map.cursor(), Coord::new(2, 1));
        assert!(map.select_rel(-2, 1));
        assert_eq!(map.cursor(), Coord::new(0, 2));
    }

    #[test]
    fn test_directional_moves() {
        let mut map = test_map();
        assert!(!map.select_up());
        assert!(!map.select_left());
        assert!(map.select_down());
        assert!(map.select_right());
        assert_eq!(map.cursor(), Coord::new(1, 1));
        assert!(map.select_up());
        assert!(map.select_left());
        assert_eq!(map.cursor(), Coord::new(0, 0));
    }

    #[test]
    fn test_right_wrap_advances_row() {
        let mut map = test_map();
        map.select(3, 0);
        assert!(map.select_right_wrap());
        assert_eq!(map.cursor(), Coord::new(0, 1));

        map.select(3, 2);
        assert!(map.select_right_wrap());
        assert_eq!(map.cursor(), Coord::new(0, 0));

        map.select(1, 1);
        assert!(map.select_right_wrap());
        assert_eq!(map.cursor(), Coord::new(2, 1));
    }

    #[test]
    fn test_left_wrap_retreats_row() {
        let mut map = test_map();
        map.select(0, 1);
        assert!(map.select_left_wrap());
        assert_eq!(map.cursor(), Coord::new(3, 0));

        map.select(0, 0);
        assert!(map.select_left_wrap());
        assert_eq!(map.cursor(), Coord::new(3, 2));

        map.select(2, 2);
        assert!(map.select_left_wrap());
        assert_eq!(map.cursor(), Coord::new(1, 2));
    }

    #[test]
    fn test_wraps_are_inverse() {
        let mut map = test_map();
        for _ in 0..12 {
            let before = map.cursor();
            map.select_right_wrap();
            map.select_left_wrap();
            assert_eq!(map.cursor(), before);
            map.select_right_wrap();
        }
    }

    #[test]
    fn test_buy_unowned_tile() {
        let mut map = test_map();
        map.select(2, 1);
        assert!(map.buy_tile(1));
        assert_eq!(map.cursor_tile().owner(), Some(1));
        assert_eq!(map.land_owned_by(1), 1);
        assert_eq!(map.get_owner(), Ok(1));
    }

    #[test]
    fn test_buy_owned_tile_is_refused() {
        // A second buyer neither takes the tile nor gains it in their holdings
        let mut map = test_map();
        map.buy_tile(1);
        assert!(!map.buy_tile(2));
        assert_eq!(map.cursor_tile().owner(), Some(1));
        assert_eq!(map.land_owned_by(1), 1);
        assert_eq!(map.land_owned_by(2), 0);

        // Rebuying your own tile is a no-op
        assert!(map.buy_tile(1));
        assert_eq!(map.land_owned_by(1), 1);
    }

    #[test]
    fn test_buy_for_unlisted_player() {
        let mut map = test_map();
        assert!(map.buy_tile(7));
        assert_eq!(map.land_owned_by(7), 1);
        assert_eq!(map.players().collect::<Vec<_>>(), vec![1, 2, 7]);
    }

    #[test]
    fn test_new_adopts_owners_from_cloned_grid() {
        let mut map = test_map();
        map.buy_tile(1);
        map.select(3, 2);
        map.buy_tile(2);

        let rebuilt = WorldMap::new(map.grid().clone(), [1]);
        assert_eq!(rebuilt.land_owned_by(1), 1);
        assert_eq!(rebuilt.land_owned_by(2), 1);
        assert_eq!(rebuilt.players().collect::<Vec<_>>(), vec![1, 2]);
        assert!(crate::game::check_invariants(&rebuilt).is_empty());
    }

    #[test]
    fn test_get_owner_unowned() {
        let map = test_map();
        assert_eq!(map.get_owner(), Err(MapError::Unowned(Coord::new(0, 0))));
    }

    #[test]
    fn test_install_mule_requires_ownership() {
        let mut map = test_map();
        assert_eq!(
            map.install_mule(1, MuleType::Food),
            Err(MapError::NotOwner {
                player: 1,
                coord: Coord::new(0, 0)
            })
        );

        map.buy_tile(1);
        assert_eq!(
            map.install_mule(2, MuleType::Food),
            Err(MapError::NotOwner {
                player: 2,
                coord: Coord::new(0, 0)
            })
        );
        assert!(map.install_mule(1, MuleType::Food).is_ok());
        assert_eq!(
            map.install_mule(1, MuleType::Energy),
            Err(MapError::AlreadyDeveloped(Coord::new(0, 0)))
        );
        assert_eq!(map.cursor_tile().mule(), Some(MuleType::Food));
    }

    #[test]
    fn test_tiles_with_mule() {
        let mut map = WorldMap::new(
            Grid::from_fn(3, 1, |c| {
                if c.x == 1 {
                    TerrainType::River
                } else {
                    TerrainType::Plain
                }
            })
            .unwrap(),
            [1],
        );
        for (x, mule) in [(0, MuleType::Food), (1, MuleType::Food), (2, MuleType::Energy)] {
            map.select(x, 0);
            map.buy_tile(1);
            map.install_mule(1, mule).unwrap();
        }

        let food: Vec<_> = map
            .tiles_with_mule(1, MuleType::Food)
            .map(|(c, _)| c)
            .collect();
        assert_eq!(food, vec![Coord::new(0, 0), Coord::new(1, 0)]);
        assert_eq!(map.count_tiles_with_mule(1, MuleType::Energy), 1);
        assert_eq!(map.count_tiles_with_mule(1, MuleType::Crystite), 0);
        assert_eq!(map.count_tiles_with_mule(2, MuleType::Food), 0);
    }

    #[test]
    fn test_is_inside_delegates() {
        let map = test_map();
        let geo = CellGeometry::new(Point::default(), 10.0, 10.0);
        assert!(map.is_inside(&geo, Point::new(35.0, 25.0), 3, 2));
        assert!(!map.is_inside(&geo, Point::new(35.0, 25.0), 2, 2));
    }
}
