//! Game layer for the land-grant economy.
//!
//! - Grid of tiles with terrain, owner and an optional MULE
//! - World map with cursor navigation and land purchases
//! - Players with resource stockpiles
//! - Per-round production, usage and spoilage

mod invariants;
mod map;
mod mapgen;
mod player;
mod production;
mod resources;
mod world;

pub use invariants::{check_invariants, InvariantViolation};
pub use map::{CellGeometry, Coord, Grid, Point, TerrainType, Tile};
pub use mapgen::generate_map;
pub use player::{Player, PlayerId, Stockpile};
pub use production::{
    base_production_of, bound, calculate_production, production_of, spoilage_of, usage_of,
    PlayerProduction, ProductionReport, ProductionResult, BASE_PRODUCTION, STORAGE_CAP,
};
pub use resources::{MuleType, ResourceType};
pub use world::WorldMap;
