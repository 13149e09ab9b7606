// Allow unwrap in tests (test code is not production)
#![cfg_attr(test, allow(clippy::unwrap_used))]
//! Mule: the simulation core of a M.U.L.E.-style land-grant economy.
//!
//! This crate provides:
//! - A grid of land tiles with terrain, owner and an optional MULE
//! - Cursor-based selection and land purchases on a world map
//! - A per-round production engine computing usage, requirement, spoilage
//!   and output for every player and resource
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │   Turn controller (caller / CLI)    │
//! ├─────────────────────────────────────┤
//! │  Production engine  │  Scenarios    │
//! ├─────────────────────────────────────┤
//! │   WorldMap (grid + holdings)        │
//! └─────────────────────────────────────┘
//! ```
//!
//! Everything is single-threaded and synchronous. A `WorldMap` has no
//! internal locking; drivers with several actors must serialize mutation.

pub mod error;
pub mod game;
pub mod scenario;

pub use error::{MapError, ProductionError};

// Re-export key game types at crate root for convenience
pub use game::{
    calculate_production, Coord, Grid, MuleType, Player, PlayerId, ProductionReport,
    ProductionResult, ResourceType, TerrainType, Tile, WorldMap,
};
pub use scenario::{Scenario, ScenarioError, SimulationConfig};
