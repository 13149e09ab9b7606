//! Resource and installation taxonomy.
//!
//! Both enumerations are closed and double as table indices: every
//! per-resource quantity in the crate is a `[T; ResourceType::COUNT]` indexed
//! by [`ResourceType::index`].

use std::fmt;

use serde::{Deserialize, Serialize};

/// A tradeable resource held in player stockpiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum ResourceType {
    /// Food, consumed every round as upkeep.
    Food = 0,
    /// Energy, consumed by every non-energy MULE.
    Energy = 1,
    /// Smithore, mined on mountains.
    Smithore = 2,
    /// Crystite, the rare resource.
    Crystite = 3,
}

impl ResourceType {
    /// Number of resource kinds.
    pub const COUNT: usize = 4;

    /// All resource kinds in table order.
    pub const ALL: [ResourceType; Self::COUNT] = [
        ResourceType::Food,
        ResourceType::Energy,
        ResourceType::Smithore,
        ResourceType::Crystite,
    ];

    /// Position of this resource in per-resource tables.
    #[must_use]
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// The installation kind that produces this resource.
    #[must_use]
    pub const fn produced_by(self) -> MuleType {
        match self {
            ResourceType::Food => MuleType::Food,
            ResourceType::Energy => MuleType::Energy,
            ResourceType::Smithore => MuleType::Smithore,
            ResourceType::Crystite => MuleType::Crystite,
        }
    }

    /// Lowercase display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            ResourceType::Food => "food",
            ResourceType::Energy => "energy",
            ResourceType::Smithore => "smithore",
            ResourceType::Crystite => "crystite",
        }
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A MULE outfitted to produce one resource. At most one per tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum MuleType {
    /// Farms food.
    Food = 0,
    /// Generates energy.
    Energy = 1,
    /// Mines smithore.
    Smithore = 2,
    /// Mines crystite.
    Crystite = 3,
}

impl MuleType {
    /// All installation kinds.
    pub const ALL: [MuleType; 4] = [
        MuleType::Food,
        MuleType::Energy,
        MuleType::Smithore,
        MuleType::Crystite,
    ];

    /// The resource this installation produces.
    #[must_use]
    pub const fn resource(self) -> ResourceType {
        match self {
            MuleType::Food => ResourceType::Food,
            MuleType::Energy => ResourceType::Energy,
            MuleType::Smithore => ResourceType::Smithore,
            MuleType::Crystite => ResourceType::Crystite,
        }
    }

    /// Whether this installation draws one unit of energy per round.
    #[must_use]
    pub const fn consumes_energy(self) -> bool {
        !matches!(self, MuleType::Energy)
    }

    /// Single-letter board symbol.
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            MuleType::Food => 'f',
            MuleType::Energy => 'e',
            MuleType::Smithore => 's',
            MuleType::Crystite => 'c',
        }
    }
}
