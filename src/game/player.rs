//! Player state management.

use serde::{Deserialize, Serialize};

use crate::game::{PlayerProduction, ProductionResult, ResourceType};

/// Unique identifier for a player.
pub type PlayerId = u8;

/// Quantity held of each resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Stockpile {
    /// Units of food.
    pub food: u32,
    /// Units of energy.
    pub energy: u32,
    /// Units of smithore.
    pub smithore: u32,
    /// Units of crystite.
    pub crystite: u32,
}

impl Stockpile {
    /// The beginner allotment every colonist lands with.
    #[must_use]
    pub const fn starting() -> Self {
        Self {
            food: 8,
            energy: 4,
            smithore: 0,
            crystite: 0,
        }
    }

    /// Quantity held of `resource`.
    #[must_use]
    pub const fn get(&self, resource: ResourceType) -> u32 {
        match resource {
            ResourceType::Food => self.food,
            ResourceType::Energy => self.energy,
            ResourceType::Smithore => self.smithore,
            ResourceType::Crystite => self.crystite,
        }
    }

    /// Overwrite the quantity held of `resource`.
    pub fn set(&mut self, resource: ResourceType, quantity: u32) {
        let slot = match resource {
            ResourceType::Food => &mut self.food,
            ResourceType::Energy => &mut self.energy,
            ResourceType::Smithore => &mut self.smithore,
            ResourceType::Crystite => &mut self.crystite,
        };
        *slot = quantity;
    }

    /// Apply one round's accounting for `resource`.
    ///
    /// Debits usage and spoilage, credits production. Stock never goes below
    /// zero; a shortfall is simply lost. Requirement is informational and
    /// ignored here.
    pub fn apply(&mut self, resource: ResourceType, result: &ProductionResult) {
        let stock = i64::from(self.get(resource))
            - i64::from(result.usage)
            - i64::from(result.spoilage)
            + i64::from(result.production);
        self.set(resource, u32::try_from(stock.max(0)).unwrap_or(u32::MAX));
    }
}

/// State for a single player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    /// Unique identifier for this player.
    pub id: PlayerId,
    /// Display name.
    pub name: String,
    /// Resources on hand.
    pub stock: Stockpile,
}

impl Player {
    /// Create a new player holding the starting allotment.
    #[must_use]
    pub fn new(id: PlayerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            stock: Stockpile::starting(),
        }
    }

    /// Quantity of `resource` on hand.
    #[must_use]
    pub const fn stock_of(&self, resource: ResourceType) -> u32 {
        self.stock.get(resource)
    }

    /// Apply a full round of production results to the stockpile.
    pub fn apply_production(&mut self, production: &PlayerProduction) {
        for (resource, result) in production.iter() {
            self.stock.apply(resource, result);
        }
    }
}
