//! Troops in flight between factories.

use super::factory::{FactoryId, Owner};

/// Protocol-assigned troop identifier.
pub type TroopId = i32;

/// A group of cyborgs travelling along one edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Troop {
    pub id: TroopId,
    pub owner: Owner,
    pub cyborgs: i32,
    pub from: FactoryId,
    pub to: FactoryId,
    /// Turns until arrival at `to`.
    pub turns_left: i32,
}

impl Troop {
    pub fn route(&self) -> Route {
        Route {
            owner: self.owner,
            from: self.from,
            to: self.to,
        }
    }
}

/// The parts of a troop that must stay fixed while it is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Route {
    pub owner: Owner,
    pub from: FactoryId,
    pub to: FactoryId,
}
