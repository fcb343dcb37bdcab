//! Factory nodes and ownership.
//!
//! A factory is a node of the match graph: it has an owner, a garrison of
//! cyborgs, and a production rate added to the garrison each turn it is held.

/// Dense factory identifier, `0..factory_count`.
pub type FactoryId = usize;

/// Who holds a factory or sent a troop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Owner {
    Me,
    #[default]
    Neutral,
    Opponent,
}

impl Owner {
    /// Parses the protocol's owner field: 1 is us, -1 the opponent, 0 neutral.
    pub fn from_protocol(value: i32) -> Option<Owner> {
        match value {
            1 => Some(Owner::Me),
            0 => Some(Owner::Neutral),
            -1 => Some(Owner::Opponent),
            _ => None,
        }
    }

    /// Combat sign of the owner: +1 for us, -1 for the opponent, 0 for neutral.
    pub const fn sign(self) -> i32 {
        match self {
            Owner::Me => 1,
            Owner::Neutral => 0,
            Owner::Opponent => -1,
        }
    }

    /// Maps the sign of a force balance back to the side that holds it.
    pub fn from_sign(value: i32) -> Owner {
        match value.signum() {
            1 => Owner::Me,
            -1 => Owner::Opponent,
            _ => Owner::Neutral,
        }
    }

    /// The other player. Neutral has no opposite and maps to itself.
    pub const fn opposite(self) -> Owner {
        match self {
            Owner::Me => Owner::Opponent,
            Owner::Neutral => Owner::Neutral,
            Owner::Opponent => Owner::Me,
        }
    }
}

/// A single factory as reported (or as projected).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Factory {
    pub id: FactoryId,
    pub owner: Owner,
    /// Garrison size. Only negative transiently while combat is resolved.
    pub cyborgs: i32,
    /// Cyborgs produced per turn while owned.
    pub production: i32,
}

impl Factory {
    /// Creates an empty neutral factory.
    pub fn new(id: FactoryId) -> Self {
        Factory {
            id,
            owner: Owner::Neutral,
            cyborgs: 0,
            production: 0,
        }
    }

    pub fn is_mine(&self) -> bool {
        self.owner == Owner::Me
    }
}
