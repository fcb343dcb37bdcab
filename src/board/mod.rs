//! Board representation and match-state types.
//!
//! Contains factories, troops, orders, the shortest-path index over the
//! factory graph, and the world model that ties them together.

pub mod error;
pub mod factory;
pub mod graph;
pub mod order;
pub mod troop;
pub mod world;

pub use error::BoardError;
pub use factory::{Factory, FactoryId, Owner};
pub use graph::{DistanceIndex, UNREACHABLE};
pub use order::Order;
pub use troop::{Route, Troop, TroopId};
pub use world::WorldModel;
