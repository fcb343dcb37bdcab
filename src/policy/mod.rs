//! Turn decisions.
//!
//! Route costing shared with the scheduler, and the policy that picks which
//! factories to attack each turn.

pub mod cost;
pub mod greedy;

pub use cost::{cyborgs_needed, cyborgs_on_path, Sizing};
pub use greedy::{GreedyPolicy, Policy};
