//! Deferred multi-hop order scheduling.
//!
//! Holds moves that span several edges and emits them one leg per turn as
//! each leg comes due.

pub mod command;
pub mod scheduler;

pub use command::{CommandId, CommandIds, DeferredCommand, Status};
pub use scheduler::CommandScheduler;
