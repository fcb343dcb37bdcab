//! Combat resolution.
//!
//! Projects how the troops currently in flight will change the owner and
//! garrison of each factory they are heading to.

pub mod projection;

pub use projection::{project, project_factory};
