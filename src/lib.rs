//! Ghostcell engine library.
//!
//! Exposes the board representation, combat projection, deferred-order
//! scheduling, decision policy, and protocol modules for use by integration
//! tests, benchmarks, and the binary entry point.

pub mod board;
pub mod config;
pub mod engine;
pub mod policy;
pub mod protocol;
pub mod resolve;
pub mod schedule;
