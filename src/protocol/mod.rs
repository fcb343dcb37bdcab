//! Referee protocol handling.
//!
//! Parses the init and per-turn blocks into typed values and formats the
//! bot's orders back into the single reply line.

pub mod format;
pub mod parser;

pub use format::{format_order, format_orders};
pub use parser::{
    parse_count, parse_entity, parse_link, read_init, read_turn, Entity, Link, MatchInit,
    ProtocolError,
};
