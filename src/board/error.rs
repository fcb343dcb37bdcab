use thiserror::Error;

use super::factory::FactoryId;

/// Precondition violations on the match graph and world state.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BoardError {
    #[error("unknown factory {id} (match has {count} factories)")]
    UnknownFactory { id: FactoryId, count: usize },

    #[error("shortest paths requested before they were cached")]
    PathsNotCached,

    #[error("no path from factory {from} to factory {to}")]
    Unreachable { from: FactoryId, to: FactoryId },
}
