//! Engine error types.

use thiserror::Error;

/// Errors reported by the engine. None of them leave a game in a broken state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A grid dimension was zero.
    #[error("invalid grid size {x}x{y}: both dimensions must be positive")]
    InvalidGridSize { x: u32, y: u32 },

    /// A generation index past the end of the history.
    #[error("generation {index} out of range (history holds {len})")]
    IndexOutOfRange { index: usize, len: usize },

    /// An explicit prune count larger than the survivor count.
    #[error("cannot prune {requested} points out of {available} survivors")]
    PruneCountOutOfRange { requested: usize, available: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
