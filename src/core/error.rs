//! Error types.
//!
//! "No move available" is not an error; move selection returns `Option`.

use thiserror::Error;

use super::Cell;

/// Invalid board configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("board must have at least one row and one column (got {height}x{width})")]
    EmptyBoard { height: usize, width: usize },

    #[error("cannot place {mines} mines on a board of {cells} cells")]
    TooManyMines { mines: usize, cells: usize },
}

/// Knowledge the knowledge base cannot accept.
///
/// These are caller bugs: the engine assumes every reported count is true.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KnowledgeError {
    #[error("cell {cell} is outside the {height}x{width} board")]
    OutOfBounds { cell: Cell, height: usize, width: usize },

    #[error("cell {cell} reported {count} neighboring mines, but {min}..={max} are possible")]
    InconsistentCount {
        cell: Cell,
        count: usize,
        min: usize,
        max: usize,
    },

    #[error("cell {0} was revealed but is already known to be a mine")]
    AlreadyMine(Cell),

    #[error("marking cell {0} contradicts what is already known")]
    Conflict(Cell),
}

/// Failure to encode or decode a session checkpoint.
#[derive(Debug, Error)]
pub enum CheckpointError {
    #[error("checkpoint encoding failed: {0}")]
    Codec(#[from] bincode::Error),
}
