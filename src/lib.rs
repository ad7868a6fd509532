//! # minesweeper-kb
//!
//! A knowledge-based deduction engine for a minesweeper agent.
//!
//! The agent never guesses when it can prove something. Every revealed cell
//! becomes a sentence ("exactly N of these neighbors are mines"), and the
//! knowledge base saturates its sentences until no further cell can be
//! proven safe or mined.
//!
//! ## Design Principles
//!
//! 1. **Sound only**: a cell is marked only when every board consistent
//!    with the observations agrees. No probabilities, no backtracking.
//!
//! 2. **Batch, then apply**: each inference pass reads the sentences and
//!    collects conclusions; they are applied together before the next pass.
//!
//! 3. **Explicit randomness**: the fallback move picker and the board
//!    simulator take a seedable `GameRng`, so games replay exactly.
//!
//! ## Modules
//!
//! - `core`: Cells, grid geometry, configuration, RNG, errors
//! - `logic`: Sentences, inference passes, the knowledge base, move selection
//! - `board`: The hidden-mine board and the oracle trait drivers use
//! - `game`: A session that plays a board to completion
//!
//! ## Example
//!
//! ```
//! use minesweeper_kb::{Cell, Grid, KnowledgeBase};
//!
//! let mut kb = KnowledgeBase::new(Grid::new(3, 3));
//! kb.observe(Cell::new(0, 0), 0).unwrap();
//!
//! // A zero reveals that every neighbor is safe
//! assert!(kb.is_known_safe(Cell::new(1, 1)));
//! assert!(kb.make_safe_move().is_some());
//! ```

pub mod core;
pub mod logic;
pub mod board;
pub mod game;

#[cfg(feature = "python")]
pub mod python;

// Re-export commonly used types
pub use crate::core::{
    Cell, Grid, Neighbors,
    BoardConfig,
    GameRng, GameRngState,
    ConfigError, KnowledgeError, CheckpointError,
};

pub use crate::logic::{Sentence, Deduction, KnowledgeBase, InferenceBatch};

pub use crate::board::{Board, MineOracle};

pub use crate::game::{
    GameSession, SessionConfig, SessionCheckpoint,
    GameOutcome, StepOutcome, MoveKind,
};
