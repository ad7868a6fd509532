//! Core types: cells, grid geometry, configuration, RNG, errors.
//!
//! Nothing here knows about sentences or inference; the `logic` module
//! builds on these types.

pub mod cell;
pub mod grid;
pub mod config;
pub mod rng;
pub mod error;

pub use cell::Cell;
pub use grid::{Grid, Neighbors};
pub use config::BoardConfig;
pub use rng::{GameRng, GameRngState};
pub use error::{CheckpointError, ConfigError, KnowledgeError};
