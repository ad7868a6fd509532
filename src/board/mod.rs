//! The game board the agent plays against.
//!
//! `Board` hides the mines; `MineOracle` is the narrow interface a driver
//! needs from it.

mod minefield;
mod oracle;

pub use minefield::Board;
pub use oracle::MineOracle;
