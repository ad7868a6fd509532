//! The contract between the knowledge base's driver and a game board.
//!
//! The knowledge base itself never sees ground truth. A driver asks the
//! oracle what a revealed cell shows and feeds that count to `observe`.

use crate::core::{Cell, Grid};

/// Ground truth for a board.
///
/// ## Implementation Notes
///
/// - `nearby_mines` must count exactly the mines among the in-bounds
///   neighbors of `cell`, never the cell itself.
/// - Both methods are only called with cells inside `grid()`.
pub trait MineOracle {
    /// The board extent.
    fn grid(&self) -> Grid;

    /// Whether `cell` holds a mine.
    fn is_mine(&self, cell: Cell) -> bool;

    /// Number of mines among the neighbors of `cell`.
    fn nearby_mines(&self, cell: Cell) -> usize {
        self.grid()
            .neighbors(cell)
            .into_iter()
            .filter(|&n| self.is_mine(n))
            .count()
    }

    /// Total number of mines on the board.
    fn mine_count(&self) -> usize {
        self.grid().cells().filter(|&c| self.is_mine(c)).count()
    }
}
