//! Board coordinates.
//!
//! A `Cell` is an opaque `(row, col)` pair. The knowledge base only needs
//! equality and hashing, but cells also order row-major so that every set of
//! cells iterates in the same order on every run.
//!
//! ```
//! use minesweeper_kb::core::Cell;
//!
//! let cell = Cell::new(2, 3);
//! assert_eq!(cell.row, 2);
//! assert_eq!(format!("{}", cell), "(2, 3)");
//! assert!(Cell::new(0, 9) < Cell::new(1, 0));
//! ```

use serde::{Deserialize, Serialize};

/// A single coordinate on the game board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    /// Row index, 0 at the top.
    pub row: usize,
    /// Column index, 0 at the left.
    pub col: usize,
}

impl Cell {
    /// Create a cell at the given row and column.
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl From<(usize, usize)> for Cell {
    fn from((row, col): (usize, usize)) -> Self {
        Self::new(row, col)
    }
}

impl From<Cell> for (usize, usize) {
    fn from(cell: Cell) -> Self {
        (cell.row, cell.col)
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}
