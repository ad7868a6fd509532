//! Board dimensions and neighbor enumeration.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::Cell;

/// Neighbors of a cell. Never more than 8, so they stay on the stack.
pub type Neighbors = SmallVec<[Cell; 8]>;

/// The rectangular extent of a board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Grid {
    /// Number of rows.
    pub height: usize,
    /// Number of columns.
    pub width: usize,
}

impl Grid {
    /// Create a grid with the given dimensions.
    #[must_use]
    pub const fn new(height: usize, width: usize) -> Self {
        Self { height, width }
    }

    /// Total number of cells on the board.
    #[must_use]
    pub const fn cell_count(self) -> usize {
        self.height * self.width
    }

    /// Check whether a cell lies on the board.
    #[must_use]
    pub const fn contains(self, cell: Cell) -> bool {
        cell.row < self.height && cell.col < self.width
    }

    /// The in-bounds cells adjacent to `cell`, in row-major order.
    ///
    /// Corners have 3 neighbors, edges 5, interior cells 8.
    #[must_use]
    pub fn neighbors(self, cell: Cell) -> Neighbors {
        let mut out = Neighbors::new();
        let rows = cell.row.saturating_sub(1)..=(cell.row + 1).min(self.height.saturating_sub(1));
        for row in rows {
            let cols = cell.col.saturating_sub(1)..=(cell.col + 1).min(self.width.saturating_sub(1));
            for col in cols {
                let neighbor = Cell::new(row, col);
                if neighbor != cell && self.contains(neighbor) {
                    out.push(neighbor);
                }
            }
        }
        out
    }

    /// Iterate over every cell in row-major order.
    pub fn cells(self) -> impl Iterator<Item = Cell> {
        (0..self.height).flat_map(move |row| (0..self.width).map(move |col| Cell::new(row, col)))
    }
}
