//! Logical sentences: "exactly `count` of these cells are mines".

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::core::Cell;

/// A constraint over a set of cells whose status is still unknown.
///
/// Cells are kept in an ordered set, so two sentences compare and hash equal
/// exactly when their cells and counts match. That value is the dedupe key
/// for the knowledge base.
///
/// Invariant: `count <= cells.len()`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Sentence {
    cells: BTreeSet<Cell>,
    count: usize,
}

impl Sentence {
    /// Create a sentence. Duplicate cells collapse.
    pub fn new(cells: impl IntoIterator<Item = Cell>, count: usize) -> Self {
        let cells: BTreeSet<Cell> = cells.into_iter().collect();
        debug_assert!(
            count <= cells.len(),
            "sentence claims {} mines among {} cells",
            count,
            cells.len()
        );
        Self { cells, count }
    }

    /// The cells this sentence constrains.
    #[must_use]
    pub fn cells(&self) -> &BTreeSet<Cell> {
        &self.cells
    }

    /// Number of mines among `cells`.
    #[must_use]
    pub fn count(&self) -> usize {
        self.count
    }

    /// Number of cells in the sentence.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// An empty sentence says nothing and can be discarded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Check whether `cell` is one of the sentence's cells.
    #[must_use]
    pub fn contains(&self, cell: Cell) -> bool {
        self.cells.contains(&cell)
    }

    /// Check whether every cell of this sentence also appears in `other`.
    #[must_use]
    pub fn is_subset(&self, other: &Sentence) -> bool {
        self.cells.is_subset(&other.cells)
    }

    /// Every cell, if the count says all of them are mines.
    #[must_use]
    pub fn known_mines(&self) -> Option<&BTreeSet<Cell>> {
        (!self.cells.is_empty() && self.count == self.cells.len()).then_some(&self.cells)
    }

    /// Every cell, if the count says none of them are mines.
    #[must_use]
    pub fn known_safes(&self) -> Option<&BTreeSet<Cell>> {
        (!self.cells.is_empty() && self.count == 0).then_some(&self.cells)
    }

    /// Check whether `cell` could be a mine without breaking the count.
    #[must_use]
    pub fn admits_mine(&self, cell: Cell) -> bool {
        !self.cells.contains(&cell) || self.count > 0
    }

    /// Check whether `cell` could be safe without breaking the count.
    #[must_use]
    pub fn admits_safe(&self, cell: Cell) -> bool {
        !self.cells.contains(&cell) || self.count < self.cells.len()
    }

    /// Remove a cell now known to be a mine, accounting for it in the count.
    ///
    /// No-op if the cell is not in the sentence.
    pub fn narrow_as_mine(&mut self, cell: Cell) {
        if self.cells.remove(&cell) {
            debug_assert!(self.count > 0, "mine {} removed from a zero-count sentence", cell);
            self.count = self.count.saturating_sub(1);
        }
    }

    /// Remove a cell now known to be safe. The count is unchanged.
    ///
    /// No-op if the cell is not in the sentence.
    pub fn narrow_as_safe(&mut self, cell: Cell) {
        if self.cells.remove(&cell) {
            debug_assert!(
                self.count <= self.cells.len(),
                "safe {} removed from a saturated sentence",
                cell
            );
        }
    }

    /// Subtract a contained sentence from this one.
    ///
    /// Returns `None` unless `subset` is a strict subset with a count no
    /// larger than ours.
    #[must_use]
    pub fn difference(&self, subset: &Sentence) -> Option<Sentence> {
        if subset.len() >= self.len() || !subset.is_subset(self) || subset.count > self.count {
            return None;
        }
        let cells: BTreeSet<Cell> = self.cells.difference(&subset.cells).copied().collect();
        let count = self.count - subset.count;
        if count > cells.len() {
            return None;
        }
        Some(Sentence { cells, count })
    }
}

impl std::fmt::Display for Sentence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{")?;
        for (i, cell) in self.cells.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", cell)?;
        }
        write!(f, "}} = {}", self.count)
    }
}
