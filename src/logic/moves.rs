//! Move selection.
//!
//! Neither method modifies the knowledge base. Both return `None` as the
//! normal "nothing to offer" signal: a caller with no safe move falls back
//! to a random one, and a caller with no random move stops.

use crate::core::{Cell, GameRng};

use super::KnowledgeBase;

impl KnowledgeBase {
    /// A cell proven safe that has not been revealed yet.
    ///
    /// Picks the first such cell in row-major order.
    #[must_use]
    pub fn make_safe_move(&self) -> Option<Cell> {
        self.safes()
            .iter()
            .find(|&&cell| !self.moves_made().contains(&cell))
            .copied()
    }

    /// A uniformly random cell that is neither revealed nor a known mine.
    ///
    /// Returns `None` once every cell is either revealed or a known mine.
    pub fn make_random_move(&self, rng: &mut GameRng) -> Option<Cell> {
        if self.moves_made().len() + self.mines().len() >= self.grid().cell_count() {
            return None;
        }

        let candidates: Vec<Cell> = self
            .grid()
            .cells()
            .filter(|&cell| !self.moves_made().contains(&cell) && !self.is_known_mine(cell))
            .collect();
        rng.choose(&candidates).copied()
    }
}
