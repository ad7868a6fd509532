//! The agent's knowledge base.
//!
//! ## State
//!
//! - `moves_made`: cells the agent has revealed
//! - `safes`: cells proven safe (revealed or not)
//! - `mines`: cells proven to be mines
//! - `sentences`: constraints over cells whose status is still unknown
//!
//! The status sets use `im::OrdSet`, so cloning a knowledge base for a
//! checkpoint or a rollback snapshot does not copy them.
//!
//! ## Invariants
//!
//! - `safes` and `mines` are disjoint and only ever grow. An update that
//!   would break this fails with `KnowledgeError::Conflict` and changes
//!   nothing.
//! - No sentence mentions a cell in `safes` or `mines`.
//! - No two sentences are equal, and none is empty.
//!
//! ## Saturation
//!
//! After every new sentence the knowledge base scans, applies the batch of
//! conclusions, and scans again until a scan changes nothing. Each productive
//! pass either proves at least one cell or adds a sentence not seen before,
//! and both are finite over a finite board.

use im::OrdSet;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::core::{BoardConfig, Cell, Grid, KnowledgeError};

use super::inference::{self, InferenceBatch};
use super::Sentence;

/// What a single update taught the knowledge base.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Deduction {
    /// Cells newly proven to be mines, in the order they were proven.
    pub mines: Vec<Cell>,

    /// Cells newly proven safe, in the order they were proven.
    ///
    /// The revealed cell of an observation is not included.
    pub safes: Vec<Cell>,

    /// Saturation passes run, including the final pass that changed nothing.
    pub passes: usize,
}

impl Deduction {
    /// True if nothing new was proven.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.mines.is_empty() && self.safes.is_empty()
    }
}

/// Deduction engine for one game.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct KnowledgeBase {
    grid: Grid,
    moves_made: OrdSet<Cell>,
    safes: OrdSet<Cell>,
    mines: OrdSet<Cell>,
    sentences: Vec<Sentence>,
}

impl KnowledgeBase {
    /// Create an empty knowledge base for a board of the given extent.
    #[must_use]
    pub fn new(grid: Grid) -> Self {
        Self {
            grid,
            moves_made: OrdSet::new(),
            safes: OrdSet::new(),
            mines: OrdSet::new(),
            sentences: Vec::new(),
        }
    }

    /// Create an empty knowledge base for the configured board.
    #[must_use]
    pub fn from_config(config: &BoardConfig) -> Self {
        Self::new(config.grid())
    }

    // === Queries ===

    #[must_use]
    pub fn grid(&self) -> Grid {
        self.grid
    }

    /// Cells already revealed by the agent.
    #[must_use]
    pub fn moves_made(&self) -> &OrdSet<Cell> {
        &self.moves_made
    }

    /// Cells proven safe.
    #[must_use]
    pub fn safes(&self) -> &OrdSet<Cell> {
        &self.safes
    }

    /// Cells proven to be mines.
    #[must_use]
    pub fn mines(&self) -> &OrdSet<Cell> {
        &self.mines
    }

    /// Active sentences, in insertion order.
    #[must_use]
    pub fn sentences(&self) -> &[Sentence] {
        &self.sentences
    }

    #[must_use]
    pub fn is_known_safe(&self, cell: Cell) -> bool {
        self.safes.contains(&cell)
    }

    #[must_use]
    pub fn is_known_mine(&self, cell: Cell) -> bool {
        self.mines.contains(&cell)
    }

    /// Check whether a cell's status is known either way.
    #[must_use]
    pub fn is_known(&self, cell: Cell) -> bool {
        self.is_known_safe(cell) || self.is_known_mine(cell)
    }

    /// Number of cells whose status is still unknown.
    #[must_use]
    pub fn unknown_count(&self) -> usize {
        self.grid
            .cell_count()
            .saturating_sub(self.safes.len() + self.mines.len())
    }

    // === Propagation ===

    /// Record `cell` as a mine and remove it from every sentence.
    ///
    /// Does not run inference. Returns `true` if the cell was not already
    /// known to be a mine. A cell known to be safe, or one a sentence says
    /// must be safe, is rejected and nothing changes.
    pub fn mark_mine(&mut self, cell: Cell) -> Result<bool, KnowledgeError> {
        if self.safes.contains(&cell) || !self.sentences.iter().all(|s| s.admits_mine(cell)) {
            return Err(KnowledgeError::Conflict(cell));
        }
        let added = self.mines.insert(cell).is_none();
        for sentence in &mut self.sentences {
            sentence.narrow_as_mine(cell);
        }
        Ok(added)
    }

    /// Record `cell` as safe and remove it from every sentence.
    ///
    /// Does not run inference. Returns `true` if the cell was not already
    /// known to be safe. A cell known to be a mine, or one a sentence says
    /// must be a mine, is rejected and nothing changes.
    pub fn mark_safe(&mut self, cell: Cell) -> Result<bool, KnowledgeError> {
        if self.mines.contains(&cell) || !self.sentences.iter().all(|s| s.admits_safe(cell)) {
            return Err(KnowledgeError::Conflict(cell));
        }
        let added = self.safes.insert(cell).is_none();
        for sentence in &mut self.sentences {
            sentence.narrow_as_safe(cell);
        }
        Ok(added)
    }

    // === Knowledge Intake ===

    /// Record that `cell` was revealed and has `count` neighboring mines,
    /// then deduce everything that follows.
    ///
    /// The reported count must be true. Counts that cannot be true given
    /// what is already known are rejected without modifying the knowledge
    /// base.
    pub fn observe(&mut self, cell: Cell, count: usize) -> Result<Deduction, KnowledgeError> {
        if !self.grid.contains(cell) {
            return Err(KnowledgeError::OutOfBounds {
                cell,
                height: self.grid.height,
                width: self.grid.width,
            });
        }
        if self.is_known_mine(cell) {
            return Err(KnowledgeError::AlreadyMine(cell));
        }

        let neighbors = self.grid.neighbors(cell);
        let known_mines = neighbors.iter().filter(|&&n| self.is_known_mine(n)).count();
        let known_safes = neighbors.iter().filter(|&&n| self.is_known_safe(n)).count();
        let max = neighbors.len() - known_safes;
        if count < known_mines || count > max {
            return Err(KnowledgeError::InconsistentCount {
                cell,
                count,
                min: known_mines,
                max,
            });
        }

        let snapshot = self.clone();
        self.mark_safe(cell)?;
        self.moves_made.insert(cell);

        let unknown = neighbors.into_iter().filter(|&n| !self.is_known(n));
        let sentence = Sentence::new(unknown, count - known_mines);
        debug!(%cell, count, %sentence, "observation");

        self.sentences.push(sentence);
        let deduction = self.saturate_or_restore(snapshot)?;

        debug!(
            %cell,
            new_mines = deduction.mines.len(),
            new_safes = deduction.safes.len(),
            passes = deduction.passes,
            sentences = self.sentences.len(),
            "observation saturated"
        );
        Ok(deduction)
    }

    /// Add an externally known constraint and deduce everything that follows.
    ///
    /// Cells already known are narrowed out first, so the sentence may
    /// mention them. A constraint that contradicts what is known fails with
    /// `Conflict` and leaves the knowledge base unchanged.
    pub fn add_sentence(&mut self, mut sentence: Sentence) -> Result<Deduction, KnowledgeError> {
        let known_mines = sentence.cells().iter().filter(|&&c| self.is_known_mine(c)).count();
        let unknown = sentence.cells().iter().filter(|&&c| !self.is_known(c)).count();
        if known_mines > sentence.count() || sentence.count() - known_mines > unknown {
            // Only known cells can push the count out of range
            if let Some(cell) = sentence.cells().iter().copied().find(|&c| self.is_known(c)) {
                return Err(KnowledgeError::Conflict(cell));
            }
        }

        for &cell in &self.mines {
            sentence.narrow_as_mine(cell);
        }
        for &cell in &self.safes {
            sentence.narrow_as_safe(cell);
        }

        let snapshot = self.clone();
        self.sentences.push(sentence);
        self.saturate_or_restore(snapshot)
    }

    // === Saturation ===

    /// Saturate, rolling back to `snapshot` if the sentences contradict
    /// each other.
    fn saturate_or_restore(&mut self, snapshot: KnowledgeBase) -> Result<Deduction, KnowledgeError> {
        let mut deduction = Deduction::default();
        if let Err(err) = self.saturate(&mut deduction) {
            *self = snapshot;
            return Err(err);
        }
        Ok(deduction)
    }

    /// Scan and apply until a scan changes nothing.
    fn saturate(&mut self, deduction: &mut Deduction) -> Result<(), KnowledgeError> {
        self.dedup_sentences();
        loop {
            let batch = inference::scan(&self.sentences);
            deduction.passes += 1;
            trace!(
                pass = deduction.passes,
                sentences = self.sentences.len(),
                mines = batch.mines.len(),
                safes = batch.safes.len(),
                derived = batch.sentences.len(),
                resolved = batch.resolved.len(),
                "inference pass"
            );
            if !self.apply(batch, deduction)? {
                return Ok(());
            }
        }
    }

    /// Apply one batch. Returns `true` if anything changed.
    fn apply(&mut self, batch: InferenceBatch, deduction: &mut Deduction) -> Result<bool, KnowledgeError> {
        if batch.is_empty() {
            return Ok(false);
        }

        // Resolved sentences go by index, before anything is appended.
        if !batch.resolved.is_empty() {
            let mut index = 0;
            self.sentences.retain(|_| {
                let keep = !batch.resolved.contains(&index);
                index += 1;
                keep
            });
        }

        self.sentences.extend(batch.sentences);

        for cell in batch.mines {
            if self.mark_mine(cell)? {
                deduction.mines.push(cell);
            }
        }
        for cell in batch.safes {
            if self.mark_safe(cell)? {
                deduction.safes.push(cell);
            }
        }

        self.dedup_sentences();
        Ok(true)
    }

    /// Drop empty sentences and exact duplicates, keeping first occurrences.
    fn dedup_sentences(&mut self) {
        let mut seen: FxHashSet<Sentence> = FxHashSet::default();
        self.sentences
            .retain(|sentence| !sentence.is_empty() && seen.insert(sentence.clone()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell(row: usize, col: usize) -> Cell {
        Cell::new(row, col)
    }

    #[test]
    fn test_new_is_empty() {
        let kb = KnowledgeBase::new(Grid::new(4, 4));
        assert!(kb.safes().is_empty());
        assert!(kb.mines().is_empty());
        assert!(kb.moves_made().is_empty());
        assert!(kb.sentences().is_empty());
        assert_eq!(kb.unknown_count(), 16);
    }

    #[test]
    fn test_from_config_uses_board_extent() {
        let kb = KnowledgeBase::from_config(&BoardConfig::new(3, 5));
        assert_eq!(kb.grid(), Grid::new(3, 5));
        assert_eq!(kb.unknown_count(), 15);
    }

    #[test]
    fn test_observe_zero_marks_neighbors_safe() {
        let mut kb = KnowledgeBase::new(Grid::new(3, 3));
        let deduction = kb.observe(cell(0, 0), 0).unwrap();

        assert!(kb.moves_made().contains(&cell(0, 0)));
        for n in [cell(0, 0), cell(0, 1), cell(1, 0), cell(1, 1)] {
            assert!(kb.is_known_safe(n), "{} should be safe", n);
        }
        assert_eq!(deduction.safes.len(), 3);
        assert!(deduction.mines.is_empty());
        assert!(kb.sentences().is_empty());
    }

    #[test]
    fn test_observe_full_count_marks_neighbors_mines() {
        let mut kb = KnowledgeBase::new(Grid::new(2, 2));
        let deduction = kb.observe(cell(0, 0), 3).unwrap();

        assert_eq!(deduction.mines, vec![cell(0, 1), cell(1, 0), cell(1, 1)]);
        assert_eq!(kb.mines().len(), 3);
        assert_eq!(kb.unknown_count(), 0);
    }

    #[test]
    fn test_observe_excludes_known_cells_from_sentence() {
        let mut kb = KnowledgeBase::new(Grid::new(3, 3));
        kb.mark_mine(cell(0, 1)).unwrap();
        kb.mark_safe(cell(1, 0)).unwrap();

        // Neighbors of (0,0): (0,1) mine, (1,0) safe, (1,1) unknown.
        // Count 1 is fully explained by the known mine, so (1,1) is safe.
        let deduction = kb.observe(cell(0, 0), 1).unwrap();
        assert_eq!(deduction.safes, vec![cell(1, 1)]);
        assert!(kb.sentences().is_empty());
    }

    #[test]
    fn test_observe_keeps_undetermined_sentence() {
        let mut kb = KnowledgeBase::new(Grid::new(3, 3));
        kb.observe(cell(0, 0), 1).unwrap();

        assert_eq!(
            kb.sentences(),
            &[Sentence::new([cell(0, 1), cell(1, 0), cell(1, 1)], 1)]
        );
    }

    #[test]
    fn test_observe_out_of_bounds() {
        let mut kb = KnowledgeBase::new(Grid::new(3, 3));
        let err = kb.observe(cell(3, 0), 0).unwrap_err();
        assert_eq!(
            err,
            KnowledgeError::OutOfBounds {
                cell: cell(3, 0),
                height: 3,
                width: 3
            }
        );
        assert!(kb.moves_made().is_empty());
    }

    #[test]
    fn test_observe_inconsistent_count() {
        let mut kb = KnowledgeBase::new(Grid::new(3, 3));
        let err = kb.observe(cell(0, 0), 4).unwrap_err();
        assert!(matches!(err, KnowledgeError::InconsistentCount { max: 3, .. }));

        kb.mark_mine(cell(0, 1)).unwrap();
        let err = kb.observe(cell(0, 0), 0).unwrap_err();
        assert!(matches!(err, KnowledgeError::InconsistentCount { min: 1, .. }));
        assert!(kb.safes().is_empty());
    }

    #[test]
    fn test_observe_known_mine_rejected() {
        let mut kb = KnowledgeBase::new(Grid::new(3, 3));
        kb.mark_mine(cell(1, 1)).unwrap();
        assert_eq!(
            kb.observe(cell(1, 1), 0).unwrap_err(),
            KnowledgeError::AlreadyMine(cell(1, 1))
        );
    }

    #[test]
    fn test_mark_narrows_all_sentences() {
        let mut kb = KnowledgeBase::new(Grid::new(3, 3));
        kb.observe(cell(0, 0), 1).unwrap();
        kb.observe(cell(0, 2), 1).unwrap();

        // Both sentences contain (1,1); marking it narrows both
        kb.mark_mine(cell(1, 1)).unwrap();
        assert!(kb.sentences().iter().all(|s| !s.contains(cell(1, 1))));
        assert!(kb.sentences().iter().all(|s| s.count() == 0));
    }

    #[test]
    fn test_mark_reports_novelty() {
        let mut kb = KnowledgeBase::new(Grid::new(3, 3));
        assert!(kb.mark_safe(cell(0, 0)).unwrap());
        assert!(!kb.mark_safe(cell(0, 0)).unwrap());
        assert!(kb.mark_mine(cell(2, 2)).unwrap());
        assert!(!kb.mark_mine(cell(2, 2)).unwrap());
    }

    #[test]
    fn test_mark_mine_on_known_safe_is_rejected() {
        let mut kb = KnowledgeBase::new(Grid::new(3, 3));
        kb.mark_safe(cell(1, 1)).unwrap();

        assert_eq!(kb.mark_mine(cell(1, 1)), Err(KnowledgeError::Conflict(cell(1, 1))));
        assert!(!kb.is_known_mine(cell(1, 1)));
        assert!(kb.is_known_safe(cell(1, 1)));
        assert_eq!(kb.unknown_count(), 8);
    }

    #[test]
    fn test_mark_safe_on_known_mine_is_rejected() {
        let mut kb = KnowledgeBase::new(Grid::new(3, 3));
        kb.observe(cell(0, 0), 1).unwrap();
        kb.mark_mine(cell(1, 1)).unwrap();
        let sentences = kb.sentences().to_vec();

        assert_eq!(kb.mark_safe(cell(1, 1)), Err(KnowledgeError::Conflict(cell(1, 1))));
        assert!(!kb.is_known_safe(cell(1, 1)));
        assert!(kb.is_known_mine(cell(1, 1)));
        assert_eq!(kb.sentences(), sentences.as_slice());
        assert_eq!(kb.unknown_count(), 7);
    }

    #[test]
    fn test_mark_against_sentence_is_rejected() {
        let mut kb = KnowledgeBase::new(Grid::new(3, 3));
        kb.add_sentence(Sentence::new([cell(0, 0), cell(0, 1), cell(0, 2)], 1)).unwrap();
        kb.mark_mine(cell(0, 0)).unwrap();

        // {(0,1),(0,2)} = 0 leaves no room for another mine
        assert_eq!(kb.mark_mine(cell(0, 1)), Err(KnowledgeError::Conflict(cell(0, 1))));
        assert!(!kb.is_known_mine(cell(0, 1)));
        assert_eq!(kb.sentences(), &[Sentence::new([cell(0, 1), cell(0, 2)], 0)]);
    }

    #[test]
    fn test_add_sentence_contradicting_known_cells_is_rejected() {
        let mut kb = KnowledgeBase::new(Grid::new(3, 3));
        kb.mark_mine(cell(0, 0)).unwrap();

        let err = kb.add_sentence(Sentence::new([cell(0, 0), cell(0, 1)], 0)).unwrap_err();
        assert_eq!(err, KnowledgeError::Conflict(cell(0, 0)));
        assert!(kb.sentences().is_empty());
        assert!(kb.safes().is_empty());
    }

    #[test]
    fn test_contradictory_sentences_roll_back() {
        let (a, b, c) = (cell(0, 0), cell(0, 1), cell(0, 2));
        let mut kb = KnowledgeBase::new(Grid::new(3, 3));
        kb.add_sentence(Sentence::new([a, b, c], 1)).unwrap();
        let before = kb.sentences().to_vec();

        // {A,B} = 2 makes A and B mines, which overfills {A,B,C} = 1
        let err = kb.add_sentence(Sentence::new([a, b], 2)).unwrap_err();
        assert!(matches!(err, KnowledgeError::Conflict(_)));
        assert!(kb.mines().is_empty());
        assert!(kb.safes().is_empty());
        assert_eq!(kb.sentences(), before.as_slice());
    }

    #[test]
    fn test_add_sentence_narrows_known_cells() {
        let mut kb = KnowledgeBase::new(Grid::new(3, 3));
        kb.mark_mine(cell(0, 0)).unwrap();
        kb.mark_safe(cell(0, 1)).unwrap();

        let deduction = kb
            .add_sentence(Sentence::new([cell(0, 0), cell(0, 1), cell(0, 2)], 1))
            .unwrap();

        // {(0,2)} = 0 after narrowing
        assert_eq!(deduction.safes, vec![cell(0, 2)]);
        assert!(kb.sentences().is_empty());
    }

    #[test]
    fn test_duplicate_sentences_collapse() {
        let mut kb = KnowledgeBase::new(Grid::new(4, 4));
        let s = Sentence::new([cell(3, 0), cell(3, 1), cell(3, 2)], 1);
        kb.add_sentence(s.clone()).unwrap();
        kb.add_sentence(s.clone()).unwrap();
        assert_eq!(kb.sentences(), &[s]);
    }

    #[test]
    fn test_clone_is_independent() {
        let mut kb = KnowledgeBase::new(Grid::new(3, 3));
        kb.observe(cell(0, 0), 1).unwrap();

        let snapshot = kb.clone();
        kb.mark_mine(cell(1, 1)).unwrap();

        assert!(!snapshot.is_known_mine(cell(1, 1)));
        assert_eq!(snapshot.sentences().len(), 1);
    }
}
