//! One scan of the sentence collection.
//!
//! A scan reads the sentences without touching them and collects everything
//! it can conclude into an `InferenceBatch`:
//!
//! - **Direct resolution**: a sentence whose count is 0 makes all its cells
//!   safe; a sentence whose count equals its size makes all its cells mines.
//!   The sentence itself is marked resolved.
//! - **Subset elimination**: for every pair where `B ⊂ A`, the difference
//!   `A - B` holds exactly `A.count - B.count` mines. That difference is
//!   either fully safe, fully mined, or recorded as a new sentence.
//!
//! The knowledge base applies the batch afterwards and scans again, so no
//! sentence is ever mutated while it is being iterated.

use std::collections::BTreeSet;

use rustc_hash::FxHashSet;

use crate::core::Cell;

use super::Sentence;

/// Conclusions from one scan, applied together.
#[derive(Clone, Debug, Default)]
pub struct InferenceBatch {
    /// Cells proven to be mines.
    pub mines: BTreeSet<Cell>,

    /// Cells proven to be safe.
    pub safes: BTreeSet<Cell>,

    /// Sentences derived by subset elimination that are not yet known.
    pub sentences: Vec<Sentence>,

    /// Indices of sentences fully resolved by this scan.
    pub resolved: FxHashSet<usize>,
}

impl InferenceBatch {
    /// True if the scan concluded nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.mines.is_empty()
            && self.safes.is_empty()
            && self.sentences.is_empty()
            && self.resolved.is_empty()
    }
}

/// Scan `sentences` once and collect every conclusion.
#[must_use]
pub fn scan(sentences: &[Sentence]) -> InferenceBatch {
    let mut batch = InferenceBatch::default();

    for (index, sentence) in sentences.iter().enumerate() {
        if sentence.is_empty() {
            batch.resolved.insert(index);
        } else if let Some(cells) = sentence.known_mines() {
            batch.mines.extend(cells.iter().copied());
            batch.resolved.insert(index);
        } else if let Some(cells) = sentence.known_safes() {
            batch.safes.extend(cells.iter().copied());
            batch.resolved.insert(index);
        }
    }

    let known: FxHashSet<&Sentence> = sentences.iter().collect();
    let mut derived: FxHashSet<Sentence> = FxHashSet::default();

    for (i, superset) in sentences.iter().enumerate() {
        if batch.resolved.contains(&i) {
            continue;
        }
        for (j, subset) in sentences.iter().enumerate() {
            if i == j || batch.resolved.contains(&j) {
                continue;
            }
            let Some(diff) = superset.difference(subset) else {
                continue;
            };

            if diff.count() == 0 {
                batch.safes.extend(diff.cells().iter().copied());
            } else if diff.count() == diff.len() {
                batch.mines.extend(diff.cells().iter().copied());
            } else if !known.contains(&diff) && !derived.contains(&diff) {
                derived.insert(diff.clone());
                batch.sentences.push(diff);
            }
        }
    }

    batch
}
