//! Knowledge base integration tests.
//!
//! These tests drive `observe` with truthful counts from a real board and
//! check the deductions and invariants after every step.

use std::collections::BTreeSet;

use minesweeper_kb::{Board, Cell, Grid, KnowledgeBase, MineOracle, Sentence};

fn cell(row: usize, col: usize) -> Cell {
    Cell::new(row, col)
}

/// Check every structural invariant of the knowledge base.
fn assert_invariants(kb: &KnowledgeBase) {
    for mine in kb.mines() {
        assert!(!kb.is_known_safe(*mine), "{} is both safe and a mine", mine);
    }

    let mut seen = BTreeSet::new();
    for sentence in kb.sentences() {
        assert!(!sentence.is_empty(), "empty sentence kept");
        assert!(sentence.count() <= sentence.len(), "malformed sentence {}", sentence);
        assert!(seen.insert(sentence.to_string()), "duplicate sentence {}", sentence);
        for c in sentence.cells() {
            assert!(!kb.is_known(*c), "known cell {} still in {}", c, sentence);
        }
    }
}

/// Check that nothing the knowledge base believes contradicts the board.
fn assert_sound(kb: &KnowledgeBase, board: &Board) {
    for mine in kb.mines() {
        assert!(board.is_mine(*mine), "{} wrongly deduced as a mine", mine);
    }
    for safe in kb.safes() {
        assert!(!board.is_mine(*safe), "{} wrongly deduced as safe", safe);
    }
}

// =============================================================================
// Subset Inference
// =============================================================================

/// ({A,B,C}, 2) and ({A,B}, 1) prove C is a mine.
#[test]
fn test_subset_inference_mine() {
    let (a, b, c) = (cell(0, 0), cell(0, 1), cell(0, 2));
    let mut kb = KnowledgeBase::new(Grid::new(3, 3));

    kb.add_sentence(Sentence::new([a, b, c], 2)).unwrap();
    let deduction = kb.add_sentence(Sentence::new([a, b], 1)).unwrap();

    assert_eq!(deduction.mines, vec![c]);
    assert!(deduction.safes.is_empty());
    assert!(kb.is_known_mine(c));
    // The larger sentence narrows into the smaller one and collapses
    assert_eq!(kb.sentences(), &[Sentence::new([a, b], 1)]);
    assert_invariants(&kb);
}

/// ({A,B,C}, 1) and ({A,B}, 1) prove C is safe.
#[test]
fn test_subset_inference_safe() {
    let (a, b, c) = (cell(0, 0), cell(0, 1), cell(0, 2));
    let mut kb = KnowledgeBase::new(Grid::new(3, 3));

    kb.add_sentence(Sentence::new([a, b, c], 1)).unwrap();
    let deduction = kb.add_sentence(Sentence::new([a, b], 1)).unwrap();

    assert_eq!(deduction.safes, vec![c]);
    assert!(deduction.mines.is_empty());
    assert_eq!(kb.sentences(), &[Sentence::new([a, b], 1)]);
    assert_invariants(&kb);
}

/// A derived sentence takes part in later inference.
#[test]
fn test_derived_sentence_chains() {
    let (a, b, c, d, e) = (cell(0, 0), cell(0, 1), cell(0, 2), cell(1, 0), cell(1, 1));
    let mut kb = KnowledgeBase::new(Grid::new(3, 3));

    kb.add_sentence(Sentence::new([a, b, c, d], 2)).unwrap();
    let deduction = kb.add_sentence(Sentence::new([a, b], 1)).unwrap();
    assert!(deduction.is_empty());
    assert!(kb.sentences().contains(&Sentence::new([c, d], 1)));

    // {C,D,E} = 1 minus the derived {C,D} = 1 leaves E safe
    let deduction = kb.add_sentence(Sentence::new([c, d, e], 1)).unwrap();
    assert_eq!(deduction.safes, vec![e]);
    assert_invariants(&kb);
}

// =============================================================================
// End-to-End Scenarios
// =============================================================================

/// 3x3 board, one mine in the far corner.
#[test]
fn test_corner_mine_scenario() {
    let mine = cell(2, 2);
    let board = Board::with_mines(Grid::new(3, 3), [mine]);
    let mut kb = KnowledgeBase::new(board.grid());

    // A zero in the opposite corner clears all its neighbors at once
    let deduction = kb.observe(cell(0, 0), board.nearby_mines(cell(0, 0))).unwrap();
    assert_eq!(deduction.safes, vec![cell(0, 1), cell(1, 0), cell(1, 1)]);
    assert!(kb.sentences().is_empty());

    // The centre sees one mine among five unknowns
    kb.observe(cell(1, 1), board.nearby_mines(cell(1, 1))).unwrap();
    assert_eq!(
        kb.sentences(),
        &[Sentence::new([cell(0, 2), cell(1, 2), cell(2, 0), cell(2, 1), cell(2, 2)], 1)]
    );

    // Two more zeros shrink that sentence to the mine alone
    kb.observe(cell(0, 2), board.nearby_mines(cell(0, 2))).unwrap();
    let deduction = kb.observe(cell(2, 0), board.nearby_mines(cell(2, 0))).unwrap();

    assert_eq!(deduction.mines, vec![mine]);
    assert!(kb.is_known_mine(mine));
    assert_eq!(kb.safes().len(), 8);
    assert_eq!(kb.unknown_count(), 0);
    assert!(kb.sentences().is_empty());
    assert_invariants(&kb);
    assert_sound(&kb, &board);
}

/// Reveal every safe cell in row-major order; every mine ends up proven.
#[test]
fn test_full_reveal_proves_every_mine() {
    let board = Board::with_mines(Grid::new(4, 4), [cell(0, 3), cell(2, 1)]);
    let mut kb = KnowledgeBase::new(board.grid());

    let mut prev_safes = 0;
    let mut prev_mines = 0;
    for c in board.grid().cells().filter(|&c| !board.is_mine(c)) {
        kb.observe(c, board.nearby_mines(c)).unwrap();

        assert_invariants(&kb);
        assert_sound(&kb, &board);
        assert!(kb.safes().len() >= prev_safes);
        assert!(kb.mines().len() >= prev_mines);
        prev_safes = kb.safes().len();
        prev_mines = kb.mines().len();
    }

    assert_eq!(kb.mines(), board.mines());
    assert_eq!(kb.safes().len(), 14);
}

/// The agent's own loop: safe moves first, truthful observations.
#[test]
fn test_safe_moves_never_hit_mines() {
    let board = Board::with_mines(
        Grid::new(5, 5),
        [cell(0, 4), cell(1, 1), cell(3, 3), cell(4, 0)],
    );
    let mut kb = KnowledgeBase::new(board.grid());

    // Start from the centre, which borders two mines
    let start = cell(2, 2);
    assert_eq!(board.nearby_mines(start), 2);
    kb.observe(start, board.nearby_mines(start)).unwrap();

    while let Some(mv) = kb.make_safe_move() {
        assert!(!board.is_mine(mv), "safe move {} is a mine", mv);
        kb.observe(mv, board.nearby_mines(mv)).unwrap();
        assert_invariants(&kb);
        assert_sound(&kb, &board);
    }
}

/// A re-observation of the same cell derives nothing new and breaks nothing.
#[test]
fn test_repeat_observation_is_harmless() {
    let board = Board::with_mines(Grid::new(3, 3), [cell(0, 2)]);
    let mut kb = KnowledgeBase::new(board.grid());

    kb.observe(cell(1, 1), 1).unwrap();
    let sentences = kb.sentences().to_vec();

    let deduction = kb.observe(cell(1, 1), 1).unwrap();
    assert!(deduction.is_empty());
    assert_eq!(kb.sentences(), sentences.as_slice());
    assert_invariants(&kb);
}

/// Saturation stays within a pass per cell on every observation.
#[test]
fn test_pass_count_bounded_by_cells() {
    let board = Board::with_mines(
        Grid::new(6, 6),
        [cell(0, 0), cell(1, 4), cell(3, 2), cell(4, 5), cell(5, 1)],
    );
    let mut kb = KnowledgeBase::new(board.grid());
    let cells = board.grid().cell_count();

    for c in board.grid().cells().filter(|&c| !board.is_mine(c)) {
        let deduction = kb.observe(c, board.nearby_mines(c)).unwrap();
        assert!(deduction.passes >= 1);
        assert!(deduction.passes <= cells, "{} passes on {}", deduction.passes, c);
    }
}
