//! Knowledge base bindings for Python.
//!
//! Cells cross the boundary as `(row, col)` tuples.

use std::collections::BTreeSet;

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::core::{Cell, GameRng, Grid};
use crate::logic::{KnowledgeBase, Sentence};

/// Python wrapper for KnowledgeBase.
///
/// Holds its own RNG for `make_random_move`.
#[pyclass(name = "KnowledgeBase")]
pub struct PyKnowledgeBase {
    inner: KnowledgeBase,
    rng: GameRng,
}

#[pymethods]
impl PyKnowledgeBase {
    /// Create an empty knowledge base.
    ///
    /// # Arguments
    /// - height: Number of rows
    /// - width: Number of columns
    /// - seed: RNG seed for random moves
    #[new]
    #[pyo3(signature = (height = 8, width = 8, seed = 0))]
    fn new(height: usize, width: usize, seed: u64) -> Self {
        Self {
            inner: KnowledgeBase::new(Grid::new(height, width)),
            rng: GameRng::new(seed),
        }
    }

    /// Record a revealed cell and its neighboring mine count.
    ///
    /// Returns `(new_mines, new_safes)` learned from this observation.
    fn observe(
        &mut self,
        cell: (usize, usize),
        count: usize,
    ) -> PyResult<(Vec<(usize, usize)>, Vec<(usize, usize)>)> {
        let deduction = self
            .inner
            .observe(Cell::from(cell), count)
            .map_err(|e| PyValueError::new_err(e.to_string()))?;
        Ok((
            deduction.mines.into_iter().map(Into::into).collect(),
            deduction.safes.into_iter().map(Into::into).collect(),
        ))
    }

    /// Add the constraint "exactly `count` of `cells` are mines".
    fn add_sentence(&mut self, cells: Vec<(usize, usize)>, count: usize) -> PyResult<()> {
        let cells: BTreeSet<Cell> = cells.into_iter().map(Cell::from).collect();
        if count > cells.len() {
            return Err(PyValueError::new_err(format!(
                "{} mines cannot fit in {} cells",
                count,
                cells.len()
            )));
        }
        self.inner
            .add_sentence(Sentence::new(cells, count))
            .map_err(|e| PyValueError::new_err(e.to_string()))?;
        Ok(())
    }

    /// Returns whether the cell was newly marked.
    fn mark_mine(&mut self, cell: (usize, usize)) -> PyResult<bool> {
        self.inner
            .mark_mine(Cell::from(cell))
            .map_err(|e| PyValueError::new_err(e.to_string()))
    }

    /// Returns whether the cell was newly marked.
    fn mark_safe(&mut self, cell: (usize, usize)) -> PyResult<bool> {
        self.inner
            .mark_safe(Cell::from(cell))
            .map_err(|e| PyValueError::new_err(e.to_string()))
    }

    fn make_safe_move(&self) -> Option<(usize, usize)> {
        self.inner.make_safe_move().map(Into::into)
    }

    fn make_random_move(&mut self) -> Option<(usize, usize)> {
        self.inner.make_random_move(&mut self.rng).map(Into::into)
    }

    #[getter]
    fn mines(&self) -> Vec<(usize, usize)> {
        self.inner.mines().iter().map(|&c| c.into()).collect()
    }

    #[getter]
    fn safes(&self) -> Vec<(usize, usize)> {
        self.inner.safes().iter().map(|&c| c.into()).collect()
    }

    #[getter]
    fn moves_made(&self) -> Vec<(usize, usize)> {
        self.inner.moves_made().iter().map(|&c| c.into()).collect()
    }

    /// Active sentences as strings, e.g. `{(0, 1), (1, 1)} = 1`.
    fn sentences(&self) -> Vec<String> {
        self.inner.sentences().iter().map(ToString::to_string).collect()
    }

    fn __repr__(&self) -> String {
        let grid = self.inner.grid();
        format!(
            "KnowledgeBase({}x{}, safes={}, mines={}, sentences={})",
            grid.height,
            grid.width,
            self.inner.safes().len(),
            self.inner.mines().len(),
            self.inner.sentences().len()
        )
    }
}
