//! Game session bindings for Python.

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::core::BoardConfig;
use crate::game::{GameOutcome, GameSession, SessionConfig, StepOutcome};

/// Python wrapper for GameSession.
#[pyclass(name = "GameSession")]
pub struct PyGameSession {
    inner: GameSession,
}

fn outcome_name(outcome: &GameOutcome) -> &'static str {
    match outcome {
        GameOutcome::Won { .. } => "won",
        GameOutcome::Lost { .. } => "lost",
        GameOutcome::Exhausted { .. } => "exhausted",
        GameOutcome::MoveLimit { .. } => "move_limit",
    }
}

#[pymethods]
impl PyGameSession {
    /// Create a session on a freshly placed board.
    ///
    /// # Arguments
    /// - height, width: Board dimensions
    /// - mines: Number of mines
    /// - seed: RNG seed for mine placement and random moves
    /// - max_moves: Reveal limit
    #[new]
    #[pyo3(signature = (height = 8, width = 8, mines = 8, seed = 42, max_moves = 10_000))]
    fn new(height: usize, width: usize, mines: usize, seed: u64, max_moves: usize) -> PyResult<Self> {
        let config = SessionConfig::new()
            .with_board(BoardConfig::new(height, width).with_mines(mines))
            .with_seed(seed)
            .with_max_moves(max_moves);
        let inner = GameSession::new(config).map_err(|e| PyValueError::new_err(e.to_string()))?;
        Ok(Self { inner })
    }

    /// Make one move.
    ///
    /// Returns the revealed cell, or None once the game is over.
    fn step(&mut self) -> PyResult<Option<(usize, usize)>> {
        let outcome = self
            .inner
            .step()
            .map_err(|e| PyValueError::new_err(e.to_string()))?;
        Ok(match outcome {
            StepOutcome::Revealed { cell, .. } | StepOutcome::Exploded { cell, .. } => Some(cell.into()),
            StepOutcome::Finished(_) => None,
        })
    }

    /// Play to the end. Returns `(outcome, moves)`.
    fn run(&mut self) -> PyResult<(String, usize)> {
        let outcome = self
            .inner
            .run()
            .map_err(|e| PyValueError::new_err(e.to_string()))?;
        Ok((outcome_name(&outcome).to_string(), outcome.moves()))
    }

    /// The outcome name if the game is over, else None.
    #[getter]
    fn outcome(&self) -> Option<&'static str> {
        self.inner.outcome().as_ref().map(outcome_name)
    }

    #[getter]
    fn moves(&self) -> usize {
        self.inner.moves()
    }

    /// Mines proven by the agent so far.
    #[getter]
    fn flagged(&self) -> Vec<(usize, usize)> {
        self.inner.board().flagged().iter().map(|&c| c.into()).collect()
    }

    fn __repr__(&self) -> String {
        format!(
            "GameSession(moves={}, status={})",
            self.inner.moves(),
            self.outcome().unwrap_or("ongoing")
        )
    }
}
