//! Python bindings for the minesweeper knowledge base.
//!
//! # Quick Start
//!
//! ```python
//! import minesweeper_kb as mkb
//!
//! kb = mkb.KnowledgeBase(height=8, width=8)
//! kb.observe((0, 0), 0)
//! move = kb.make_safe_move()
//!
//! # Or let the agent play a whole game
//! session = mkb.GameSession(height=8, width=8, mines=8, seed=42)
//! outcome = session.run()
//! ```

use pyo3::prelude::*;

mod py_knowledge;
mod py_session;

pub use py_knowledge::*;
pub use py_session::*;

/// minesweeper_kb: a deduction engine for minesweeper agents.
#[pymodule]
fn minesweeper_kb(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyKnowledgeBase>()?;
    m.add_class::<PyGameSession>()?;
    Ok(())
}
