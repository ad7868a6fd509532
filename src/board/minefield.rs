//! A hidden-mine board.

use im::OrdSet;
use serde::{Deserialize, Serialize};

use crate::core::{BoardConfig, Cell, ConfigError, GameRng, Grid};

use super::MineOracle;

/// Board state: mine layout plus the cells the player has flagged.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Board {
    grid: Grid,
    mines: OrdSet<Cell>,
    flagged: OrdSet<Cell>,
}

impl Board {
    /// Place `config.mines` mines uniformly at random.
    pub fn new(config: &BoardConfig, rng: &mut GameRng) -> Result<Self, ConfigError> {
        config.validate()?;

        let grid = config.grid();
        let mut cells: Vec<Cell> = grid.cells().collect();
        rng.shuffle(&mut cells);

        Ok(Self {
            grid,
            mines: cells.into_iter().take(config.mines).collect(),
            flagged: OrdSet::new(),
        })
    }

    /// Build a board with mines at exactly the given cells.
    ///
    /// Cells outside the grid are ignored.
    pub fn with_mines(grid: Grid, mines: impl IntoIterator<Item = Cell>) -> Self {
        Self {
            grid,
            mines: mines.into_iter().filter(|&c| grid.contains(c)).collect(),
            flagged: OrdSet::new(),
        }
    }

    /// Mine positions.
    #[must_use]
    pub fn mines(&self) -> &OrdSet<Cell> {
        &self.mines
    }

    /// Flag a cell as a suspected mine. Returns `false` if already flagged.
    pub fn flag(&mut self, cell: Cell) -> bool {
        self.flagged.insert(cell).is_none()
    }

    /// Cells flagged so far.
    #[must_use]
    pub fn flagged(&self) -> &OrdSet<Cell> {
        &self.flagged
    }

    /// The game is won once the flags are exactly the mines.
    #[must_use]
    pub fn won(&self) -> bool {
        self.flagged == self.mines
    }
}

impl MineOracle for Board {
    fn grid(&self) -> Grid {
        self.grid
    }

    fn is_mine(&self, cell: Cell) -> bool {
        self.mines.contains(&cell)
    }

    fn mine_count(&self) -> usize {
        self.mines.len()
    }
}

/// Renders the mine layout, `X` for a mine.
impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let rule = "--".repeat(self.grid.width) + "-";
        for row in 0..self.grid.height {
            writeln!(f, "{}", rule)?;
            for col in 0..self.grid.width {
                let mark = if self.is_mine(Cell::new(row, col)) { 'X' } else { ' ' };
                write!(f, "|{}", mark)?;
            }
            writeln!(f, "|")?;
        }
        writeln!(f, "{}", rule)
    }
}
