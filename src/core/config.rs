//! Board configuration.
//!
//! Callers describe the board once at startup:
//! - dimensions (`height` rows by `width` columns)
//! - how many mines the simulator hides
//!
//! The knowledge base only reads the dimensions. The mine total is used by the
//! simulator and by the session to decide when the game is won.

use serde::{Deserialize, Serialize};

use super::error::ConfigError;
use super::Grid;

/// Complete board configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardConfig {
    /// Number of rows.
    pub height: usize,

    /// Number of columns.
    pub width: usize,

    /// Number of hidden mines.
    pub mines: usize,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            height: 8,
            width: 8,
            mines: 8,
        }
    }
}

impl BoardConfig {
    /// Create a configuration with the given dimensions and no mines.
    pub fn new(height: usize, width: usize) -> Self {
        Self {
            height,
            width,
            mines: 0,
        }
    }

    /// Set the number of mines.
    #[must_use]
    pub fn with_mines(mut self, mines: usize) -> Self {
        self.mines = mines;
        self
    }

    /// The board extent.
    #[must_use]
    pub fn grid(&self) -> Grid {
        Grid::new(self.height, self.width)
    }

    /// Check that the board is non-empty and the mines fit.
    ///
    /// A board completely filled with mines is accepted; every first move
    /// loses, but the configuration is still meaningful.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.height == 0 || self.width == 0 {
            return Err(ConfigError::EmptyBoard {
                height: self.height,
                width: self.width,
            });
        }
        let cells = self.grid().cell_count();
        if self.mines > cells {
            return Err(ConfigError::TooManyMines {
                mines: self.mines,
                cells,
            });
        }
        Ok(())
    }
}
