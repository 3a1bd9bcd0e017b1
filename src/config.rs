//! Board-dimension configuration shared by the environment, enumerator and
//! value tables
//!
//! Dimensions are an explicit value passed at construction rather than
//! module-level constants, so every component agrees on the size of the
//! state space it operates over.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Largest cell count whose base-3 state space still fits in a `usize`.
const MAX_CELLS: usize = 40;

/// Immutable board dimensions plus the derived state-space size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridConfig {
    rows: usize,
    cols: usize,
}

impl GridConfig {
    /// Create a configuration for a square board.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] when the board is not square,
    /// has zero cells, or its `3^(rows*cols)` state space would overflow
    /// `usize`. Win detection runs over both diagonals, so rectangular
    /// boards are rejected up front instead of failing subtly later.
    pub fn new(rows: usize, cols: usize) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(Error::InvalidConfiguration {
                message: "board dimensions must be at least 1x1".to_string(),
            });
        }
        if rows != cols {
            return Err(Error::InvalidConfiguration {
                message: format!("board must be square, got {rows}x{cols}"),
            });
        }
        if rows * cols > MAX_CELLS {
            return Err(Error::InvalidConfiguration {
                message: format!(
                    "{rows}x{cols} board has a 3^{} state space, which does not fit in usize",
                    rows * cols
                ),
            });
        }
        Ok(GridConfig { rows, cols })
    }

    /// The standard 3x3 board.
    pub fn standard() -> Self {
        GridConfig { rows: 3, cols: 3 }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Total number of cells on the board.
    pub fn num_cells(&self) -> usize {
        self.rows * self.cols
    }

    /// Total number of encodable states: `3^(rows*cols)`.
    pub fn num_states(&self) -> usize {
        3usize.pow(self.num_cells() as u32)
    }

    /// Row-major cell index. Does not bounds-check.
    pub fn index(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }

    pub fn in_bounds(&self, row: usize, col: usize) -> bool {
        row < self.rows && col < self.cols
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        Self::standard()
    }
}
