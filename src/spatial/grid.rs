//! Fixed-size grid of tile assignments
//!
//! Cells are stored row-major in an `ndarray` indexed `[y, x]`. A cell is
//! either unassigned (`None`) or holds a committed variant. Neighbor lookup
//! treats a position as present iff both coordinates lie in `[0, size)`.

use ndarray::Array2;

use crate::algorithm::adjacency::{Side, TileVariant};
use crate::io::error::{Result, TileError};

/// Grid of optional tile commitments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    cells: Array2<Option<TileVariant>>,
}

impl Grid {
    /// Create a grid with every cell unassigned
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            cells: Array2::from_elem((height, width), None),
        }
    }

    /// Number of columns
    pub fn width(&self) -> usize {
        self.cells.ncols()
    }

    /// Number of rows
    pub fn height(&self) -> usize {
        self.cells.nrows()
    }

    /// Grid dimensions as (width, height)
    pub fn dimensions(&self) -> (usize, usize) {
        (self.width(), self.height())
    }

    /// Whether `(x, y)` addresses a cell
    pub fn contains(&self, x: usize, y: usize) -> bool {
        x < self.width() && y < self.height()
    }

    /// Committed variant at `(x, y)`, `None` if unassigned or outside the grid
    pub fn get(&self, x: usize, y: usize) -> Option<TileVariant> {
        self.cells.get([y, x]).copied().flatten()
    }

    /// Position of the neighbor on `side` of `(x, y)`, if inside the grid
    pub fn neighbor(&self, x: usize, y: usize, side: Side) -> Option<(usize, usize)> {
        let (dx, dy) = side.offset();
        let nx = x.checked_add_signed(dx)?;
        let ny = y.checked_add_signed(dy)?;
        self.contains(nx, ny).then_some((nx, ny))
    }

    /// Commit `variant` to `(x, y)`, replacing any previous commitment
    ///
    /// # Errors
    ///
    /// Returns an error if `(x, y)` is outside the grid
    pub fn commit(&mut self, x: usize, y: usize, variant: TileVariant) -> Result<()> {
        let dimensions = self.dimensions();
        let cell = self
            .cells
            .get_mut([y, x])
            .ok_or(TileError::InvalidPosition {
                position: (x, y),
                dimensions,
            })?;
        *cell = Some(variant);
        Ok(())
    }

    /// Return `(x, y)` to unassigned; true if it held a commitment
    ///
    /// # Errors
    ///
    /// Returns an error if `(x, y)` is outside the grid
    pub fn unassign(&mut self, x: usize, y: usize) -> Result<bool> {
        let dimensions = self.dimensions();
        let cell = self
            .cells
            .get_mut([y, x])
            .ok_or(TileError::InvalidPosition {
                position: (x, y),
                dimensions,
            })?;
        Ok(cell.take().is_some())
    }

    /// Return every cell to unassigned
    pub fn clear(&mut self) {
        self.cells.fill(None);
    }

    /// Count cells without a commitment
    pub fn unassigned_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_none()).count()
    }

    /// Whether every cell holds a committed variant
    pub fn is_complete(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    /// Iterate committed cells as `((x, y), variant)` in row-major order
    pub fn committed(&self) -> impl Iterator<Item = ((usize, usize), TileVariant)> + '_ {
        self.cells
            .indexed_iter()
            .filter_map(|((y, x), cell)| cell.map(|variant| ((x, y), variant)))
    }
}
