//! Single-cell candidate narrowing and commitment
//!
//! The resolver looks at the committed neighbors of one cell, intersects
//! their facing compatibility sets and commits one surviving variant drawn
//! uniformly. It never looks past the immediate neighbors and never undoes
//! anything, so an empty intersection simply leaves the cell alone.
//!
//! Resolving an already committed cell is allowed: the candidate set is
//! rebuilt from the current neighbors and the cell may end up with a
//! different variant than before.

use crate::algorithm::adjacency::{AdjacencyModel, Side, TileVariant};
use crate::algorithm::bitset::TileBitset;
use crate::algorithm::selection::RandomSource;
use crate::io::error::{Result, TileError};
use crate::spatial::Grid;

/// Outcome of resolving one cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveResult {
    /// The variant written to the cell
    Committed(TileVariant),
    /// No variant satisfies every committed neighbor; nothing was written
    Blocked,
}

impl ResolveResult {
    /// Whether a variant was written
    pub const fn is_committed(self) -> bool {
        matches!(self, Self::Committed(_))
    }
}

/// Resolves cells against a fixed adjacency model
#[derive(Debug, Clone, Copy)]
pub struct CellResolver<'m> {
    model: &'m AdjacencyModel,
}

impl<'m> CellResolver<'m> {
    /// Create a resolver bound to `model`
    pub const fn new(model: &'m AdjacencyModel) -> Self {
        Self { model }
    }

    /// The model this resolver checks against
    pub const fn model(&self) -> &'m AdjacencyModel {
        self.model
    }

    /// Variants compatible with every committed neighbor of `(x, y)`
    ///
    /// Each committed neighbor contributes its own set for the side facing
    /// `(x, y)`; absent and unassigned neighbors contribute nothing.
    pub fn candidates(&self, grid: &Grid, x: usize, y: usize) -> TileBitset {
        let mut candidates = self.model.universe().clone();

        for side in Side::ALL {
            let Some((nx, ny)) = grid.neighbor(x, y, side) else {
                continue;
            };
            if let Some(neighbor) = grid.get(nx, ny) {
                candidates.intersect_with(self.model.compatible_side(neighbor, side.opposite()));
            }
        }

        candidates
    }

    /// Narrow and commit the cell at `(x, y)`
    ///
    /// Draws an index in `[0, n - 1]` over the `n` candidates in ascending
    /// order. Writes exactly one cell on `Committed` and none on `Blocked`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `(x, y)` is outside the grid
    /// - The random source returns an index past the candidate count
    pub fn resolve(
        &self,
        grid: &mut Grid,
        x: usize,
        y: usize,
        rng: &mut impl RandomSource,
    ) -> Result<ResolveResult> {
        if !grid.contains(x, y) {
            return Err(TileError::InvalidPosition {
                position: (x, y),
                dimensions: grid.dimensions(),
            });
        }

        let candidates = self.candidates(grid, x, y);
        let count = candidates.count();
        if count == 0 {
            return Ok(ResolveResult::Blocked);
        }

        let index = rng.int_inclusive(0, count - 1);
        let variant = candidates.nth(index).ok_or(TileError::InvalidTileIndex {
            index,
            max_tiles: count,
        })?;

        grid.commit(x, y, variant)?;
        Ok(ResolveResult::Committed(variant))
    }
}
