//! Adjacency-constrained random tile grid filling
//!
//! A fixed-size grid is filled with tile variants so that every pair of
//! horizontally or vertically adjacent cells is edge-compatible under a
//! static adjacency model. The fill is a memoryless random loop without
//! backtracking. The resolved grid is then composited into one raster from
//! per-variant tile images read and written as binary PPM.

#![forbid(unsafe_code)]

/// Adjacency model, cell resolution and the fill loop
pub mod algorithm;
/// Input/output operations and error handling
pub mod io;
/// Grid storage and neighbor lookup
pub mod spatial;

pub use io::error::{Result, TileError};
