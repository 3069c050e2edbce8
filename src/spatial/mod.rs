//! Spatial data structures
//!
//! This module contains the fixed-size grid the fill algorithm writes into
//! and the compositor reads from.

/// Grid state and neighbor lookup
pub mod grid;

pub use grid::Grid;
