//! Spatial partitioning data structures
//!
//! Provides the grid spatial hash used for broad-phase candidate culling
//! in 2D space.

mod grid;

pub use grid::{CellGrid, SpatialIndex};
