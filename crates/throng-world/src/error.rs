//! Error types for the `throng-world` crate.
//!
//! Construction errors are fatal: a plane that cannot be partitioned
//! evenly is a configuration mistake, not a runtime condition. Membership
//! errors indicate a precondition violation by the caller (placing an
//! agent in a cell that does not exist).

use crate::grid::GridCell;

/// Errors that can occur during spatial-grid operations.
#[derive(Debug, thiserror::Error)]
pub enum GridError {
    /// Plane or cell size is zero, negative, or non-finite.
    #[error("plane size {plane_size} and cell size {cell_size} must both be positive and finite")]
    NonPositiveSize {
        /// Configured plane extent.
        plane_size: f32,
        /// Configured cell extent.
        cell_size: f32,
    },

    /// The cell size does not divide the plane size evenly.
    #[error("cell size {cell_size} does not evenly divide plane size {plane_size}")]
    UnevenPartition {
        /// Configured plane extent.
        plane_size: f32,
        /// Configured cell extent.
        cell_size: f32,
    },

    /// An authoritative membership update addressed a cell outside the grid.
    #[error("cell {cell} is outside the {grid_len}x{grid_len} grid")]
    CellOutOfBounds {
        /// The offending cell coordinates.
        cell: GridCell,
        /// Cells per side of the grid.
        grid_len: usize,
    },
}
