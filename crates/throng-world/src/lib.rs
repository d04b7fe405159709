//! Uniform spatial partitioning for the Throng crowd simulation.
//!
//! This crate models the physical board: a square plane centered at the
//! origin, partitioned into fixed-size square cells. Each cell holds a
//! set of the agents currently located within its bounds, giving the
//! orchestrator constant-time proximity queries during the per-tick
//! marker-ownership pass.
//!
//! # Modules
//!
//! - [`error`] -- Error types for grid construction and membership updates.
//! - [`grid`] -- [`SpatialGrid`] with floor-based authoritative cell
//!   lookup, round-based neighborhood seeding, and set-semantics buckets.
//!
//! [`SpatialGrid`]: grid::SpatialGrid

pub mod error;
pub mod grid;

// Re-export primary types at crate root.
pub use error::GridError;
pub use grid::{GridCell, SpatialGrid};
