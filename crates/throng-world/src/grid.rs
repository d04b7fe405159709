//! The uniform spatial grid over the simulation plane.
//!
//! The plane is a square of `plane_size` units centered at the world
//! origin, split into `grid_len x grid_len` cells of `cell_size` units
//! each (`grid_len = plane_size / cell_size`, which must divide evenly).
//! World coordinates are translated by half the plane extent before cell
//! math, placing grid cell `(0, 0)` at the plane's minimum corner.
//!
//! Two coordinate mappings exist on purpose and must not be unified:
//!
//! - [`SpatialGrid::cell_of_point`] **floors** the translated coordinate.
//!   It names the one cell whose bounds contain the point and is the
//!   authoritative mapping for agent bucket membership.
//! - [`SpatialGrid::nearest_cell`] **rounds** instead. It approximates
//!   the grid intersection nearest the point and is used only to seed the
//!   2x2 sample block for marker-neighborhood queries. Its result may lie
//!   one past the last valid cell index; queries treat such cells as
//!   empty rather than as errors.
//!
//! Cells hold unique-membership sets of [`AgentId`], ordered for
//! deterministic iteration. The grid never owns agents.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use throng_types::AgentId;

use crate::error::GridError;

/// Integer cell coordinates, possibly outside the grid.
///
/// Signed on purpose: neighborhood math produces negative candidates at
/// the plane's minimum edge and `grid_len` at the maximum edge, and the
/// bounds check belongs to the grid, not to every caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GridCell {
    /// Cell column, 0 at the plane's minimum x edge.
    pub x: i64,
    /// Cell row, 0 at the plane's minimum z edge.
    pub z: i64,
}

impl GridCell {
    /// Create a cell coordinate pair.
    pub const fn new(x: i64, z: i64) -> Self {
        Self { x, z }
    }

    /// The 2x2 sample block seeded by a rounded grid intersection:
    /// top-left, top, left, and self, in that order.
    pub const fn sample_block(self) -> [Self; 4] {
        [
            Self::new(self.x - 1, self.z - 1),
            Self::new(self.x, self.z - 1),
            Self::new(self.x - 1, self.z),
            Self::new(self.x, self.z),
        ]
    }
}

impl core::fmt::Display for GridCell {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "({}, {})", self.x, self.z)
    }
}

/// A square partition of the plane into set-semantics agent buckets.
#[derive(Debug, Clone)]
pub struct SpatialGrid {
    /// Plane extent in world units (square, centered at the origin).
    plane_size: f32,
    /// Cell extent in world units.
    cell_size: f32,
    /// Cells per side.
    grid_len: usize,
    /// Row-major buckets: index `z * grid_len + x`.
    cells: Vec<BTreeSet<AgentId>>,
}

impl SpatialGrid {
    /// Create an empty grid partitioning a `plane_size` square into
    /// `cell_size` cells.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::NonPositiveSize`] if either size is not a
    /// positive finite number, or [`GridError::UnevenPartition`] if the
    /// cell size does not divide the plane size evenly.
    pub fn new(cell_size: f32, plane_size: f32) -> Result<Self, GridError> {
        if !(plane_size.is_finite() && cell_size.is_finite())
            || plane_size <= 0.0
            || cell_size <= 0.0
        {
            return Err(GridError::NonPositiveSize {
                plane_size,
                cell_size,
            });
        }

        let len = plane_size / cell_size;
        if len.fract().abs() > f32::EPSILON {
            return Err(GridError::UnevenPartition {
                plane_size,
                cell_size,
            });
        }

        let grid_len = len as usize;
        Ok(Self {
            plane_size,
            cell_size,
            grid_len,
            cells: vec![BTreeSet::new(); grid_len * grid_len],
        })
    }

    /// Cells per side of the grid.
    pub const fn grid_len(&self) -> usize {
        self.grid_len
    }

    /// Plane extent in world units.
    pub const fn plane_size(&self) -> f32 {
        self.plane_size
    }

    /// Cell extent in world units.
    pub const fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// The authoritative cell containing the world point `(x, z)`.
    ///
    /// Floors the translated coordinate. The result is only meaningful
    /// for points on the plane; callers are responsible for keeping
    /// agents in bounds.
    pub fn cell_of_point(&self, x: f32, z: f32) -> GridCell {
        let (tx, tz) = self.translate(x, z);
        GridCell::new(
            (tx / self.cell_size).floor() as i64,
            (tz / self.cell_size).floor() as i64,
        )
    }

    /// The grid intersection nearest the world point `(x, z)`.
    ///
    /// Rounds the translated coordinate instead of flooring it. Used only
    /// to seed marker-neighborhood sampling; the result can be `grid_len`
    /// on either axis at the plane's maximum edge, which queries treat as
    /// an empty cell.
    pub fn nearest_cell(&self, x: f32, z: f32) -> GridCell {
        let (tx, tz) = self.translate(x, z);
        GridCell::new(
            (tx / self.cell_size).round() as i64,
            (tz / self.cell_size).round() as i64,
        )
    }

    /// Whether the cell lies inside the grid.
    pub fn contains(&self, cell: GridCell) -> bool {
        self.bucket_index(cell).is_some()
    }

    /// Add an agent to a cell's membership set.
    ///
    /// Duplicate insertion is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::CellOutOfBounds`] if the cell lies outside
    /// the grid.
    pub fn insert(&mut self, agent: AgentId, cell: GridCell) -> Result<(), GridError> {
        let grid_len = self.grid_len;
        let idx = self
            .bucket_index(cell)
            .ok_or(GridError::CellOutOfBounds { cell, grid_len })?;
        if let Some(bucket) = self.cells.get_mut(idx) {
            bucket.insert(agent);
        }
        Ok(())
    }

    /// Remove an agent from a cell's membership set.
    ///
    /// Removing an agent that is not present is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::CellOutOfBounds`] if the cell lies outside
    /// the grid.
    pub fn remove(&mut self, agent: AgentId, cell: GridCell) -> Result<(), GridError> {
        let grid_len = self.grid_len;
        let idx = self
            .bucket_index(cell)
            .ok_or(GridError::CellOutOfBounds { cell, grid_len })?;
        if let Some(bucket) = self.cells.get_mut(idx) {
            bucket.remove(&agent);
        }
        Ok(())
    }

    /// Iterate over the agents in a cell.
    ///
    /// Out-of-range cells yield nothing: neighborhood queries sample
    /// cells that may not exist, and "no agents there" is the correct
    /// answer for them.
    pub fn agents_in(&self, cell: GridCell) -> impl Iterator<Item = AgentId> + '_ {
        self.bucket_index(cell)
            .and_then(|idx| self.cells.get(idx))
            .into_iter()
            .flat_map(|bucket| bucket.iter().copied())
    }

    /// Number of agents currently in a cell (0 for out-of-range cells).
    pub fn occupant_count(&self, cell: GridCell) -> usize {
        self.bucket_index(cell)
            .and_then(|idx| self.cells.get(idx))
            .map_or(0, BTreeSet::len)
    }

    /// Find the cell currently holding the given agent, if any.
    ///
    /// Linear scan over all buckets; intended for invariant checks, not
    /// the hot path (the orchestrator tracks cells itself).
    pub fn locate(&self, agent: AgentId) -> Option<GridCell> {
        let grid_len = self.grid_len as i64;
        self.cells
            .iter()
            .position(|bucket| bucket.contains(&agent))
            .map(|idx| {
                let idx = idx as i64;
                GridCell::new(idx % grid_len, idx / grid_len)
            })
    }

    /// Total number of agent memberships across all cells.
    pub fn membership_count(&self) -> usize {
        self.cells.iter().map(BTreeSet::len).sum()
    }

    /// Translate world coordinates into grid space, placing the plane's
    /// minimum corner at the origin.
    fn translate(&self, x: f32, z: f32) -> (f32, f32) {
        let half = self.plane_size / 2.0;
        (x + half, z + half)
    }

    /// Row-major bucket index for a cell, or `None` if out of range.
    fn bucket_index(&self, cell: GridCell) -> Option<usize> {
        let len = self.grid_len as i64;
        if cell.x < 0 || cell.z < 0 || cell.x >= len || cell.z >= len {
            return None;
        }
        let idx = cell.z * len + cell.x;
        usize::try_from(idx).ok()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    /// The default board: a 100-unit plane in 10-unit cells.
    fn default_grid() -> SpatialGrid {
        SpatialGrid::new(10.0, 100.0).unwrap()
    }

    #[test]
    fn construction_validates_sizes() {
        assert!(SpatialGrid::new(10.0, 100.0).is_ok());
        assert!(matches!(
            SpatialGrid::new(0.0, 100.0),
            Err(GridError::NonPositiveSize { .. })
        ));
        assert!(matches!(
            SpatialGrid::new(-10.0, 100.0),
            Err(GridError::NonPositiveSize { .. })
        ));
        assert!(matches!(
            SpatialGrid::new(10.0, f32::NAN),
            Err(GridError::NonPositiveSize { .. })
        ));
        assert!(matches!(
            SpatialGrid::new(30.0, 100.0),
            Err(GridError::UnevenPartition { .. })
        ));
    }

    #[test]
    fn grid_len_is_plane_over_cell() {
        assert_eq!(default_grid().grid_len(), 10);
        assert_eq!(SpatialGrid::new(5.0, 100.0).unwrap().grid_len(), 20);
    }

    #[test]
    fn cell_of_point_floors_translated_coordinate() {
        let grid = default_grid();
        // (-49, 49) translates to (1, 99): floored-divided by 10 -> (0, 9).
        assert_eq!(grid.cell_of_point(-49.0, 49.0), GridCell::new(0, 9));
        assert_eq!(grid.cell_of_point(0.0, 0.0), GridCell::new(5, 5));
        assert_eq!(grid.cell_of_point(-50.0, -50.0), GridCell::new(0, 0));
    }

    #[test]
    fn nearest_cell_rounds_and_may_exceed_grid() {
        let grid = default_grid();
        // (-49, 49) translates to (1, 99): rounded-divided by 10 -> (0, 10),
        // one past the last valid row index.
        let cell = grid.nearest_cell(-49.0, 49.0);
        assert_eq!(cell, GridCell::new(0, 10));
        assert!(!grid.contains(cell));
        assert_eq!(grid.agents_in(cell).count(), 0);
    }

    #[test]
    fn floor_round_asymmetry() {
        let grid = default_grid();
        // Translated (26, 26): floor gives cell 2, round gives intersection 3.
        assert_eq!(grid.cell_of_point(-24.0, -24.0), GridCell::new(2, 2));
        assert_eq!(grid.nearest_cell(-24.0, -24.0), GridCell::new(3, 3));
    }

    #[test]
    fn insert_remove_membership() {
        let mut grid = default_grid();
        let agent = AgentId::new(1);
        let cell = GridCell::new(3, 4);

        grid.insert(agent, cell).unwrap();
        assert_eq!(grid.occupant_count(cell), 1);
        assert!(grid.agents_in(cell).any(|a| a == agent));
        assert_eq!(grid.locate(agent), Some(cell));

        grid.remove(agent, cell).unwrap();
        assert_eq!(grid.occupant_count(cell), 0);
        assert_eq!(grid.locate(agent), None);
    }

    #[test]
    fn duplicate_insert_is_noop() {
        let mut grid = default_grid();
        let agent = AgentId::new(2);
        let cell = GridCell::new(0, 0);

        grid.insert(agent, cell).unwrap();
        grid.insert(agent, cell).unwrap();
        assert_eq!(grid.occupant_count(cell), 1);
        assert_eq!(grid.membership_count(), 1);
    }

    #[test]
    fn remove_absent_agent_is_noop() {
        let mut grid = default_grid();
        let cell = GridCell::new(5, 5);
        assert!(grid.remove(AgentId::new(9), cell).is_ok());
        assert_eq!(grid.occupant_count(cell), 0);
    }

    #[test]
    fn out_of_bounds_membership_update_is_an_error() {
        let mut grid = default_grid();
        let agent = AgentId::new(0);
        for cell in [
            GridCell::new(-1, 0),
            GridCell::new(0, -1),
            GridCell::new(10, 0),
            GridCell::new(0, 10),
        ] {
            assert!(matches!(
                grid.insert(agent, cell),
                Err(GridError::CellOutOfBounds { .. })
            ));
            assert!(matches!(
                grid.remove(agent, cell),
                Err(GridError::CellOutOfBounds { .. })
            ));
        }
    }

    #[test]
    fn out_of_bounds_query_is_empty_not_an_error() {
        let grid = default_grid();
        for cell in [
            GridCell::new(-1, -1),
            GridCell::new(-1, 5),
            GridCell::new(10, 10),
            GridCell::new(3, 10),
        ] {
            assert_eq!(grid.agents_in(cell).count(), 0);
            assert_eq!(grid.occupant_count(cell), 0);
        }
    }

    #[test]
    fn sample_block_order_is_top_left_top_left_self() {
        let block = GridCell::new(4, 7).sample_block();
        assert_eq!(block[0], GridCell::new(3, 6));
        assert_eq!(block[1], GridCell::new(4, 6));
        assert_eq!(block[2], GridCell::new(3, 7));
        assert_eq!(block[3], GridCell::new(4, 7));
    }

    #[test]
    fn grid_cell_roundtrip_serde() {
        let cell = GridCell::new(3, 9);
        let json = serde_json::to_string(&cell).ok();
        assert!(json.is_some());
        let restored: Result<GridCell, _> = serde_json::from_str(json.as_deref().unwrap_or(""));
        assert_eq!(restored.ok(), Some(cell));
    }

    #[test]
    fn agents_iterate_in_id_order() {
        let mut grid = default_grid();
        let cell = GridCell::new(2, 2);
        grid.insert(AgentId::new(5), cell).unwrap();
        grid.insert(AgentId::new(1), cell).unwrap();
        grid.insert(AgentId::new(3), cell).unwrap();

        let ids: Vec<u32> = grid.agents_in(cell).map(AgentId::into_inner).collect();
        assert_eq!(ids, vec![1, 3, 5]);
    }
}
