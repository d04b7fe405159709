//! The marker-weight formula and steering-velocity aggregation.
//!
//! An agent's velocity is a weight-normalized average of the planar
//! offsets to the markers it claimed this tick. Each marker's weight
//! rewards two things at once: alignment with the goal direction and
//! physical closeness:
//!
//! ```text
//! weight(d) = (1 + cos_angle(d, G)) / (1 + |d|)
//! ```
//!
//! where `d` is the marker offset with its height component forced to
//! zero (steering is planar) and `G` is the goal offset. Degenerate
//! vectors (either length zero) contribute an alignment of 0 rather than
//! propagating a division by zero.
//!
//! Agents whose marker-derived velocity is too small on either planar
//! axis get a stuck-fallback nudge straight toward the goal. The check
//! is per-axis, not magnitude-based: it fires even when one axis is
//! small and the other large.

use glam::Vec3;

/// Agents within this 3-D distance of their goal are stationary.
pub const GOAL_ARRIVAL_DISTANCE: f32 = 8.0;

/// Fixed per-tick integration step. Not adaptive, not time-delta-based.
pub const STEP_SCALE: f32 = 0.15;

/// Per-axis velocity floor below which the stuck fallback fires.
pub const STALL_AXIS_THRESHOLD: f32 = 0.1;

/// Fraction of the goal offset added as the stuck-fallback nudge.
pub const STALL_NUDGE_SCALE: f32 = 0.1;

/// The steering weight of one marker offset against the goal offset.
///
/// Both inputs are taken as-is; callers zero the height component of the
/// marker offset before calling. A zero-length offset or goal yields an
/// alignment of 0, leaving the distance term alone.
pub fn marker_weight(offset: Vec3, goal_offset: Vec3) -> f32 {
    let distance = offset.length();
    let denom = distance * goal_offset.length();
    let alignment = if denom > 0.0 {
        offset.dot(goal_offset) / denom
    } else {
        0.0
    };
    (1.0 + alignment) / (1.0 + distance)
}

/// Aggregate an agent's claimed markers into one steering velocity.
///
/// Returns the weight-normalized average of the planar marker offsets,
/// with the stuck-fallback nudge applied when either planar axis of the
/// result is below [`STALL_AXIS_THRESHOLD`]. With no markers (or all
/// weights degenerate) the marker term is the zero vector and only the
/// nudge moves the agent.
///
/// The caller integrates the result with [`STEP_SCALE`].
pub fn steering_velocity(position: Vec3, goal: Vec3, marker_positions: &[Vec3]) -> Vec3 {
    let goal_offset = goal - position;

    let mut total_weight = 0.0_f32;
    for &marker in marker_positions {
        total_weight += marker_weight(planar_offset(marker, position), goal_offset);
    }

    let mut velocity = Vec3::ZERO;
    if total_weight > 0.0 {
        for &marker in marker_positions {
            let offset = planar_offset(marker, position);
            let weight = marker_weight(offset, goal_offset);
            velocity += offset * (weight / total_weight);
        }
    }

    if velocity.x < STALL_AXIS_THRESHOLD || velocity.z < STALL_AXIS_THRESHOLD {
        velocity += goal_offset * STALL_NUDGE_SCALE;
    }

    velocity
}

/// Marker offset from the agent with the height component forced to zero.
fn planar_offset(marker: Vec3, position: Vec3) -> Vec3 {
    let mut offset = marker - position;
    offset.y = 0.0;
    offset
}
