//! The [`Agent`] and [`Marker`] entity structs.
//!
//! Both are owned exclusively by the simulation orchestrator. The spatial
//! grid and the markers refer back to agents only through [`AgentId`],
//! never through owning references, so entity lifetimes stay independent.
//!
//! Marker ownership is a one-tick claim: `owner` is populated during the
//! ownership-assignment phase and cleared again by the per-tick reset, so
//! every marker is recontested from scratch on every tick.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::ids::{AgentId, MarkerId};

/// A steerable entity moving from its start position toward a fixed goal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Agent {
    /// Stable identity, assigned at creation, never reused.
    pub id: AgentId,
    /// Current world position. `y` is a constant display height.
    pub position: Vec3,
    /// Fixed goal position for this agent's lifetime.
    pub goal: Vec3,
    /// Opaque display attribute, assigned at creation, immutable.
    pub color: Color,
    /// Markers claimed this tick, in claim order. Rebuilt every tick.
    pub owned_markers: Vec<MarkerId>,
}

impl Agent {
    /// Create an agent at `position` heading for `goal`.
    pub const fn new(id: AgentId, position: Vec3, goal: Vec3, color: Color) -> Self {
        Self {
            id,
            position,
            goal,
            color,
            owned_markers: Vec::new(),
        }
    }

    /// Full 3-D Euclidean distance from the current position to the goal.
    pub fn distance_to_goal(&self) -> f32 {
        self.position.distance(self.goal)
    }

    /// Record a marker claimed by this agent for the current tick.
    pub fn claim_marker(&mut self, marker: MarkerId) {
        self.owned_markers.push(marker);
    }

    /// Drop all marker claims in preparation for the next tick.
    pub fn clear_markers(&mut self) {
        self.owned_markers.clear();
    }
}

/// A passive sample point agents claim each tick to steer by.
///
/// Markers never move and are never created or destroyed after setup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Marker {
    /// Fixed world position. `y` is a constant display height.
    pub position: Vec3,
    /// The agent that claimed this marker this tick, if any.
    pub owner: Option<AgentId>,
    /// Owning agent's color, or [`Color::NEUTRAL`] while unowned.
    pub color: Color,
}

impl Marker {
    /// Create an unowned marker at the given position.
    pub const fn new(position: Vec3) -> Self {
        Self {
            position,
            owner: None,
            color: Color::NEUTRAL,
        }
    }

    /// Whether an agent holds a claim on this marker this tick.
    pub const fn is_owned(&self) -> bool {
        self.owner.is_some()
    }

    /// Grant this tick's claim to `agent`, taking on its display color.
    pub const fn claim_for(&mut self, agent: AgentId, color: Color) {
        self.owner = Some(agent);
        self.color = color;
    }

    /// Clear the claim, returning the marker to the unowned state.
    pub const fn release(&mut self) {
        self.owner = None;
        self.color = Color::NEUTRAL;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_agent() -> Agent {
        Agent::new(
            AgentId::new(0),
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(3.0, 1.0, 4.0),
            Color::new(10, 20, 30),
        )
    }

    #[test]
    fn distance_to_goal_is_euclidean() {
        let agent = sample_agent();
        assert!((agent.distance_to_goal() - 5.0).abs() < 1e-6);
    }

    #[test]
    fn claim_and_clear_markers() {
        let mut agent = sample_agent();
        agent.claim_marker(MarkerId::new(4));
        agent.claim_marker(MarkerId::new(9));
        assert_eq!(agent.owned_markers, vec![MarkerId::new(4), MarkerId::new(9)]);

        agent.clear_markers();
        assert!(agent.owned_markers.is_empty());
    }

    #[test]
    fn marker_claim_release_cycle() {
        let mut marker = Marker::new(Vec3::new(1.0, 0.5, -1.0));
        assert!(!marker.is_owned());
        assert!(marker.color.is_neutral());

        let color = Color::new(200, 100, 50);
        marker.claim_for(AgentId::new(2), color);
        assert!(marker.is_owned());
        assert_eq!(marker.owner, Some(AgentId::new(2)));
        assert_eq!(marker.color, color);

        marker.release();
        assert!(!marker.is_owned());
        assert!(marker.color.is_neutral());
    }

    #[test]
    fn release_is_idempotent() {
        let mut marker = Marker::new(Vec3::ZERO);
        marker.claim_for(AgentId::new(1), Color::new(1, 2, 3));
        marker.release();
        marker.release();
        assert!(!marker.is_owned());
        assert!(marker.color.is_neutral());
    }

    #[test]
    fn marker_roundtrip_serde() {
        let marker = Marker::new(Vec3::new(4.0, 0.5, -3.5));
        let json = serde_json::to_string(&marker).ok();
        assert!(json.is_some());
        let restored: Result<Marker, _> = serde_json::from_str(json.as_deref().unwrap_or(""));
        let restored = restored.ok();
        assert!(restored.is_some_and(|m| m.position == marker.position && !m.is_owned()));
    }
}
