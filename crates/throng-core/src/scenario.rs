//! Scenario agent spawning and marker scattering.
//!
//! A scenario determines where agents start and where they are goaled;
//! the marker field is scenario-independent. Both draw from the
//! simulation's seeded generator, so a given seed reproduces the same
//! marker field and agent coloring.
//!
//! # Layouts
//!
//! - **Top-down**: two opposing rows of 10 agents, one at each z extreme
//!   of the plane, spaced a tenth of the plane apart in x. Each agent is
//!   goaled to its mirror position across the plane, so the rows march
//!   through each other.
//! - **Circle** (default): 12 agents evenly spaced on a circle of radius
//!   30, each goaled to its antipodal point, so every agent crosses the
//!   center.

use std::f32::consts::PI;

use glam::Vec3;
use rand::Rng;
use throng_types::{Agent, AgentId, Color, Marker, Scenario};

/// Constant display height of agents. Not used in steering math.
pub const AGENT_HEIGHT: f32 = 1.0;

/// Radius of the circle scenario's starting ring.
pub const CIRCLE_RADIUS: f32 = 30.0;

/// Number of agents on the circle scenario's ring.
pub const CIRCLE_AGENT_COUNT: u32 = 12;

/// Agents per row in the top-down scenario.
pub const ROW_AGENT_COUNT: u32 = 10;

/// Spawn the agents for a scenario on a plane of the given extent.
///
/// IDs are assigned in creation order starting from 0; colors are drawn
/// from the generator.
pub fn spawn_agents<R: Rng + ?Sized>(
    scenario: Scenario,
    plane_size: f32,
    rng: &mut R,
) -> Vec<Agent> {
    match scenario {
        Scenario::TopDown => spawn_top_down(plane_size, rng),
        Scenario::Circle => spawn_circle(rng),
    }
}

/// Scatter `count` unowned markers uniformly across the plane.
///
/// Markers sit at a constant `height`, inset one unit from the plane
/// edge on both axes so every marker lies strictly inside the board.
pub fn scatter_markers<R: Rng + ?Sized>(
    count: u32,
    plane_size: f32,
    height: f32,
    rng: &mut R,
) -> Vec<Marker> {
    let edge = plane_size / 2.0 - 1.0;
    (0..count)
        .map(|_| {
            let x = rng.random_range(-edge..edge);
            let z = rng.random_range(-edge..edge);
            Marker::new(Vec3::new(x, height, z))
        })
        .collect()
}

/// Two rows of agents at the plane's z extremes, goals mirrored in z.
fn spawn_top_down<R: Rng + ?Sized>(plane_size: f32, rng: &mut R) -> Vec<Agent> {
    let edge = plane_size / 2.0 - 1.0;
    let spacing = plane_size / ROW_AGENT_COUNT as f32;
    let mut agents = Vec::with_capacity((ROW_AGENT_COUNT * 2) as usize);

    // Top row marches down, bottom row marches up.
    for (row, z) in [(0, edge), (1, -edge)] {
        for i in 0..ROW_AGENT_COUNT {
            let id = AgentId::new(row * ROW_AGENT_COUNT + i);
            let x = spacing.mul_add(i as f32, -edge);
            let position = Vec3::new(x, AGENT_HEIGHT, z);
            let goal = Vec3::new(x, AGENT_HEIGHT, -z);
            agents.push(Agent::new(id, position, goal, Color::random(rng)));
        }
    }

    agents
}

/// Agents evenly spaced on a ring, goals antipodal.
fn spawn_circle<R: Rng + ?Sized>(rng: &mut R) -> Vec<Agent> {
    (0..CIRCLE_AGENT_COUNT)
        .map(|i| {
            let angle = PI / 6.0 * i as f32;
            let x = angle.cos() * CIRCLE_RADIUS;
            let z = angle.sin() * CIRCLE_RADIUS;
            let position = Vec3::new(x, AGENT_HEIGHT, z);
            let goal = Vec3::new(-x, AGENT_HEIGHT, -z);
            Agent::new(AgentId::new(i), position, goal, Color::random(rng))
        })
        .collect()
}
