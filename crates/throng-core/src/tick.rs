//! Tick cycle: the fixed-step loop that drives the crowd simulation.
//!
//! Each call to [`Simulation::tick`] runs one fully sequential pass:
//!
//! 1. **Reset** -- clear every marker claim and every agent's claim list
//!    left over from the previous tick, so all markers are recontested
//!    from scratch.
//! 2. **Ownership assignment** -- every unowned marker samples the 2x2
//!    block of grid cells around its rounded grid intersection and is
//!    claimed by the nearest eligible agent found there, if any.
//! 3. **Movement** -- every agent not yet at its goal aggregates its
//!    claimed markers into a steering velocity, integrates it, and is
//!    re-bucketed in the grid if it crossed a cell boundary.
//!
//! The reset leads rather than trails the tick so that the presentation
//! layer, which reads agent and marker state *between* ticks, observes
//! the colors assigned by the most recent ownership pass. No ownership
//! survives a tick boundary either way.
//!
//! The pass is single-threaded and synchronous: nothing else mutates the
//! grid, agents, or markers, and a tick either completes in full or the
//! configuration was invalid to begin with.

use glam::Vec3;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use throng_types::{Agent, AgentId, Marker, MarkerId, Scenario};
use throng_world::{GridError, SpatialGrid};
use tracing::{debug, info};

use crate::config::SimulationConfig;
use crate::scenario;
use crate::steering;

/// Errors that can occur during tick execution.
#[derive(Debug, thiserror::Error)]
pub enum TickError {
    /// Tick counter would overflow.
    #[error("tick counter overflow: cannot advance beyond u64::MAX")]
    TickOverflow,

    /// A grid membership update failed, meaning an agent left the plane.
    #[error("grid error: {source}")]
    Grid {
        /// The underlying grid error.
        #[from]
        source: GridError,
    },
}

/// Summary of a single tick's execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickSummary {
    /// The tick number that was executed.
    pub tick: u64,
    /// Markers claimed by an agent during this tick.
    pub markers_owned: usize,
    /// Agents that computed a velocity and moved this tick.
    pub agents_moved: u32,
    /// Agents within the goal-arrival threshold, stationary this tick.
    pub agents_at_goal: u32,
}

/// Result of the movement phase.
struct MoveOutcome {
    /// Agents that moved.
    moved: u32,
    /// Agents already at their goal.
    at_goal: u32,
}

/// The crowd simulation: grid, agents, and markers under one owner.
///
/// The `Simulation` is the sole owner of all three collections. Grid
/// cells and marker claims refer back to agents only by [`AgentId`].
/// External callers may read agents and markers between ticks for
/// presentation but must not mutate them.
#[derive(Debug)]
pub struct Simulation {
    /// The spatial grid over the plane.
    grid: SpatialGrid,
    /// All agents, indexed by their creation-order ID.
    agents: Vec<Agent>,
    /// All markers, indexed by their creation-order ID. Fixed after setup.
    markers: Vec<Marker>,
    /// The active scenario layout.
    scenario: Scenario,
    /// Seeded generator for scattering and coloring.
    rng: SmallRng,
    /// Completed tick count.
    tick: u64,
}

impl Simulation {
    /// Construct a simulation from configuration.
    ///
    /// Builds the grid, spawns the scenario's agents into their cells,
    /// and scatters the marker field. The world seed makes the marker
    /// field and agent coloring reproducible.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::NonPositiveSize`] or
    /// [`GridError::UnevenPartition`] for an invalid plane partition.
    pub fn new(config: &SimulationConfig) -> Result<Self, GridError> {
        let grid = SpatialGrid::new(config.plane.cell_size, config.plane.size)?;
        let scenario = config.resolved_scenario();
        let mut rng = SmallRng::seed_from_u64(config.world.seed);

        let agents = scenario::spawn_agents(scenario, config.plane.size, &mut rng);
        let markers = scenario::scatter_markers(
            config.markers.count,
            config.plane.size,
            config.markers.height,
            &mut rng,
        );

        let mut sim = Self {
            grid,
            agents,
            markers,
            scenario,
            rng,
            tick: 0,
        };
        sim.populate_grid()?;

        info!(
            scenario = %sim.scenario,
            agents = sim.agents.len(),
            markers = sim.markers.len(),
            grid_len = sim.grid.grid_len(),
            seed = config.world.seed,
            "Simulation constructed"
        );
        Ok(sim)
    }

    /// Advance the simulation by exactly one fixed step.
    ///
    /// # Errors
    ///
    /// Returns [`TickError::TickOverflow`] if the tick counter would
    /// exceed `u64::MAX`, or [`TickError::Grid`] if an agent's position
    /// update carried it off the plane (a configuration precondition
    /// violation, not a recoverable runtime fault).
    pub fn tick(&mut self) -> Result<TickSummary, TickError> {
        self.tick = self.tick.checked_add(1).ok_or(TickError::TickOverflow)?;
        let tick = self.tick;

        // --- Phase 0: reset the previous tick's claims ---
        self.reset_ownership();

        // --- Phase 1: marker-ownership assignment ---
        let markers_owned = self.phase_assign_markers();
        debug!(tick, markers_owned, "Ownership assignment complete");

        // --- Phase 2: velocity computation and integration ---
        let outcome = self.phase_move_agents()?;
        debug!(
            tick,
            agents_moved = outcome.moved,
            agents_at_goal = outcome.at_goal,
            "Movement complete"
        );

        Ok(TickSummary {
            tick,
            markers_owned,
            agents_moved: outcome.moved,
            agents_at_goal: outcome.at_goal,
        })
    }

    /// Discard all agents and restart the active scenario.
    ///
    /// The grid is reinitialized and fresh agents are spawned into it;
    /// the marker field is kept (claims cleared) rather than rebuilt.
    ///
    /// # Errors
    ///
    /// Returns a [`GridError`] if the grid cannot be rebuilt; the sizes
    /// were validated at construction, so this indicates a bug.
    pub fn reset(&mut self) -> Result<(), GridError> {
        let plane_size = self.grid.plane_size();
        self.grid = SpatialGrid::new(self.grid.cell_size(), plane_size)?;
        self.agents = scenario::spawn_agents(self.scenario, plane_size, &mut self.rng);
        self.populate_grid()?;
        for marker in &mut self.markers {
            marker.release();
        }
        self.tick = 0;

        info!(scenario = %self.scenario, agents = self.agents.len(), "Simulation reset");
        Ok(())
    }

    /// Clear every marker claim and every agent's claim list.
    ///
    /// Idempotent: a second call on already-clean state changes nothing.
    /// Runs automatically at the start of each tick, so readers between
    /// ticks always see the claims and colors of the most recent
    /// assignment pass. A freshly constructed simulation has not run
    /// that pass yet: before the first tick every marker is unowned and
    /// neutral, the same state this method produces.
    pub fn reset_ownership(&mut self) {
        for agent in &mut self.agents {
            agent.clear_markers();
        }
        for marker in &mut self.markers {
            marker.release();
        }
    }

    /// The agents, indexed by their creation-order ID. Read-only.
    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    /// The markers, indexed by their creation-order ID. Read-only.
    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    /// The spatial grid. Read-only.
    pub const fn grid(&self) -> &SpatialGrid {
        &self.grid
    }

    /// The active scenario.
    pub const fn scenario(&self) -> Scenario {
        self.scenario
    }

    /// Completed tick count.
    pub const fn tick_count(&self) -> u64 {
        self.tick
    }

    /// Insert every agent into the cell containing its position.
    fn populate_grid(&mut self) -> Result<(), GridError> {
        for agent in &self.agents {
            let cell = self.grid.cell_of_point(agent.position.x, agent.position.z);
            self.grid.insert(agent.id, cell)?;
        }
        Ok(())
    }

    /// Phase 1: assign every unowned marker to its nearest eligible agent.
    ///
    /// Eligibility is sampled from the 2x2 cell block around the marker's
    /// rounded grid intersection; out-of-range sample cells contribute
    /// nothing. The nearest agent by full 3-D distance wins, with exact
    /// ties going to the first agent encountered. Markers with no
    /// eligible agent stay unowned with the neutral color.
    fn phase_assign_markers(&mut self) -> usize {
        let mut owned = 0_usize;

        for index in 0..self.markers.len() {
            let Some(marker) = self.markers.get(index) else {
                continue;
            };
            // Claims granted within this tick are final until the reset.
            if marker.is_owned() {
                continue;
            }
            let position = marker.position;

            let nearest = self.grid.nearest_cell(position.x, position.z);
            let mut winner: Option<(f32, AgentId)> = None;
            for cell in nearest.sample_block() {
                for agent_id in self.grid.agents_in(cell) {
                    let Some(agent) = self.agents.get(agent_id.index()) else {
                        continue;
                    };
                    let distance = position.distance(agent.position);
                    // Strict less-than keeps the first agent on exact ties;
                    // duplicate sightings across cells are harmless.
                    if winner.is_none_or(|(best, _)| distance < best) {
                        winner = Some((distance, agent_id));
                    }
                }
            }

            if let Some((_, agent_id)) = winner {
                if let Some(agent) = self.agents.get_mut(agent_id.index()) {
                    let color = agent.color;
                    agent.claim_marker(MarkerId::new(index as u32));
                    if let Some(marker) = self.markers.get_mut(index) {
                        marker.claim_for(agent_id, color);
                    }
                    owned += 1;
                }
            } else if let Some(marker) = self.markers.get_mut(index) {
                marker.release();
            }
        }

        owned
    }

    /// Phase 2: steer and move every agent not yet at its goal.
    ///
    /// Grid membership is maintained lazily: the authoritative cell is
    /// re-derived once per agent, after the full position update
    /// including any stuck-fallback nudge, and the agent is re-bucketed
    /// only if the cell changed.
    fn phase_move_agents(&mut self) -> Result<MoveOutcome, TickError> {
        let mut moved = 0_u32;
        let mut at_goal = 0_u32;

        for index in 0..self.agents.len() {
            let Some(agent) = self.agents.get(index) else {
                continue;
            };

            if agent.distance_to_goal() <= steering::GOAL_ARRIVAL_DISTANCE {
                at_goal += 1;
                continue;
            }

            let agent_id = agent.id;
            let old_cell = self.grid.cell_of_point(agent.position.x, agent.position.z);

            let marker_positions: Vec<Vec3> = agent
                .owned_markers
                .iter()
                .filter_map(|id| self.markers.get(id.index()))
                .map(|marker| marker.position)
                .collect();

            let velocity =
                steering::steering_velocity(agent.position, agent.goal, &marker_positions);
            let new_position = agent.position + velocity * steering::STEP_SCALE;

            if let Some(agent) = self.agents.get_mut(index) {
                agent.position = new_position;
            }

            let new_cell = self.grid.cell_of_point(new_position.x, new_position.z);
            if new_cell != old_cell {
                self.grid.remove(agent_id, old_cell)?;
                self.grid.insert(agent_id, new_cell)?;
            }
            moved += 1;
        }

        Ok(MoveOutcome { moved, at_goal })
    }
}
