//! Engine binary for the Throng crowd simulation.
//!
//! This is the main entry point that wires together configuration, the
//! simulation state, and the fixed-step run loop. It loads configuration,
//! constructs the grid, agents, and marker field, and ticks the
//! simulation until a termination condition is met.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `throng-config.yaml`
//! 2. Initialize structured logging (tracing), level from config
//! 3. Construct the simulation (grid, scenario agents, marker field)
//! 4. Run the tick loop until arrival or the tick bound
//! 5. Log the result

mod error;

use std::path::Path;
use std::time::Duration;

use throng_core::config::{BoundsConfig, SimulationConfig};
use throng_core::{Simulation, TickSummary};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::error::EngineError;

/// Why the run loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EndReason {
    /// Every agent reached its goal.
    AllAgentsArrived,
    /// The configured tick bound was hit first.
    MaxTicksReached,
}

/// Application entry point for the engine.
///
/// # Errors
///
/// Returns an error if configuration loading, simulation construction,
/// or a tick fails.
fn main() -> Result<(), EngineError> {
    // 1. Load configuration. Happens before logging init so the
    //    configured level can seed the filter; `RUST_LOG` still wins.
    let (config, config_found) = load_config()?;

    // 2. Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .with_target(true)
        .init();

    info!("throng-engine starting");
    if !config_found {
        info!("Config file not found, using defaults");
    }
    info!(
        world_name = config.world.name,
        seed = config.world.seed,
        tick_interval_ms = config.world.tick_interval_ms,
        scenario = config.scenario,
        max_ticks = config.simulation.max_ticks,
        "Configuration loaded"
    );

    // 3. Construct the simulation.
    let mut sim = Simulation::new(&config)?;

    // 4. Run the tick loop.
    let tick_interval = Duration::from_millis(config.world.tick_interval_ms);
    let (end_reason, last) = run_loop(&mut sim, tick_interval, &config.simulation)?;

    // 5. Log the result.
    info!(
        end_reason = ?end_reason,
        total_ticks = last.tick,
        agents_at_goal = last.agents_at_goal,
        markers_owned = last.markers_owned,
        "throng-engine shutdown complete"
    );

    Ok(())
}

/// Tick the simulation until every agent arrives or the bound is hit.
///
/// A `max_ticks` of 0 means unlimited: the loop runs until arrival.
/// A `progress_log_interval` of 0 disables progress lines. Pacing
/// sleeps the full interval after each tick rather than subtracting
/// tick duration; the step is fixed, not time-delta-based, so drift
/// only stretches wall time.
fn run_loop(
    sim: &mut Simulation,
    tick_interval: Duration,
    bounds: &BoundsConfig,
) -> Result<(EndReason, TickSummary), EngineError> {
    let agent_count = sim.agents().len() as u32;
    let max_ticks = bounds.max_ticks;
    let log_interval = bounds.progress_log_interval;

    loop {
        let summary = sim.tick()?;

        if log_interval > 0 && summary.tick % log_interval == 0 {
            info!(
                tick = summary.tick,
                markers_owned = summary.markers_owned,
                agents_moved = summary.agents_moved,
                agents_at_goal = summary.agents_at_goal,
                "Progress"
            );
        }

        if summary.agents_at_goal == agent_count {
            return Ok((EndReason::AllAgentsArrived, summary));
        }
        if max_ticks > 0 && summary.tick >= max_ticks {
            return Ok((EndReason::MaxTicksReached, summary));
        }

        if !tick_interval.is_zero() {
            std::thread::sleep(tick_interval);
        }
    }
}

/// Load the simulation configuration from `throng-config.yaml`.
///
/// Looks for the config file relative to the current working directory.
/// The second element reports whether the file was present; logging is
/// not initialized yet when this runs, so the caller logs the outcome.
fn load_config() -> Result<(SimulationConfig, bool), EngineError> {
    let config_path = Path::new("throng-config.yaml");
    if config_path.exists() {
        let config = SimulationConfig::from_file(config_path)?;
        Ok((config, true))
    } else {
        Ok((SimulationConfig::default(), false))
    }
}
