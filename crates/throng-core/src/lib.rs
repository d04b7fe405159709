//! Tick cycle and steering for the Throng crowd simulation.
//!
//! This crate is the orchestrator: it owns the spatial grid, the agent
//! collection, and the marker collection, and advances them one fixed
//! step at a time. Each tick runs marker-ownership assignment over the
//! grid neighborhood, per-agent velocity computation and integration,
//! lazy grid-membership maintenance, and the full ownership reset that
//! keeps markers freely recontested.
//!
//! # Modules
//!
//! - [`config`] -- Typed configuration with YAML loading and defaults.
//! - [`scenario`] -- Scenario agent spawning and marker scattering.
//! - [`steering`] -- The marker-weight formula and velocity aggregation.
//! - [`tick`] -- The [`Simulation`] state and the tick cycle itself.
//!
//! [`Simulation`]: tick::Simulation

pub mod config;
pub mod scenario;
pub mod steering;
pub mod tick;

// Re-export primary types at crate root.
pub use config::{ConfigError, SimulationConfig};
pub use tick::{Simulation, TickError, TickSummary};
