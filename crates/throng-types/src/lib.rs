//! Shared type definitions for the Throng crowd simulation.
//!
//! This crate is the single source of truth for the leaf types used across
//! the Throng workspace: entity identifiers, display colors, scenario
//! labels, and the agent/marker entity structs themselves.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe integer wrappers for entity identifiers
//! - [`color`] -- Display colors with a neutral "unowned" sentinel
//! - [`scenario`] -- Initial-layout scenario labels
//! - [`entities`] -- The [`Agent`] and [`Marker`] entity structs
//!
//! Positions are [`glam::Vec3`] points in world space: `x`/`z` span the
//! simulation plane and `y` is a constant per-entity display height that
//! plays no role in steering.

pub mod color;
pub mod entities;
pub mod ids;
pub mod scenario;

// Re-export all public types at crate root for convenience.
pub use color::Color;
pub use entities::{Agent, Marker};
pub use ids::{AgentId, MarkerId};
pub use scenario::Scenario;
