//! Configuration loading and typed config structures for the simulation.
//!
//! The canonical configuration lives in `throng-config.yaml` at the
//! project root. This module defines strongly-typed structs that mirror
//! the YAML structure and provides a loader that reads the file. Every
//! field has a default, so an absent or empty file yields a runnable
//! configuration: the 100-unit plane in 10-unit cells, 2000 markers, and
//! the circle scenario.

use std::path::Path;

use serde::Deserialize;
use throng_types::Scenario;
use tracing::warn;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level simulation configuration.
///
/// Mirrors the structure of `throng-config.yaml`. All fields have
/// defaults matching the standard board setup.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SimulationConfig {
    /// World-level settings (name, seed, loop pacing).
    #[serde(default)]
    pub world: WorldConfig,

    /// Plane partitioning settings.
    #[serde(default)]
    pub plane: PlaneConfig,

    /// Marker field settings.
    #[serde(default)]
    pub markers: MarkerConfig,

    /// Scenario label. Unknown labels fall back to the default scenario.
    #[serde(default = "default_scenario_label")]
    pub scenario: String,

    /// Run boundary settings.
    #[serde(default)]
    pub simulation: BoundsConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl SimulationConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = serde_yml::from_str(&contents)?;
        Ok(config)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yml::from_str(yaml)?;
        Ok(config)
    }

    /// Resolve the scenario label to a typed [`Scenario`].
    ///
    /// Unknown labels fall back to the default scenario with a warning;
    /// the label set is small and a deliberate default exists, so this is
    /// not an error.
    pub fn resolved_scenario(&self) -> Scenario {
        Scenario::from_label(&self.scenario).unwrap_or_else(|| {
            let fallback = Scenario::default();
            warn!(
                label = self.scenario,
                fallback = fallback.label(),
                "Unknown scenario label, using default"
            );
            fallback
        })
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            world: WorldConfig::default(),
            plane: PlaneConfig::default(),
            markers: MarkerConfig::default(),
            scenario: default_scenario_label(),
            simulation: BoundsConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

/// World-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WorldConfig {
    /// Human-readable simulation name.
    #[serde(default = "default_world_name")]
    pub name: String,

    /// Random seed for marker scattering and agent coloring.
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Real-time milliseconds per tick in the hosting loop.
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            name: default_world_name(),
            seed: default_seed(),
            tick_interval_ms: default_tick_interval_ms(),
        }
    }
}

/// Plane partitioning configuration.
///
/// The plane is a square of `size` units centered at the origin, split
/// into `cell_size` cells. `cell_size` must divide `size` evenly; that is
/// validated at grid construction, not here.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PlaneConfig {
    /// Plane extent in world units.
    #[serde(default = "default_plane_size")]
    pub size: f32,

    /// Cell extent in world units.
    #[serde(default = "default_cell_size")]
    pub cell_size: f32,
}

impl Default for PlaneConfig {
    fn default() -> Self {
        Self {
            size: default_plane_size(),
            cell_size: default_cell_size(),
        }
    }
}

/// Marker field configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MarkerConfig {
    /// Number of markers scattered uniformly across the plane at setup.
    #[serde(default = "default_marker_count")]
    pub count: u32,

    /// Constant display height of markers (distinct from agent height).
    #[serde(default = "default_marker_height")]
    pub height: f32,
}

impl Default for MarkerConfig {
    fn default() -> Self {
        Self {
            count: default_marker_count(),
            height: default_marker_height(),
        }
    }
}

/// Run boundary configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BoundsConfig {
    /// Maximum number of ticks before the run ends (0 = unlimited).
    #[serde(default = "default_max_ticks")]
    pub max_ticks: u64,

    /// Ticks between progress log lines (0 = no progress logging).
    #[serde(default = "default_progress_log_interval")]
    pub progress_log_interval: u64,
}

impl Default for BoundsConfig {
    fn default() -> Self {
        Self {
            max_ticks: default_max_ticks(),
            progress_log_interval: default_progress_log_interval(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

// ---------------------------------------------------------------------------
// Default value functions (serde default requires named functions)
// ---------------------------------------------------------------------------

fn default_world_name() -> String {
    "Throng".to_owned()
}

const fn default_seed() -> u64 {
    42
}

const fn default_tick_interval_ms() -> u64 {
    16
}

const fn default_plane_size() -> f32 {
    100.0
}

const fn default_cell_size() -> f32 {
    10.0
}

const fn default_marker_count() -> u32 {
    2000
}

const fn default_marker_height() -> f32 {
    0.5
}

const fn default_max_ticks() -> u64 {
    1000
}

const fn default_progress_log_interval() -> u64 {
    60
}

fn default_log_level() -> String {
    "info".to_owned()
}

fn default_scenario_label() -> String {
    Scenario::default().label().to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = SimulationConfig::default();
        assert_eq!(config.world.seed, 42);
        assert!((config.plane.size - 100.0).abs() < f32::EPSILON);
        assert!((config.plane.cell_size - 10.0).abs() < f32::EPSILON);
        assert_eq!(config.markers.count, 2000);
        assert_eq!(config.resolved_scenario(), Scenario::Circle);
    }

    #[test]
    fn parse_full_yaml() {
        let yaml = r#"
world:
  name: "Corridor Test"
  seed: 123
  tick_interval_ms: 33

plane:
  size: 200.0
  cell_size: 20.0

markers:
  count: 500
  height: 0.25

scenario: "top-down"

simulation:
  max_ticks: 250
  progress_log_interval: 10

logging:
  level: "debug"
"#;

        let config = SimulationConfig::parse(yaml);
        assert!(config.is_ok());
        let config = config.unwrap_or_default();

        assert_eq!(config.world.name, "Corridor Test");
        assert_eq!(config.world.seed, 123);
        assert!((config.plane.size - 200.0).abs() < f32::EPSILON);
        assert_eq!(config.markers.count, 500);
        assert_eq!(config.resolved_scenario(), Scenario::TopDown);
        assert_eq!(config.simulation.max_ticks, 250);
        assert_eq!(config.simulation.progress_log_interval, 10);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn parse_minimal_yaml() {
        let yaml = "world:\n  seed: 7\n";
        let config = SimulationConfig::parse(yaml);
        assert!(config.is_ok());
        let config = config.unwrap_or_default();

        // Seed is overridden.
        assert_eq!(config.world.seed, 7);
        // Everything else uses defaults.
        assert_eq!(config.markers.count, 2000);
        assert_eq!(config.simulation.progress_log_interval, 60);
        assert_eq!(config.resolved_scenario(), Scenario::Circle);
    }

    #[test]
    fn parse_empty_yaml_uses_defaults() {
        let config = SimulationConfig::parse("");
        assert!(config.is_ok());
    }

    #[test]
    fn unknown_scenario_label_falls_back_to_circle() {
        let yaml = "scenario: \"spiral\"\n";
        let config = SimulationConfig::parse(yaml).unwrap_or_default();
        assert_eq!(config.resolved_scenario(), Scenario::Circle);
    }
}
