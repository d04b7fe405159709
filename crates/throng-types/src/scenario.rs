//! Initial-layout scenario labels.
//!
//! A scenario names the starting arrangement of agents and their goals.
//! The set of valid labels is deliberately small and a default exists, so
//! unknown labels are resolved by the caller to [`Scenario::Circle`]
//! rather than treated as errors.

use serde::{Deserialize, Serialize};

/// The starting arrangement of agents on the plane.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Scenario {
    /// Two opposing rows of 10 agents at the plane's z extremes, each
    /// agent goaled to its mirror position across the plane.
    TopDown,

    /// 12 agents evenly spaced on a circle of radius 30, each goaled to
    /// its antipodal point. This is the default.
    #[default]
    Circle,
}

impl Scenario {
    /// Parse a scenario label.
    ///
    /// Returns `None` for unknown labels; callers fall back to the
    /// default scenario (and typically log the substitution).
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "top-down" => Some(Self::TopDown),
            "circle" => Some(Self::Circle),
            _ => None,
        }
    }

    /// The canonical label for this scenario.
    pub const fn label(self) -> &'static str {
        match self {
            Self::TopDown => "top-down",
            Self::Circle => "circle",
        }
    }
}

impl core::fmt::Display for Scenario {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_labels_parse() {
        assert_eq!(Scenario::from_label("top-down"), Some(Scenario::TopDown));
        assert_eq!(Scenario::from_label("circle"), Some(Scenario::Circle));
    }

    #[test]
    fn unknown_label_is_none() {
        assert_eq!(Scenario::from_label("spiral"), None);
        assert_eq!(Scenario::from_label(""), None);
    }

    #[test]
    fn default_is_circle() {
        assert_eq!(Scenario::default(), Scenario::Circle);
    }

    #[test]
    fn label_roundtrip() {
        for scenario in [Scenario::TopDown, Scenario::Circle] {
            assert_eq!(Scenario::from_label(scenario.label()), Some(scenario));
        }
    }
}
