//! Display colors for agents and markers.
//!
//! Colors are opaque display attributes: the simulation never branches on
//! them, it only assigns them. Each agent receives a random color at
//! creation; a marker shows its owning agent's color for the tick it is
//! claimed and the [`Color::NEUTRAL`] sentinel otherwise.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// An 8-bit RGB display color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Color {
    /// The neutral sentinel shown by unowned markers.
    pub const NEUTRAL: Self = Self { r: 0, g: 0, b: 0 };

    /// Create a color from explicit channel values.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Draw a uniformly random color from the given generator.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            r: rng.random(),
            g: rng.random(),
            b: rng.random(),
        }
    }

    /// Whether this color is the unowned-marker sentinel.
    pub fn is_neutral(self) -> bool {
        self == Self::NEUTRAL
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

impl core::fmt::Display for Color {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}
