//! Type-safe identifier wrappers around creation-order indices.
//!
//! Every entity in the simulation has a strongly-typed ID to prevent
//! accidental mixing of identifiers at compile time. IDs are plain `u32`
//! creation-order indices: entities are created once at setup, in order,
//! and never destroyed, so the index doubles as a stable identity and as
//! a direct offset into the owning collection.
//!
//! A marker's back-reference to the agent that claimed it this tick is an
//! [`AgentId`], never an owning pointer -- the reference is cleared every
//! tick regardless of what happens to the agent.

use serde::{Deserialize, Serialize};

/// Generates a newtype wrapper around `u32` with standard derives.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub struct $name(pub u32);

        impl $name {
            /// Create an identifier from a creation-order index.
            pub const fn new(index: u32) -> Self {
                Self(index)
            }

            /// Return the identifier as a collection index.
            pub const fn index(self) -> usize {
                self.0 as usize
            }

            /// Return the inner `u32` value.
            pub const fn into_inner(self) -> u32 {
                self.0
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<u32> for $name {
            fn from(id: u32) -> Self {
                Self(id)
            }
        }

        impl From<$name> for u32 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_id! {
    /// Unique identifier for an agent in the simulation.
    AgentId
}

define_id! {
    /// Unique identifier for a marker (static steering sample point).
    MarkerId
}
