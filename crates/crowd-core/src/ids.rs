//! Strongly typed, zero-cost identifier wrappers.
//!
//! All IDs are `Copy + Ord + Hash` so they can be used as map keys and sorted
//! collection elements without ceremony.  The inner integer is `pub` to allow
//! direct indexing into table `Vec`s via `id.0 as usize`, but callers should
//! prefer the `.index()` helpers for clarity.

use std::fmt;

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Sentinel meaning "no valid ID" — equivalent to the type's MAX.
            pub const INVALID: $name = $name(<$inner>::MAX);

            /// Cast to `usize` for direct use as a `Vec` index.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl Default for $name {
            /// Returns the `INVALID` sentinel so uninitialized IDs are visibly invalid.
            #[inline(always)]
            fn default() -> Self {
                Self::INVALID
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl From<$name> for usize {
            #[inline(always)]
            fn from(id: $name) -> usize {
                id.0 as usize
            }
        }

        impl TryFrom<usize> for $name {
            type Error = std::num::TryFromIntError;
            fn try_from(n: usize) -> Result<$name, Self::Error> {
                <$inner>::try_from(n).map($name)
            }
        }
    };
}

typed_id! {
    /// Dense handle for one agent, stable for the agent's lifetime.
    /// Agents are never renumbered; deletion retires the id.
    pub struct AgentId(u32);
}

typed_id! {
    /// Index of a navmesh node (convex polygon).  `NodeId::INVALID` is the
    /// `NO_NODE` sentinel returned by failed point-location queries.
    pub struct NodeId(u32);
}

typed_id! {
    /// Index of a portal edge between two adjacent navmesh nodes.
    pub struct EdgeId(u32);
}

typed_id! {
    /// Index into the navmesh's shared vertex table.
    pub struct VertexId(u32);
}

typed_id! {
    /// Index of a static obstacle segment owned by the navmesh.
    pub struct ObstacleId(u32);
}

typed_id! {
    /// Identity of one goal assignment.  A fresh `GoalId` is allocated every
    /// time a goal is set so paths can detect the change.
    pub struct GoalId(u32);
}

typed_id! {
    /// Stable identifier of a behaviour component (strategy, tactic or
    /// operation).  `u16` keeps agent records compact.
    pub struct ComponentId(u16);
}
