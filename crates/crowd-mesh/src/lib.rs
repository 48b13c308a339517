//! `crowd-mesh` — navigation-mesh model and portal path planning.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                  |
//! |---------------|-----------------------------------------------------------|
//! | [`mesh`]      | `NavMesh`, `NavMeshNode`, `NavMeshEdge`, point location   |
//! | [`obstacle`]  | `Obstacle` — static segments in closed loops              |
//! | [`builder`]   | `NavMeshBuilder` — programmatic construction              |
//! | [`ascii`]     | Line-oriented mesh file loader                            |
//! | [`localizer`] | `NavMeshLocalizer` — agent→node tracking, off-mesh snap   |
//! | [`planner`]   | `PathPlanner` — portal A\* with a memoised route cache    |
//! | [`route`]     | `PortalRoute` — immutable oriented portal sequences       |
//! | [`path`]      | `PortalPath` — per-agent funnel traversal state           |
//! | [`error`]     | `MeshError`, `MeshResult<T>`                              |
//!
//! # Ownership
//!
//! The `NavMesh` is immutable after load (tombstoning aside) and shared via
//! `Arc`.  The `NavMeshLocalizer` is its mutable companion: it owns the
//! agent→node map and the `PathPlanner`, whose cached `PortalRoute`s live
//! until mesh teardown and are handed to agents as `Arc` clones.

pub mod ascii;
pub mod builder;
pub mod error;
pub mod localizer;
pub mod mesh;
pub mod obstacle;
pub mod path;
pub mod planner;
pub mod route;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use builder::NavMeshBuilder;
pub use error::{MeshError, MeshResult};
pub use localizer::NavMeshLocalizer;
pub use mesh::{NavMesh, NavMeshEdge, NavMeshNode};
pub use obstacle::Obstacle;
pub use path::PortalPath;
pub use planner::PathPlanner;
pub use route::{Portal, PortalRoute};
