//! `crowd-core` — foundational types for the `crowd_rs` simulation engine.
//!
//! This crate is a dependency of every other `crowd-*` crate.  It
//! intentionally has no `crowd-*` dependencies and minimal external ones
//! (only `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module    | Contents                                              |
//! |-----------|-------------------------------------------------------|
//! | [`ids`]   | `AgentId`, `NodeId`, `EdgeId`, `ComponentId`, …       |
//! | [`math`]  | `Vec2` planar algebra, `Aabb`                         |
//! | [`time`]  | `SimClock`, `SimConfig`                               |
//! | [`goal`]  | `Goal`, `GoalShape` (point / disk / boxes)            |
//! | [`error`] | `CrowdError`, `CrowdResult`                           |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                  |
//! |---------|---------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.     |

pub mod error;
pub mod goal;
pub mod ids;
pub mod math;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{CrowdError, CrowdResult};
pub use goal::{Goal, GoalShape};
pub use ids::{AgentId, ComponentId, EdgeId, GoalId, NodeId, ObstacleId, VertexId};
pub use math::{Aabb, Vec2};
pub use time::{SimClock, SimConfig};
