//! `crowd-nav` — per-agent spatial state and the navigation system.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                |
//! |---------------|---------------------------------------------------------|
//! | [`agent`]     | `AgentSpatialInfo`, `PrefVelocity`                      |
//! | [`neighbors`] | `NeighborIndex` — uniform-grid fixed-radius queries     |
//! | [`system`]    | `NavSystem` — agent store, integration, relocalisation  |
//! | [`error`]     | `NavError`, `NavResult<T>`                              |
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                   |
//! |------------|----------------------------------------------------------|
//! | `parallel` | Runs per-agent neighbour queries on Rayon's thread pool. |
//!
//! Determinism holds with or without `parallel`: neighbour output is
//! collected in agent-index order either way.

pub mod agent;
pub mod error;
pub mod neighbors;
pub mod system;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use agent::{AgentSpatialInfo, PrefVelocity};
pub use error::{NavError, NavResult};
pub use neighbors::NeighborIndex;
pub use system::NavSystem;
