//! `crowd-behavior` — the three behaviour layers and their bundled
//! components.
//!
//! # Crate layout
//!
//! | Module            | Contents                                               |
//! |-------------------|--------------------------------------------------------|
//! | [`component`]     | `StrategyComponent` / `TacticComponent` /              |
//! |                   | `OperationComponent` traits, well-known component ids  |
//! | [`context`]       | `TickContext<'a>` — mutable tick state for components  |
//! | [`navmesh_tactic`]| `NavMeshTactic` — portal-path following                |
//! | [`orca`]          | `OrcaComponent` — reciprocal half-plane avoidance      |
//! | [`noop`]          | `NoopStrategy`, `PassthroughOp`                        |
//!
//! # The three layers
//!
//! Every agent is driven by one component per layer, all sharing the same
//! contract (`id` / `add_agent` / `remove_agent` / `update`):
//!
//! 1. **Strategy** — updates goals and high-level intent.
//! 2. **Tactic** — turns the goal into a *preferred velocity* by consulting
//!    the planner and path state on the mesh.
//! 3. **Operation** — refines the preferred velocity into the actual
//!    velocity candidate (`vel_new`) using the previous tick's neighbours.

pub mod component;
pub mod context;
pub mod navmesh_tactic;
pub mod noop;
pub mod orca;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use component::{component_ids, OperationComponent, StrategyComponent, TacticComponent};
pub use context::TickContext;
pub use navmesh_tactic::NavMeshTactic;
pub use noop::{NoopStrategy, PassthroughOp};
pub use orca::OrcaComponent;
