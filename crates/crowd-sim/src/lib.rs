//! `crowd-sim` — the simulator scheduler and embedding API.
//!
//! # The eight-phase tick
//!
//! ```text
//! do_step():
//!   ① Strategy    — each strategy component updates its agents' goals.
//!   ② Tactic      — each tactic component sets preferred velocities
//!                   (path advancement on the mesh happens here).
//!   ③ Boundary    — deferred operation-component switches and pending
//!                   removals are applied, so within one tick an agent is
//!                   operated on by exactly one component.
//!   ④ Operation   — each operation component computes `vel_new` from the
//!                   preferred velocity and the *previous* tick's neighbours.
//!   ⑤ Integrate   — velocities blend under the acceleration limit,
//!                   positions advance, orientations turn under the
//!                   angular-velocity limit.
//!   ⑥ Neighbours  — the spatial index is rebuilt from new positions.
//!   ⑦ Relocalise  — every agent's mesh node is re-resolved
//!                   (Stay → Neighbours → Blind).
//!   ⑧ Record      — the full snapshot is appended to the recording and
//!                   published to observers.
//! ```
//!
//! The loop is single-threaded and deterministic: agents are visited in
//! ascending id order everywhere, so a fixed scenario reproduces bit-for-bit.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use crowd_behavior::{component_ids, OrcaComponent};
//! use crowd_core::{GoalShape, Vec2};
//! use crowd_sim::SimulatorBuilder;
//!
//! let mut sim = SimulatorBuilder::new()
//!     .with_nav_mesh("meshes/square.mesh")
//!     .with_op(OrcaComponent::new())
//!     .build()?;
//! let agent = sim.add_agent(
//!     Vec2::new(-5.0, 20.0),
//!     component_ids::ORCA,
//!     component_ids::NAVMESH_TACTIC,
//!     component_ids::NOOP_STRATEGY,
//! )?;
//! sim.set_agent_goal(agent, GoalShape::Point(Vec2::new(0.0, 20.0)));
//! while sim.do_step() { /* render from sim.recording() */ }
//! ```

pub mod builder;
pub mod error;
pub mod observer;
pub mod recording;
pub mod sim;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use builder::SimulatorBuilder;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver};
pub use recording::{AgentSnapshot, Recording, TickSnapshot};
pub use sim::{AgentInfo, Simulator};
