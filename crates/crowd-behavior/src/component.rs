//! The behaviour-component contract, identical across the three layers.
//!
//! Components never hold references into the simulator — membership is a set
//! of `AgentId`s and all state access goes through the [`TickContext`]
//! passed to `update`.  A component that has been dropped from the registry
//! is therefore just an id that no longer resolves; nothing dangles.

use crowd_core::{AgentId, ComponentId};

use crate::context::TickContext;

/// Well-known ids of the components bundled with the engine.  Hosts register
/// their own components with ids outside this range.
pub mod component_ids {
    use crowd_core::ComponentId;

    /// "No component assigned" sentinel.
    pub const NO_COMPONENT: ComponentId = ComponentId::INVALID;

    /// [`NoopStrategy`](crate::NoopStrategy)
    pub const NOOP_STRATEGY: ComponentId = ComponentId(0);

    /// [`NavMeshTactic`](crate::NavMeshTactic)
    pub const NAVMESH_TACTIC: ComponentId = ComponentId(1);

    /// [`PassthroughOp`](crate::PassthroughOp)
    pub const PASSTHROUGH: ComponentId = ComponentId(2);

    /// [`OrcaComponent`](crate::OrcaComponent)
    pub const ORCA: ComponentId = ComponentId(3);
}

macro_rules! layer_trait {
    ($(#[$attr:meta])* $name:ident) => {
        $(#[$attr])*
        pub trait $name {
            /// Stable identifier of this component.
            fn id(&self) -> ComponentId;

            /// Take over responsibility for `agent`.
            fn add_agent(&mut self, agent: AgentId);

            /// Drop `agent` from this component.  Returns `false` when the
            /// agent was not a member.
            fn remove_agent(&mut self, agent: AgentId) -> bool;

            /// Run this component's phase for one tick of `time_step`
            /// seconds, touching only the agents added to it.
            fn update(&mut self, ctx: &mut TickContext<'_>, time_step: f32);
        }
    };
}

layer_trait! {
    /// Layer 1: updates goals and high-level intent.  Runs first each tick;
    /// observes the state left by the previous full tick.
    StrategyComponent
}

layer_trait! {
    /// Layer 2: sets each member agent's `pref_velocity` from its goal,
    /// typically by following a planned path across the mesh.
    TacticComponent
}

layer_trait! {
    /// Layer 3: refines `pref_velocity` into the velocity candidate
    /// `vel_new`, using the *previous* tick's neighbour sets for local
    /// avoidance.
    OperationComponent
}
