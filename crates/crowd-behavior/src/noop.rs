//! Minimal components: a strategy that leaves goals alone and an operation
//! that applies the preferred velocity unmodified.

use std::collections::BTreeSet;

use crowd_core::{AgentId, ComponentId};

use crate::component::{component_ids, OperationComponent, StrategyComponent};
use crate::context::TickContext;

// ── NoopStrategy ──────────────────────────────────────────────────────────────

/// A strategy that never changes anything — goals are owned entirely by the
/// host through `set_agent_goal`.  The default strategy layer.
#[derive(Default)]
pub struct NoopStrategy {
    agents: BTreeSet<AgentId>,
}

impl NoopStrategy {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StrategyComponent for NoopStrategy {
    fn id(&self) -> ComponentId {
        component_ids::NOOP_STRATEGY
    }

    fn add_agent(&mut self, agent: AgentId) {
        self.agents.insert(agent);
    }

    fn remove_agent(&mut self, agent: AgentId) -> bool {
        self.agents.remove(&agent)
    }

    fn update(&mut self, _ctx: &mut TickContext<'_>, _time_step: f32) {}
}

// ── PassthroughOp ─────────────────────────────────────────────────────────────

/// An operation that performs no avoidance: `vel_new` becomes the preferred
/// velocity, clamped to the agent's maximum speed.  Useful for kinematics
/// tests and sparse scenes.
#[derive(Default)]
pub struct PassthroughOp {
    agents: BTreeSet<AgentId>,
}

impl PassthroughOp {
    pub fn new() -> Self {
        Self::default()
    }
}

impl OperationComponent for PassthroughOp {
    fn id(&self) -> ComponentId {
        component_ids::PASSTHROUGH
    }

    fn add_agent(&mut self, agent: AgentId) {
        self.agents.insert(agent);
    }

    fn remove_agent(&mut self, agent: AgentId) -> bool {
        self.agents.remove(&agent)
    }

    fn update(&mut self, ctx: &mut TickContext<'_>, _time_step: f32) {
        for &id in &self.agents {
            if let Some(info) = ctx.nav.agent_mut(id) {
                info.vel_new = info.pref_velocity.preferred().clamp_length(info.max_speed);
            }
        }
    }
}
