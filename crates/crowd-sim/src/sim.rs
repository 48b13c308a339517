//! The `Simulator` struct and its tick loop.

use std::collections::BTreeMap;

use crowd_behavior::{
    component_ids, OperationComponent, StrategyComponent, TacticComponent, TickContext,
};
use crowd_core::{AgentId, ComponentId, Goal, GoalId, GoalShape, SimClock, SimConfig, Vec2};
use crowd_nav::{AgentSpatialInfo, NavSystem};

use crate::error::{SimError, SimResult};
use crate::observer::SimObserver;
use crate::recording::{AgentSnapshot, Recording, TickSnapshot};

// ── Agent bookkeeping ─────────────────────────────────────────────────────────

/// Which component drives an agent in each layer.
/// `ComponentId::INVALID` (`NO_COMPONENT`) means the layer skips the agent.
#[derive(Clone, Copy, Debug)]
struct AgentRecord {
    op: ComponentId,
    tactic: ComponentId,
    strategy: ComponentId,
}

/// Public per-agent row filled by [`Simulator::agents_info`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AgentInfo {
    pub id: AgentId,
    pub pos: Vec2,
    pub vel: Vec2,
    pub orient: Vec2,
    pub radius: f32,
    pub op: ComponentId,
    pub tactic: ComponentId,
    pub strategy: ComponentId,
    /// Centroid of the agent's goal; `Vec2::ZERO` when no goal is assigned.
    pub goal_centroid: Vec2,
}

impl Default for AgentInfo {
    fn default() -> Self {
        Self {
            id: AgentId::INVALID,
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            orient: Vec2::UNIT_X,
            radius: 0.0,
            op: ComponentId::INVALID,
            tactic: ComponentId::INVALID,
            strategy: ComponentId::INVALID,
            goal_centroid: Vec2::ZERO,
        }
    }
}

// ── Simulator ─────────────────────────────────────────────────────────────────

/// The crowd simulator: agent registry, behaviour component registries, the
/// navigation system and the monotonic clock.
///
/// Create via [`SimulatorBuilder`][crate::SimulatorBuilder].  The public API
/// must not be called concurrently with [`do_step`](Simulator::do_step) —
/// `&mut self` enforces this within safe Rust.
impl std::fmt::Debug for Simulator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Simulator")
            .field("config", &self.config)
            .field("clock", &self.clock)
            .field("goals", &self.goals)
            .field("agents", &self.agents)
            .field("op_switches", &self.op_switches)
            .field("pending_removals", &self.pending_removals)
            .field("next_agent", &self.next_agent)
            .field("next_goal", &self.next_goal)
            .finish_non_exhaustive()
    }
}

pub struct Simulator {
    pub(crate) config: SimConfig,
    pub(crate) clock: SimClock,
    pub(crate) nav: NavSystem,
    pub(crate) goals: BTreeMap<AgentId, Goal>,
    agents: BTreeMap<AgentId, AgentRecord>,

    pub(crate) strategies: Vec<Box<dyn StrategyComponent>>,
    pub(crate) tactics: Vec<Box<dyn TacticComponent>>,
    pub(crate) ops: Vec<Box<dyn OperationComponent>>,

    /// Deferred operation-component reassignments, insertion-ordered; a later
    /// request for the same agent overrides the earlier one in place.
    op_switches: Vec<(AgentId, ComponentId)>,
    /// Agents awaiting retirement at the next step-③ boundary.
    pending_removals: Vec<AgentId>,

    next_agent: u32,
    next_goal: u32,
    recording: Recording,
}

impl Simulator {
    pub(crate) fn new(
        config: SimConfig,
        nav: NavSystem,
        strategies: Vec<Box<dyn StrategyComponent>>,
        tactics: Vec<Box<dyn TacticComponent>>,
        ops: Vec<Box<dyn OperationComponent>>,
    ) -> Self {
        Self {
            clock: config.make_clock(),
            config,
            nav,
            goals: BTreeMap::new(),
            agents: BTreeMap::new(),
            strategies,
            tactics,
            ops,
            op_switches: Vec::new(),
            pending_removals: Vec::new(),
            next_agent: 0,
            next_goal: 0,
            recording: Recording::new(),
        }
    }

    // ── Agent management ──────────────────────────────────────────────────

    /// Register an agent with the reference kinematics at `pos`, attached to
    /// the given component per layer (`NO_COMPONENT` skips a layer).
    ///
    /// Off-mesh positions are snapped to the closest node centre.
    pub fn add_agent(
        &mut self,
        pos: Vec2,
        op: ComponentId,
        tactic: ComponentId,
        strategy: ComponentId,
    ) -> SimResult<AgentId> {
        let info = AgentSpatialInfo::new(AgentId::INVALID, pos);
        self.add_agent_with(info, op, tactic, strategy)
    }

    /// Like [`add_agent`](Self::add_agent) but with explicit kinematics.
    /// `info.id` is ignored; the simulator allocates the next dense id.
    pub fn add_agent_with(
        &mut self,
        mut info: AgentSpatialInfo,
        op: ComponentId,
        tactic: ComponentId,
        strategy: ComponentId,
    ) -> SimResult<AgentId> {
        // Validate component ids before any state changes.
        self.check_component(op, LayerKind::Operation)?;
        self.check_component(tactic, LayerKind::Tactic)?;
        self.check_component(strategy, LayerKind::Strategy)?;

        let id = AgentId(self.next_agent);
        self.next_agent += 1;
        info.id = id;
        self.nav.add_agent(info)?;

        if let Some(c) = op_by_id(&mut self.ops, op) {
            c.add_agent(id);
        }
        if let Some(c) = tactic_by_id(&mut self.tactics, tactic) {
            c.add_agent(id);
        }
        if let Some(c) = strategy_by_id(&mut self.strategies, strategy) {
            c.add_agent(id);
        }
        self.agents.insert(id, AgentRecord { op, tactic, strategy });
        Ok(id)
    }

    /// Queue `agent` for retirement at the next step-③ boundary.  Returns
    /// `false` for unknown (or already retired) ids.
    pub fn remove_agent(&mut self, agent: AgentId) -> bool {
        if !self.agents.contains_key(&agent) {
            return false;
        }
        if !self.pending_removals.contains(&agent) {
            self.pending_removals.push(agent);
        }
        true
    }

    pub fn agent_count(&self) -> usize {
        self.agents.len()
    }

    // ── Goals ─────────────────────────────────────────────────────────────

    /// Assign a goal shape to an agent.  Each assignment gets a fresh
    /// `GoalId`, which is what path state uses to detect the change.
    pub fn set_agent_goal(&mut self, agent: AgentId, shape: GoalShape) -> bool {
        if !self.agents.contains_key(&agent) {
            return false;
        }
        let id = GoalId(self.next_goal);
        self.next_goal += 1;
        self.goals.insert(agent, Goal::new(id, shape));
        true
    }

    pub fn agent_goal(&self, agent: AgentId) -> Option<&Goal> {
        self.goals.get(&agent)
    }

    // ── Component assignment ──────────────────────────────────────────────

    /// Request an operation-component switch.  Deferred to the next tick's
    /// step-③ boundary; a later request for the same agent overrides an
    /// earlier one.  `false` when the agent or component is unknown.
    pub fn set_operation_component(&mut self, agent: AgentId, component: ComponentId) -> bool {
        if !self.agents.contains_key(&agent) {
            return false;
        }
        if op_by_id(&mut self.ops, component).is_none() {
            return false;
        }
        if let Some(entry) = self.op_switches.iter_mut().find(|(a, _)| *a == agent) {
            entry.1 = component;
        } else {
            self.op_switches.push((agent, component));
        }
        true
    }

    /// Move an agent to another tactic component, immediately.
    pub fn set_tactic_component(&mut self, agent: AgentId, component: ComponentId) -> bool {
        let Some(record) = self.agents.get_mut(&agent) else {
            return false;
        };
        if tactic_by_id(&mut self.tactics, component).is_none() {
            return false;
        }
        if let Some(old) = tactic_by_id(&mut self.tactics, record.tactic) {
            old.remove_agent(agent);
        }
        if let Some(new) = tactic_by_id(&mut self.tactics, component) {
            new.add_agent(agent);
        }
        record.tactic = component;
        true
    }

    /// Move an agent to another strategy component, immediately.
    pub fn set_strategy_component(&mut self, agent: AgentId, component: ComponentId) -> bool {
        let Some(record) = self.agents.get_mut(&agent) else {
            return false;
        };
        if strategy_by_id(&mut self.strategies, component).is_none() {
            return false;
        }
        if let Some(old) = strategy_by_id(&mut self.strategies, record.strategy) {
            old.remove_agent(agent);
        }
        if let Some(new) = strategy_by_id(&mut self.strategies, component) {
            new.add_agent(agent);
        }
        record.strategy = component;
        true
    }

    // ── Tick loop ─────────────────────────────────────────────────────────

    /// Advance the simulation by one tick.  Always runs to completion.
    pub fn do_step(&mut self) -> bool {
        let dt = self.config.time_step;

        // ① Strategy phase.
        for c in &mut self.strategies {
            let mut ctx = TickContext::new(&mut self.goals, &mut self.nav);
            c.update(&mut ctx, dt);
        }

        // ② Tactic phase.
        for c in &mut self.tactics {
            let mut ctx = TickContext::new(&mut self.goals, &mut self.nav);
            c.update(&mut ctx, dt);
        }

        // ③ Deferred reassignments and removals.
        self.apply_pending();

        // ④ Operation phase (consumes the previous tick's neighbour sets).
        for c in &mut self.ops {
            let mut ctx = TickContext::new(&mut self.goals, &mut self.nav);
            c.update(&mut ctx, dt);
        }

        // ⑤ Integration.
        self.nav.update(dt);

        // ⑥ Neighbour index rebuild.
        self.nav.rebuild_neighbors();

        // ⑦ Mesh relocalisation.
        self.nav.relocalize();

        // ⑧ Recording.
        self.clock.advance();
        let snapshot = self.snapshot();
        self.recording.record(snapshot);

        true
    }

    /// Run `ticks` steps, publishing observer callbacks around each.
    pub fn run<O: SimObserver>(&mut self, ticks: u64, observer: &mut O) {
        for _ in 0..ticks {
            observer.on_tick_start(self.clock.current_tick);
            self.do_step();
            let tick = self.clock.current_tick;
            if let Some(snapshot) = self.recording.latest() {
                observer.on_tick_end(tick, snapshot);
            }
        }
        observer.on_run_end(self.clock.current_tick);
    }

    // ── Introspection ─────────────────────────────────────────────────────

    /// Fill `out` with one row per agent, ascending id order.  Returns
    /// `false` (and writes nothing) when `out` is smaller than the agent
    /// count.
    pub fn agents_info(&self, out: &mut [AgentInfo]) -> bool {
        if out.len() < self.agents.len() {
            return false;
        }
        for (slot, (&id, record)) in out.iter_mut().zip(self.agents.iter()) {
            let Some(info) = self.nav.agent(id) else {
                continue;
            };
            *slot = AgentInfo {
                id,
                pos: info.pos,
                vel: info.vel,
                orient: info.orient,
                radius: info.radius,
                op: record.op,
                tactic: record.tactic,
                strategy: record.strategy,
                goal_centroid: self
                    .goals
                    .get(&id)
                    .map(Goal::centroid)
                    .unwrap_or(Vec2::ZERO),
            };
        }
        true
    }

    /// The tick history (one snapshot per completed step).
    pub fn recording(&self) -> &Recording {
        &self.recording
    }

    pub fn nav(&self) -> &NavSystem {
        &self.nav
    }

    pub fn nav_mut(&mut self) -> &mut NavSystem {
        &mut self.nav
    }

    pub fn clock(&self) -> SimClock {
        self.clock
    }

    pub fn config(&self) -> SimConfig {
        self.config
    }

    // ── Internals ─────────────────────────────────────────────────────────

    /// Step ③: retire pending agents, then apply queued operation switches.
    fn apply_pending(&mut self) {
        for agent in std::mem::take(&mut self.pending_removals) {
            let Some(record) = self.agents.remove(&agent) else {
                continue;
            };
            if let Some(c) = op_by_id(&mut self.ops, record.op) {
                c.remove_agent(agent);
            }
            if let Some(c) = tactic_by_id(&mut self.tactics, record.tactic) {
                c.remove_agent(agent);
            }
            if let Some(c) = strategy_by_id(&mut self.strategies, record.strategy) {
                c.remove_agent(agent);
            }
            self.goals.remove(&agent);
            let _ = self.nav.remove_agent(agent);
            self.op_switches.retain(|(a, _)| *a != agent);
        }

        for (agent, target) in std::mem::take(&mut self.op_switches) {
            let Some(record) = self.agents.get_mut(&agent) else {
                continue;
            };
            if record.op == target {
                continue;
            }
            if let Some(old) = op_by_id(&mut self.ops, record.op) {
                old.remove_agent(agent);
            }
            if let Some(new) = op_by_id(&mut self.ops, target) {
                new.add_agent(agent);
            }
            record.op = target;
        }
    }

    fn snapshot(&self) -> TickSnapshot {
        let agents = self
            .agents
            .keys()
            .filter_map(|&id| self.nav.agent(id))
            .map(|info| AgentSnapshot {
                id: info.id,
                pos: info.pos,
                vel: info.vel,
                orient: info.orient,
                radius: info.radius,
            })
            .collect();
        TickSnapshot {
            tick: self.clock.current_tick,
            time: self.clock.elapsed_secs(),
            agents,
        }
    }

    fn check_component(&mut self, id: ComponentId, layer: LayerKind) -> SimResult<()> {
        if id == component_ids::NO_COMPONENT {
            return Ok(());
        }
        let known = match layer {
            LayerKind::Operation => op_by_id(&mut self.ops, id).is_some(),
            LayerKind::Tactic => tactic_by_id(&mut self.tactics, id).is_some(),
            LayerKind::Strategy => strategy_by_id(&mut self.strategies, id).is_some(),
        };
        if known {
            Ok(())
        } else {
            Err(SimError::UnknownComponent(id))
        }
    }
}

#[derive(Clone, Copy)]
enum LayerKind {
    Operation,
    Tactic,
    Strategy,
}

// ── Registry lookups ──────────────────────────────────────────────────────────
//
// Free functions (not methods) so callers can borrow one registry while
// holding other `Simulator` fields mutably.

fn op_by_id(
    ops: &mut [Box<dyn OperationComponent>],
    id: ComponentId,
) -> Option<&mut Box<dyn OperationComponent>> {
    ops.iter_mut().find(|c| c.id() == id)
}

fn tactic_by_id(
    tactics: &mut [Box<dyn TacticComponent>],
    id: ComponentId,
) -> Option<&mut Box<dyn TacticComponent>> {
    tactics.iter_mut().find(|c| c.id() == id)
}

fn strategy_by_id(
    strategies: &mut [Box<dyn StrategyComponent>],
    id: ComponentId,
) -> Option<&mut Box<dyn StrategyComponent>> {
    strategies.iter_mut().find(|c| c.id() == id)
}
