//! The navigation system: agent store, kinematic integration, neighbour
//! rebuild and mesh relocalisation.
//!
//! `NavSystem` owns everything spatial: the mesh handle, the localizer (and
//! through it the path planner), every agent's `AgentSpatialInfo` and the
//! per-tick neighbour index.  The simulator drives it in three separate
//! calls per tick — [`update`](NavSystem::update) (integration),
//! [`rebuild_neighbors`](NavSystem::rebuild_neighbors) and
//! [`relocalize`](NavSystem::relocalize) — so behaviour layers observe a
//! consistent ordering: operations read the *previous* tick's neighbours.

use std::collections::BTreeMap;
use std::sync::Arc;

use crowd_core::{AgentId, NodeId, SimConfig, Vec2};
use crowd_mesh::{NavMesh, NavMeshLocalizer, Obstacle};

use crate::agent::AgentSpatialInfo;
use crate::error::{NavError, NavResult};
use crate::neighbors::NeighborIndex;

/// Mesh, localizer, agents and neighbour index under one roof.
///
/// Agents are stored in a `BTreeMap` so every per-agent pass runs in
/// ascending id order — the backbone of tick determinism.
///
/// `agents` and `localizer` are `pub` so behaviour components can borrow
/// them as disjoint fields (a tactic mutates an agent's preferred velocity
/// *while* consulting the localizer).  Register agents through
/// [`add_agent`](NavSystem::add_agent), never by direct insertion.
pub struct NavSystem {
    mesh: Arc<NavMesh>,
    /// Mutable mesh companion: agent→node map plus the path planner.
    pub localizer: NavMeshLocalizer,
    /// Cutoff distance for neighbour queries.
    pub sensitivity_radius: f32,
    /// Spatial state of every live agent, keyed by id.
    pub agents: BTreeMap<AgentId, AgentSpatialInfo>,
    neighbors: NeighborIndex,
}

impl NavSystem {
    pub fn new(mesh: Arc<NavMesh>, config: &SimConfig) -> Self {
        Self {
            localizer: NavMeshLocalizer::new(Arc::clone(&mesh), config.route_width_bucket),
            mesh,
            sensitivity_radius: config.sensitivity_radius,
            agents: BTreeMap::new(),
            neighbors: NeighborIndex::empty(),
        }
    }

    pub fn mesh(&self) -> &Arc<NavMesh> {
        &self.mesh
    }

    // ── Agent registration ────────────────────────────────────────────────

    /// Register an agent.  Off-mesh spawn positions are snapped to the
    /// closest live node centre before the agent is localised.
    pub fn add_agent(&mut self, mut info: AgentSpatialInfo) -> NavResult<()> {
        if self.agents.contains_key(&info.id) {
            return Err(NavError::DuplicateAgent(info.id));
        }
        info.pos = self.localizer.closest_available_point(info.pos);
        let node = self.localizer.find_node_blind(info.pos);
        self.localizer
            .update_agent_position(info.id, NodeId::INVALID, node);
        self.agents.insert(info.id, info);
        Ok(())
    }

    /// Retire an agent's id: drop its spatial info and localizer tracking.
    pub fn remove_agent(&mut self, id: AgentId) -> NavResult<()> {
        if self.agents.remove(&id).is_none() {
            return Err(NavError::AgentNotFound(id));
        }
        self.localizer.remove_agent(id);
        Ok(())
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn agent(&self, id: AgentId) -> Option<&AgentSpatialInfo> {
        self.agents.get(&id)
    }

    pub fn agent_mut(&mut self, id: AgentId) -> Option<&mut AgentSpatialInfo> {
        self.agents.get_mut(&id)
    }

    pub fn agent_count(&self) -> usize {
        self.agents.len()
    }

    /// The previous rebuild's neighbour set for `id`.
    pub fn neighbors_of(&self, id: AgentId) -> &[AgentId] {
        self.neighbors.neighbors_of(id)
    }

    /// The node an agent was last localised in.
    pub fn node_of(&self, id: AgentId) -> NodeId {
        self.localizer.node_of(id)
    }

    /// Obstacles stored in the agent's current node, nearest first.
    pub fn closest_obstacles(&self, id: AgentId) -> Vec<Obstacle> {
        let Some(info) = self.agents.get(&id) else {
            return Vec::new();
        };
        let node = self.localizer.node_of(id);
        let Some(node) = self.mesh.node(node) else {
            return Vec::new();
        };
        let mut obstacles: Vec<Obstacle> = node
            .obstacles
            .iter()
            .filter_map(|&oid| self.mesh.obstacle(oid).copied())
            .collect();
        obstacles.sort_by(|a, b| {
            a.distance_squared(info.pos)
                .total_cmp(&b.distance_squared(info.pos))
        });
        obstacles
    }

    // ── Per-tick work ─────────────────────────────────────────────────────

    /// Integrate every agent's velocity, position and orientation for one
    /// `time_step`.
    pub fn update(&mut self, time_step: f32) {
        for info in self.agents.values_mut() {
            update_pos(info, time_step);
            update_orient(info, time_step);
            debug_assert!(
                (info.orient.length() - 1.0).abs() < 1e-3,
                "agent {} orientation denormalised: {}",
                info.id,
                info.orient
            );
        }
    }

    /// Rebuild the neighbour index from current positions.
    pub fn rebuild_neighbors(&mut self) {
        let positions: Vec<(AgentId, Vec2)> =
            self.agents.iter().map(|(&id, a)| (id, a.pos)).collect();
        self.neighbors = NeighborIndex::build(&positions, self.sensitivity_radius);
    }

    /// Re-run the Stay → Neighbours → Blind cascade for every agent and
    /// record node changes in the localizer.
    ///
    /// Afterwards each agent's recorded node either contains its position or
    /// is `NodeId::INVALID` (genuinely off-mesh).
    pub fn relocalize(&mut self) {
        for (&id, info) in &self.agents {
            let old = self.localizer.node_of(id);
            let new = self.localizer.locate(info.pos, old);
            self.localizer.update_agent_position(id, old, new);
        }
    }
}

// ── Integration ───────────────────────────────────────────────────────────────

/// Blend `vel` toward `vel_new` under the acceleration limit, then advance
/// the position.
fn update_pos(agent: &mut AgentSpatialInfo, time_step: f32) {
    let dv = agent.vel_new - agent.vel;
    let dv_len = dv.length();
    let max_dv = agent.max_accel * time_step;

    if dv_len > max_dv {
        let w = max_dv / dv_len;
        agent.vel = agent.vel * (1.0 - w) + agent.vel_new * w;
    } else {
        agent.vel = agent.vel_new;
    }

    agent.pos += agent.vel * time_step;
}

/// Turn toward the travel direction, limited to `max_ang_vel` per second.
///
/// Slow agents (below a third of their preferred speed) blend between the
/// travel direction and the preferred direction so they face where they are
/// headed before they get there.  A zero velocity preserves the current
/// orientation outright.
fn update_orient(agent: &mut AgentSpatialInfo, time_step: f32) {
    let speed = agent.vel.length();
    if speed == 0.0 {
        return;
    }

    let speed_thresh = agent.pref_speed / 3.0;
    let move_dir = agent.vel / speed;

    let new_orient = if speed >= speed_thresh {
        move_dir
    } else {
        let pref_dir = agent.pref_velocity.direction;
        if pref_dir.length_squared() > 1e-6 {
            let frac = (speed / speed_thresh).sqrt();
            let blended = (move_dir * frac + pref_dir * (1.0 - frac)).normalize_or_zero();
            if blended == Vec2::ZERO {
                // Antiparallel blend cancelled out; hold the current facing.
                agent.orient
            } else {
                blended
            }
        } else {
            agent.orient
        }
    };

    // Limit the angular change for this step.
    let max_angle = agent.max_ang_vel * time_step;
    let max_ct = max_angle.cos();
    let ct = new_orient.dot(agent.orient);
    if ct < max_ct {
        let max_st = max_angle.sin();
        let o = agent.orient;
        if o.det(new_orient) > 0.0 {
            // Rotate left.
            agent.orient = Vec2::new(max_ct * o.x - max_st * o.y, max_st * o.x + max_ct * o.y);
        } else {
            // Rotate right.
            agent.orient = Vec2::new(max_ct * o.x + max_st * o.y, -max_st * o.x + max_ct * o.y);
        }
    } else {
        agent.orient = new_orient;
    }
}
