//! Agent-to-node tracking over an immutable mesh.
//!
//! The localizer is the mutable companion of the [`NavMesh`]: it remembers
//! which node each agent was last seen in, maintains per-node occupancy sets,
//! and owns the shared [`PathPlanner`].
//!
//! # Location strategies
//!
//! Three strategies, in order of cost:
//!
//! 1. **Stay** — test the agent's last known node.
//! 2. **Neighbours** — test each portal-adjacent node of the last known node.
//! 3. **Blind** — linear scan over all live nodes.
//!
//! [`locate`](NavMeshLocalizer::locate) runs the full cascade and reports
//! `NodeId::INVALID` only for positions genuinely outside every node.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use crowd_core::{AgentId, NodeId, Vec2};

use crate::mesh::NavMesh;
use crate::planner::PathPlanner;

/// Mutable mesh companion: agent→node map, occupancy sets, planner.
pub struct NavMeshLocalizer {
    mesh: Arc<NavMesh>,
    planner: PathPlanner,
    agent_nodes: HashMap<AgentId, NodeId>,
    occupancy: HashMap<NodeId, BTreeSet<AgentId>>,
}

impl NavMeshLocalizer {
    pub fn new(mesh: Arc<NavMesh>, route_width_bucket: f32) -> Self {
        Self {
            planner: PathPlanner::new(Arc::clone(&mesh), route_width_bucket),
            mesh,
            agent_nodes: HashMap::new(),
            occupancy: HashMap::new(),
        }
    }

    pub fn mesh(&self) -> &Arc<NavMesh> {
        &self.mesh
    }

    pub fn planner(&mut self) -> &mut PathPlanner {
        &mut self.planner
    }

    // ── Agent tracking ────────────────────────────────────────────────────

    /// The node an agent was last localised in; `NodeId::INVALID` when the
    /// agent is unknown or off-mesh.
    pub fn node_of(&self, agent: AgentId) -> NodeId {
        self.agent_nodes
            .get(&agent)
            .copied()
            .unwrap_or(NodeId::INVALID)
    }

    /// Record that `agent` moved from node `old` to node `new`.
    ///
    /// Idempotent: calling with `old == new` (or repeating a call) leaves the
    /// maps unchanged.  Must be invoked whenever an agent crosses a portal so
    /// occupancy stays consistent.
    pub fn update_agent_position(&mut self, agent: AgentId, old: NodeId, new: NodeId) {
        if old == new && self.agent_nodes.get(&agent) == Some(&new) {
            return;
        }
        if old != NodeId::INVALID {
            if let Some(set) = self.occupancy.get_mut(&old) {
                set.remove(&agent);
            }
        }
        if new != NodeId::INVALID {
            self.occupancy.entry(new).or_default().insert(agent);
        }
        self.agent_nodes.insert(agent, new);
    }

    /// Forget an agent entirely (id retirement).
    pub fn remove_agent(&mut self, agent: AgentId) {
        if let Some(node) = self.agent_nodes.remove(&agent) {
            if let Some(set) = self.occupancy.get_mut(&node) {
                set.remove(&agent);
            }
        }
    }

    /// Agents currently localised in `node`, in ascending id order.
    pub fn agents_in_node(&self, node: NodeId) -> impl Iterator<Item = AgentId> + '_ {
        self.occupancy
            .get(&node)
            .into_iter()
            .flat_map(|set| set.iter().copied())
    }

    // ── Location strategies ───────────────────────────────────────────────

    /// Strategy 3 (Blind): linear scan over live nodes.
    pub fn find_node_blind(&self, p: Vec2) -> NodeId {
        self.mesh.node_at(p)
    }

    /// Strategy 2 (Neighbours): test each portal-adjacent node of `node`.
    pub fn test_neighbors(&self, node: NodeId, p: Vec2) -> NodeId {
        for (_, neighbor) in self.mesh.neighbors(node) {
            if self.mesh.node_contains(neighbor, p) {
                return neighbor;
            }
        }
        NodeId::INVALID
    }

    /// The full Stay → Neighbours → Blind cascade from `last` (which may be
    /// `NodeId::INVALID` for an untracked agent).
    pub fn locate(&self, p: Vec2, last: NodeId) -> NodeId {
        if last != NodeId::INVALID {
            if self.mesh.node_contains(last, p) {
                return last;
            }
            let neighbor = self.test_neighbors(last, p);
            if neighbor != NodeId::INVALID {
                return neighbor;
            }
        }
        self.find_node_blind(p)
    }

    /// Snap `p` onto the mesh: `p` itself when some node contains it,
    /// otherwise the centre of the nearest live node.
    ///
    /// Only degenerates to `p` unchanged when the mesh has no live nodes.
    pub fn closest_available_point(&self, p: Vec2) -> Vec2 {
        if self.find_node_blind(p) != NodeId::INVALID {
            return p;
        }
        match self.mesh.closest_node_center(p) {
            Some((_, center)) => center,
            None => p,
        }
    }
}
