//! Path-following tactic over the navigation mesh.
//!
//! For every member agent the tactic keeps a [`NavMeshLocation`]: the node
//! the agent is in, plus — once a goal is known — a [`PortalPath`] toward
//! it.  Each tick it advances the path (portal crossings, stray recovery),
//! then writes the funnel's preferred direction and the agent's preferred
//! speed into `pref_velocity`.
//!
//! Paths are rebuilt when the goal id changes.  Unreachable goal centroids
//! are snapped to the closest available point first; when even the snapped
//! goal cannot be routed to, the agent is held still for the tick and the
//! plan is retried on the next one.

use std::collections::BTreeMap;

use crowd_core::{AgentId, ComponentId, Goal, GoalShape, NodeId, Vec2};
use crowd_mesh::{NavMeshLocalizer, PortalPath};
use crowd_nav::AgentSpatialInfo;

use crate::component::{component_ids, TacticComponent};
use crate::context::TickContext;

/// Per-agent mesh location: a node, optionally with an active path.
///
/// When a path is present, `node` mirrors the path's current route leg.
pub struct NavMeshLocation {
    pub node: NodeId,
    pub path: Option<PortalPath>,
}

/// The tactic layer's standard implementation: portal-path following.
pub struct NavMeshTactic {
    /// Cosine of the heading-deviation cone half-angle; `cos(π)` (the
    /// default) disables clamping.
    heading_dev_cos: f32,
    agents: BTreeMap<AgentId, NavMeshLocation>,
}

impl NavMeshTactic {
    pub fn new() -> Self {
        Self::with_heading_cone(-1.0)
    }

    /// A tactic that clamps preferred directions into the cone
    /// `arccos(heading_dev_cos)` around each agent's orientation.
    pub fn with_heading_cone(heading_dev_cos: f32) -> Self {
        Self {
            heading_dev_cos,
            agents: BTreeMap::new(),
        }
    }

    /// The node this tactic believes `agent` is in.
    pub fn node_of(&self, agent: AgentId) -> NodeId {
        self.agents
            .get(&agent)
            .map(|loc| loc.node)
            .unwrap_or(NodeId::INVALID)
    }

    /// The agent's active path, if one has been built.
    pub fn path_of(&self, agent: AgentId) -> Option<&PortalPath> {
        self.agents.get(&agent).and_then(|loc| loc.path.as_ref())
    }

    /// Build a fresh path for an agent at `info.pos` toward `goal`.
    ///
    /// Returns `None` when the agent is off-mesh, the goal cannot be snapped
    /// onto the mesh, or no sufficiently wide route exists.
    fn build_path(
        info: &AgentSpatialInfo,
        goal: Goal,
        last_node: NodeId,
        localizer: &mut NavMeshLocalizer,
    ) -> Option<PortalPath> {
        let from = localizer.locate(info.pos, last_node);
        if from == NodeId::INVALID {
            return None;
        }

        let mut effective_goal = goal;
        let mut goal_node = localizer.find_node_blind(goal.centroid());
        if goal_node == NodeId::INVALID {
            // Unreachable centroid: route to the closest available point
            // instead, keeping the goal id so the substitution is stable.
            let snapped = localizer.closest_available_point(goal.centroid());
            goal_node = localizer.find_node_blind(snapped);
            if goal_node == NodeId::INVALID {
                return None;
            }
            effective_goal = Goal::new(goal.id, GoalShape::Point(snapped));
        }

        let route = localizer
            .planner()
            .route(from, goal_node, 2.0 * info.radius)
            .ok()?;
        Some(PortalPath::new(effective_goal, route, info.radius))
    }
}

impl Default for NavMeshTactic {
    fn default() -> Self {
        Self::new()
    }
}

impl TacticComponent for NavMeshTactic {
    fn id(&self) -> ComponentId {
        component_ids::NAVMESH_TACTIC
    }

    fn add_agent(&mut self, agent: AgentId) {
        // The path is built lazily on the first update with a goal in place.
        self.agents.entry(agent).or_insert(NavMeshLocation {
            node: NodeId::INVALID,
            path: None,
        });
    }

    fn remove_agent(&mut self, agent: AgentId) -> bool {
        self.agents.remove(&agent).is_some()
    }

    fn update(&mut self, ctx: &mut TickContext<'_>, _time_step: f32) {
        // Disjoint borrows of the nav system's public fields.
        let nav = &mut *ctx.nav;
        let infos = &mut nav.agents;
        let localizer = &mut nav.localizer;

        for (&id, loc) in self.agents.iter_mut() {
            let Some(info) = infos.get_mut(&id) else {
                continue;
            };
            let Some(goal) = ctx.goals.get(&id).copied() else {
                info.pref_velocity.set_speed(0.0);
                continue;
            };

            // (Re)plan on goal change.
            let stale = match &loc.path {
                None => true,
                Some(path) => path.goal_id() != goal.id,
            };
            if stale {
                match Self::build_path(info, goal, loc.node, localizer) {
                    Some(path) => {
                        loc.node = path.current_node();
                        loc.path = Some(path);
                    }
                    None => {
                        info.pref_velocity.set_speed(0.0);
                        continue;
                    }
                }
            }
            let Some(path) = loc.path.as_mut() else {
                continue;
            };

            // Advance the path and mirror the node into the localizer.
            let old = localizer.node_of(id);
            let node = path.update_location(info.pos, localizer);
            if node != NodeId::INVALID {
                loc.node = node;
                localizer.update_agent_position(id, old, node);
            }

            if path.is_done() {
                info.pref_velocity.set_direction(Vec2::ZERO);
                info.pref_velocity.set_speed(0.0);
            } else {
                let dir = path.preferred_direction(info.pos, info.orient, self.heading_dev_cos);
                info.pref_velocity.set_direction(dir);
                info.pref_velocity.set_speed(info.pref_speed);
            }
        }
    }
}
