//! Per-agent traversal state along a portal route.
//!
//! A `PortalPath` turns a static [`PortalRoute`] into tick-by-tick guidance:
//! the funnel algorithm yields the next corner waypoint, portal-crossing
//! detection advances the route leg, and a localizer cascade recovers agents
//! that stray off their expected node (resyncing onto the route when
//! possible, replanning otherwise).
//!
//! The portal index is monotone: once a portal is consumed it is never
//! un-consumed for the same route; only a replan (which installs a new
//! route) resets it.

use std::sync::Arc;

use crowd_core::{Goal, GoalId, NodeId, Vec2};

use crate::localizer::NavMeshLocalizer;
use crate::mesh::NavMesh;
use crate::route::PortalRoute;

/// Traversal state of one agent along one goal assignment.
pub struct PortalPath {
    route: Arc<PortalRoute>,
    goal: Goal,
    /// Agent disc radius; portals are shrunk by this much per side.
    radius: f32,
    /// Index of the first uncrossed portal.  `route.len()` means the agent is
    /// in the destination node.
    current: usize,
    /// Cached corner waypoint from the last funnel evaluation.
    waypoint: Option<Vec2>,
    done: bool,
}

impl PortalPath {
    pub fn new(goal: Goal, route: Arc<PortalRoute>, radius: f32) -> Self {
        Self {
            route,
            goal,
            radius,
            current: 0,
            waypoint: None,
            done: false,
        }
    }

    pub fn goal(&self) -> &Goal {
        &self.goal
    }

    pub fn goal_id(&self) -> GoalId {
        self.goal.id
    }

    pub fn route(&self) -> &Arc<PortalRoute> {
        &self.route
    }

    /// Index of the first uncrossed portal.
    pub fn current_portal(&self) -> usize {
        self.current
    }

    /// The route node the agent should currently be in.
    pub fn current_node(&self) -> NodeId {
        self.route.node_before(self.current)
    }

    /// The last funnel corner handed out, if any.
    pub fn waypoint(&self) -> Option<Vec2> {
        self.waypoint
    }

    /// `true` once the agent's position has been inside the goal shape.
    pub fn is_done(&self) -> bool {
        self.done
    }

    // ── Preferred direction ───────────────────────────────────────────────

    /// The unit direction an agent at `pos` facing `orient` should prefer this
    /// tick: toward the funnel's next corner, clamped into the heading cone
    /// `arccos(heading_dev_cos)` around `orient`.
    ///
    /// Returns `Vec2::ZERO` when the path is done.
    pub fn preferred_direction(&mut self, pos: Vec2, orient: Vec2, heading_dev_cos: f32) -> Vec2 {
        if self.done {
            self.waypoint = None;
            return Vec2::ZERO;
        }

        let corner = self.funnel_corner(pos);
        self.waypoint = Some(corner);

        let mut dir = (corner - pos).normalize_or_zero();
        if dir == Vec2::ZERO {
            // Standing exactly on the corner: aim at the goal region itself.
            dir = (self.goal.nearest_point(pos) - pos).normalize_or_zero();
        }
        if dir == Vec2::ZERO {
            return Vec2::ZERO;
        }

        // Heading-deviation cone.  The default threshold cos(π) accepts any
        // direction, so this only engages for tight tactic configurations.
        if orient != Vec2::ZERO && dir.dot(orient) < heading_dev_cos {
            let max_dev = heading_dev_cos.clamp(-1.0, 1.0).acos();
            let sign = if orient.det(dir) >= 0.0 { 1.0 } else { -1.0 };
            dir = orient.rotated(sign * max_dev);
        }
        dir
    }

    // ── Location update ───────────────────────────────────────────────────

    /// Advance the path for an agent at `pos` and return the node it is in.
    ///
    /// - Crossing the current portal advances the portal index.
    /// - Straying off the expected node triggers the localizer cascade; if
    ///   the found node lies ahead on the route the path resyncs, otherwise
    ///   it replans from the found node to the goal.
    /// - Entering the goal shape marks the path done.
    /// - `NodeId::INVALID` is returned for genuinely off-mesh positions; the
    ///   route is kept so the next on-mesh tick can recover.
    pub fn update_location(&mut self, pos: Vec2, localizer: &mut NavMeshLocalizer) -> NodeId {
        if self.done {
            return self.current_node();
        }
        if self.goal.contains(pos) {
            self.done = true;
            return self.current_node();
        }

        let mesh = Arc::clone(localizer.mesh());

        // Consume every portal whose plane the agent has crossed.
        let mut advanced = false;
        while self.current < self.route.len() {
            if !self.crossed_portal(&mesh, self.current, pos) {
                break;
            }
            self.current += 1;
            advanced = true;
        }
        if advanced {
            self.waypoint = None;
        }

        let expected = self.current_node();
        if mesh.node_contains(expected, pos) {
            return expected;
        }

        // Strayed: Neighbours → Blind from the expected node.
        let found = localizer.locate(pos, expected);
        if found == NodeId::INVALID {
            return NodeId::INVALID;
        }

        match self.route.leg_of_node(found) {
            // Ahead on the route (or exactly here): resync the leg index.
            Some(leg) if leg >= self.current => {
                self.current = leg;
                self.waypoint = None;
            }
            // Behind the consumed prefix or not on the route at all: replan.
            _ => self.replan(found, localizer),
        }
        found
    }

    /// Replace the route with a fresh plan from `from` toward the goal.
    ///
    /// On planner failure the stale route is kept; the next off-route tick
    /// retries, and the tactic holds the agent meanwhile.
    fn replan(&mut self, from: NodeId, localizer: &mut NavMeshLocalizer) {
        let mut anchor = self.goal.centroid();
        let mut goal_node = localizer.find_node_blind(anchor);
        if goal_node == NodeId::INVALID {
            anchor = localizer.closest_available_point(anchor);
            goal_node = localizer.find_node_blind(anchor);
        }
        if goal_node == NodeId::INVALID {
            return;
        }
        if let Ok(route) = localizer.planner().route(from, goal_node, 2.0 * self.radius) {
            self.route = route;
            self.current = 0;
            self.waypoint = None;
        }
    }

    /// `true` when `pos` lies on the far side of portal `i`, i.e. the same
    /// side as the node the portal leads to.
    fn crossed_portal(&self, mesh: &NavMesh, i: usize, pos: Vec2) -> bool {
        let portal = &self.route.portals[i];
        let edge = portal.right - portal.left;
        let side = edge.det(pos - portal.left);
        let target = mesh.node_unchecked(portal.to_node).center;
        let target_side = edge.det(target - portal.left);
        side != 0.0 && side.signum() == target_side.signum()
    }

    // ── Funnel ────────────────────────────────────────────────────────────

    /// Run the funnel from `pos` across the remaining portals and return the
    /// next corner waypoint (the goal's nearest point when the corridor is
    /// straight).
    fn funnel_corner(&self, pos: Vec2) -> Vec2 {
        let goal_point = self.goal.nearest_point(pos);
        let apex = pos;
        let mut left = apex;
        let mut right = apex;

        let n = self.route.len();
        for i in self.current..=n {
            // The goal point acts as a final zero-width portal.
            let (l, r) = if i < n {
                self.shrunk_portal(i)
            } else {
                (goal_point, goal_point)
            };

            // Right tangent: the candidate narrows the funnel when it is on
            // or left of the current right tangent.
            if cross(apex, right, r) >= 0.0 {
                if right == apex || cross(apex, left, r) < 0.0 {
                    right = r;
                } else {
                    // Right side swept past the left tangent: corner found.
                    return left;
                }
            }

            // Left tangent, mirrored.
            if cross(apex, left, l) <= 0.0 {
                if left == apex || cross(apex, right, l) > 0.0 {
                    left = l;
                } else {
                    return right;
                }
            }
        }
        goal_point
    }

    /// Portal `i` with each endpoint pulled inward by the agent radius.
    /// Portals narrower than the agent collapse to their midpoint.
    fn shrunk_portal(&self, i: usize) -> (Vec2, Vec2) {
        let portal = &self.route.portals[i];
        if portal.width() <= 2.0 * self.radius {
            let mid = portal.midpoint();
            (mid, mid)
        } else {
            let inward = (portal.right - portal.left).normalize_or_zero() * self.radius;
            (portal.left + inward, portal.right - inward)
        }
    }
}

/// 2-D cross of `(b - a)` and `(c - a)`: positive when `c` is left of the ray
/// `a → b`.
#[inline]
fn cross(a: Vec2, b: Vec2, c: Vec2) -> f32 {
    (b - a).det(c - a)
}
