//! Immutable portal routes produced by the planner.

use crowd_core::{EdgeId, NodeId, Vec2};

/// One step of a route: a portal with its endpoints pre-oriented relative to
/// the direction of travel.
///
/// Orienting once at route-construction time means the funnel never has to
/// re-derive winding from node centres on the hot path.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Portal {
    pub edge: EdgeId,
    /// The node entered by crossing this portal.
    pub to_node: NodeId,
    /// Portal endpoint on the left of the travel direction.
    pub left: Vec2,
    /// Portal endpoint on the right of the travel direction.
    pub right: Vec2,
}

impl Portal {
    #[inline]
    pub fn width(&self) -> f32 {
        self.left.distance(self.right)
    }

    #[inline]
    pub fn midpoint(&self) -> Vec2 {
        (self.left + self.right) * 0.5
    }
}

/// An ordered portal sequence from `source` to `destination`, valid for any
/// agent requiring clearance up to `min_width`.
///
/// Routes are immutable once built; the planner caches them and hands out
/// `Arc` clones, so a route outlives every path that references it.
#[derive(Clone, Debug, PartialEq)]
pub struct PortalRoute {
    pub source: NodeId,
    pub destination: NodeId,
    /// The clearance width the route was planned for (bucket ceiling).
    pub min_width: f32,
    pub portals: Vec<Portal>,
}

impl PortalRoute {
    /// Number of portals to cross.
    #[inline]
    pub fn len(&self) -> usize {
        self.portals.len()
    }

    /// `true` when source and destination are the same node.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.portals.is_empty()
    }

    /// The node an agent occupies *before* crossing portal `i`.
    ///
    /// `i == len()` names the destination node.
    pub fn node_before(&self, i: usize) -> NodeId {
        if i == 0 {
            self.source
        } else {
            self.portals[i - 1].to_node
        }
    }

    /// Index of the first route leg occupying `node`, if the node lies on the
    /// route at all.  Used to resync agents that strayed and were relocated.
    pub fn leg_of_node(&self, node: NodeId) -> Option<usize> {
        (0..=self.portals.len()).find(|&i| self.node_before(i) == node)
    }
}
