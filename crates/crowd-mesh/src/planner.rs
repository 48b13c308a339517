//! Portal A\* planner with a memoised route cache.
//!
//! # Search
//!
//! Graph vertices are node ids; an edge between two nodes exists iff their
//! shared portal is at least as wide as the requested clearance.  Edge cost
//! is the Euclidean distance between node centres and the heuristic is the
//! straight-line distance to the destination centre — admissible, so the
//! first settle of the destination is optimal.  Equal-cost ties settle the
//! lower node id first, which makes route selection deterministic.
//!
//! # Caching
//!
//! Results are memoised by `(source, destination, width bucket)`.  Widths
//! quantise *up* to the next bucket multiple and the search runs with the
//! bucket ceiling, so one cached route satisfies every width in its bucket.
//! The cache grows monotonically; only successful searches are stored
//! (failures must stay re-observable across authoring-time mesh edits).

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};
use std::sync::Arc;

use crowd_core::{EdgeId, NodeId, Vec2};

use crate::error::{MeshError, MeshResult};
use crate::mesh::NavMesh;
use crate::route::{Portal, PortalRoute};

// ── Open list entry ───────────────────────────────────────────────────────────

#[derive(Copy, Clone, PartialEq)]
struct OpenNode {
    f: f32,
    g: f32,
    node: NodeId,
}

impl Eq for OpenNode {}

impl Ord for OpenNode {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed so BinaryHeap (a max-heap) pops the smallest f first;
        // the node id is the deterministic tie-breaker.
        other
            .f
            .total_cmp(&self.f)
            .then_with(|| other.g.total_cmp(&self.g))
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for OpenNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// ── PathPlanner ───────────────────────────────────────────────────────────────

/// Weighted-graph shortest-path search over mesh nodes, memoised per
/// `(source, destination, width bucket)`.
pub struct PathPlanner {
    mesh: Arc<NavMesh>,
    width_bucket: f32,
    cache: HashMap<(NodeId, NodeId, u32), Arc<PortalRoute>>,
}

impl PathPlanner {
    pub fn new(mesh: Arc<NavMesh>, width_bucket: f32) -> Self {
        Self {
            mesh,
            width_bucket,
            cache: HashMap::new(),
        }
    }

    pub fn mesh(&self) -> &Arc<NavMesh> {
        &self.mesh
    }

    /// Number of cached routes.
    pub fn cached_route_count(&self) -> usize {
        self.cache.len()
    }

    /// A route from `from` to `to` for an agent needing `min_width` clearance.
    ///
    /// Returns a cached route when one exists for the width bucket, otherwise
    /// searches and caches.  `MeshError::NoRoute` when the nodes are not
    /// connected by sufficiently wide portals.
    pub fn route(
        &mut self,
        from: NodeId,
        to: NodeId,
        min_width: f32,
    ) -> MeshResult<Arc<PortalRoute>> {
        for node in [from, to] {
            match self.mesh.node(node) {
                Some(n) if !n.deleted => {}
                _ => return Err(MeshError::NodeNotFound(node)),
            }
        }

        let bucket = self.bucket(min_width);
        if let Some(route) = self.cache.get(&(from, to, bucket)) {
            return Ok(Arc::clone(route));
        }

        let effective_width = bucket as f32 * self.width_bucket;
        let route = Arc::new(self.search(from, to, effective_width)?);
        self.cache.insert((from, to, bucket), Arc::clone(&route));
        Ok(route)
    }

    /// Quantise a clearance width up to its cache bucket.
    fn bucket(&self, min_width: f32) -> u32 {
        if min_width <= 0.0 {
            0
        } else {
            (min_width / self.width_bucket).ceil() as u32
        }
    }

    // ── A* ────────────────────────────────────────────────────────────────

    fn search(&self, from: NodeId, to: NodeId, min_width: f32) -> MeshResult<PortalRoute> {
        let mesh = &self.mesh;
        if from == to {
            return Ok(PortalRoute {
                source: from,
                destination: to,
                min_width,
                portals: Vec::new(),
            });
        }

        let n = mesh.node_count();
        let dest_center = mesh.node_unchecked(to).center;

        let mut g = vec![f32::INFINITY; n];
        let mut prev: Vec<(NodeId, EdgeId)> = vec![(NodeId::INVALID, EdgeId::INVALID); n];
        let mut open = BinaryHeap::new();

        g[from.index()] = 0.0;
        open.push(OpenNode {
            f: mesh.node_unchecked(from).center.distance(dest_center),
            g: 0.0,
            node: from,
        });

        while let Some(entry) = open.pop() {
            let node = entry.node;
            if node == to {
                return Ok(self.reconstruct(from, to, min_width, &prev));
            }
            // Skip stale heap entries.
            if entry.g > g[node.index()] {
                continue;
            }
            let center = mesh.node_unchecked(node).center;

            for (edge_id, neighbor) in mesh.neighbors(node) {
                if mesh.edge_unchecked(edge_id).width() < min_width {
                    continue;
                }
                let neighbor_center = mesh.node_unchecked(neighbor).center;
                let tentative = entry.g + center.distance(neighbor_center);
                if tentative < g[neighbor.index()] {
                    g[neighbor.index()] = tentative;
                    prev[neighbor.index()] = (node, edge_id);
                    open.push(OpenNode {
                        f: tentative + neighbor_center.distance(dest_center),
                        g: tentative,
                        node: neighbor,
                    });
                }
            }
        }

        Err(MeshError::NoRoute { from, to })
    }

    fn reconstruct(
        &self,
        from: NodeId,
        to: NodeId,
        min_width: f32,
        prev: &[(NodeId, EdgeId)],
    ) -> PortalRoute {
        let mesh = &self.mesh;

        // Walk predecessor links back from the destination.
        let mut hops: Vec<(NodeId, EdgeId, NodeId)> = Vec::new();
        let mut cursor = to;
        while cursor != from {
            let (parent, edge) = prev[cursor.index()];
            hops.push((parent, edge, cursor));
            cursor = parent;
        }
        hops.reverse();

        let portals = hops
            .into_iter()
            .map(|(from_node, edge_id, to_node)| {
                let edge = mesh.edge_unchecked(edge_id);
                let from_center = mesh.node_unchecked(from_node).center;
                let to_center = mesh.node_unchecked(to_node).center;
                let (left, right) = orient_portal(edge.p0, edge.p1, from_center, to_center);
                Portal {
                    edge: edge_id,
                    to_node,
                    left,
                    right,
                }
            })
            .collect();

        PortalRoute {
            source: from,
            destination: to,
            min_width,
            portals,
        }
    }
}

/// Classify the portal endpoints as left/right of the travel direction
/// `from_center → to_center`.
fn orient_portal(p0: Vec2, p1: Vec2, from_center: Vec2, to_center: Vec2) -> (Vec2, Vec2) {
    let dir = to_center - from_center;
    // Larger cross product = further left of the travel direction.
    if dir.det(p0 - from_center) > dir.det(p1 - from_center) {
        (p0, p1)
    } else {
        (p1, p0)
    }
}
