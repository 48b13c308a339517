//! The navigation mesh: a planar partition of walkable space into convex
//! polygonal nodes connected by portal edges.
//!
//! # Data layout
//!
//! Vertices live in one shared table; nodes reference them by index.  Nodes,
//! edges and obstacles are dense tables indexed by their typed ids.  The mesh
//! is immutable after load, with one exception: nodes can be *tombstoned*
//! (`deleted = true`) to support authoring-time edits without reindexing.
//! Every query skips tombstoned nodes.
//!
//! # Spatial index
//!
//! An R-tree over node centres answers the closest-available-point query used
//! to snap off-mesh positions (spawns outside the mesh, unreachable goals,
//! numerically displaced agents).  Point location itself is exact: a node
//! contains `p` iff `p` is on the interior side of every polygon edge.

use rstar::{PointDistance, RTree, RTreeObject, AABB};

use crowd_core::{Aabb, EdgeId, NodeId, ObstacleId, Vec2, VertexId};

use crate::obstacle::Obstacle;

/// Tolerance on the interior-side cross product: points marginally outside
/// an edge still count as contained, so agents walking exactly on a portal
/// don't flicker between nodes.
pub(crate) const CONTAINMENT_EPS: f32 = 1e-4;

// ── NavMeshNode ───────────────────────────────────────────────────────────────

/// A convex polygon of walkable space.
#[derive(Clone, Debug)]
pub struct NavMeshNode {
    pub id: NodeId,
    /// Vertex indices in counter-clockwise order.
    pub vertices: Vec<VertexId>,
    /// Mean of the polygon's vertices.
    pub center: Vec2,
    pub bounds: Aabb,
    /// Portal edges connecting this node to its neighbours.
    pub edges: Vec<EdgeId>,
    /// Obstacles whose midpoint lies inside this node.
    pub obstacles: Vec<ObstacleId>,
    /// Tombstone flag; set by authoring-time edits, honoured by all queries.
    pub deleted: bool,
    /// Elevation plane `z = a·x + b·y + c`, derived from the first three
    /// vertices at build time.
    plane: [f32; 3],
}

impl NavMeshNode {
    pub(crate) fn new(
        id: NodeId,
        vertices: Vec<VertexId>,
        center: Vec2,
        bounds: Aabb,
        plane: [f32; 3],
    ) -> Self {
        Self {
            id,
            vertices,
            center,
            bounds,
            edges: Vec::new(),
            obstacles: Vec::new(),
            deleted: false,
            plane,
        }
    }

    /// `true` iff `p` lies on the interior side of every oriented edge of the
    /// polygon, within [`CONTAINMENT_EPS`].
    ///
    /// `vertex_table` must be the owning mesh's shared vertex table.
    pub fn contains_point(&self, vertex_table: &[Vec2], p: Vec2) -> bool {
        if !self.bounds.is_empty() {
            // Cheap rejection before the exact test.
            let slack = Vec2::new(CONTAINMENT_EPS, CONTAINMENT_EPS);
            let loose = Aabb::new(self.bounds.min - slack, self.bounds.max + slack);
            if !loose.contains(p) {
                return false;
            }
        }
        let n = self.vertices.len();
        for i in 0..n {
            let a = vertex_table[self.vertices[i].index()];
            let b = vertex_table[self.vertices[(i + 1) % n].index()];
            // CCW winding: interior is to the left of every edge.
            if (b - a).det(p - a) < -CONTAINMENT_EPS {
                return false;
            }
        }
        true
    }

    /// Elevation of the node's plane at `p`.
    #[inline]
    pub fn elevation(&self, p: Vec2) -> f32 {
        self.plane[0] * p.x + self.plane[1] * p.y + self.plane[2]
    }

    /// Gradient of the elevation plane (constant per node).
    #[inline]
    pub fn gradient(&self) -> Vec2 {
        Vec2::new(self.plane[0], self.plane[1])
    }
}

// ── NavMeshEdge ───────────────────────────────────────────────────────────────

/// A portal: the shared boundary between exactly two nodes.  Undirected.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NavMeshEdge {
    pub id: EdgeId,
    /// The two incident nodes, in the order they were declared.
    pub nodes: (NodeId, NodeId),
    /// Portal endpoint positions.
    pub p0: Vec2,
    pub p1: Vec2,
}

impl NavMeshEdge {
    /// Traversal width of the portal.
    #[inline]
    pub fn width(&self) -> f32 {
        self.p0.distance(self.p1)
    }

    #[inline]
    pub fn midpoint(&self) -> Vec2 {
        (self.p0 + self.p1) * 0.5
    }

    /// The incident node that is not `node`.  Returns `None` when `node` is
    /// not incident at all.
    #[inline]
    pub fn other(&self, node: NodeId) -> Option<NodeId> {
        if self.nodes.0 == node {
            Some(self.nodes.1)
        } else if self.nodes.1 == node {
            Some(self.nodes.0)
        } else {
            None
        }
    }
}

// ── R-tree entry ──────────────────────────────────────────────────────────────

/// R-tree entry: a node centre with its id.
#[derive(Clone, Debug)]
struct CenterEntry {
    point: [f32; 2],
    id: NodeId,
}

impl RTreeObject for CenterEntry {
    type Envelope = AABB<[f32; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for CenterEntry {
    fn distance_2(&self, point: &[f32; 2]) -> f32 {
        let dx = self.point[0] - point[0];
        let dy = self.point[1] - point[1];
        dx * dx + dy * dy
    }
}

// ── NavMesh ───────────────────────────────────────────────────────────────────

/// The complete navigation mesh.  Owns the vertex, node, edge and obstacle
/// tables.  Construct with [`NavMeshBuilder`][crate::NavMeshBuilder] or
/// [`ascii`][crate::ascii].
#[derive(Debug)]
pub struct NavMesh {
    /// Shared vertex table referenced by node polygons.
    pub vertices: Vec<Vec2>,
    nodes: Vec<NavMeshNode>,
    edges: Vec<NavMeshEdge>,
    obstacles: Vec<Obstacle>,
    bounds: Aabb,
    active_nodes: usize,
    center_index: RTree<CenterEntry>,
}

impl NavMesh {
    pub(crate) fn new(
        vertices: Vec<Vec2>,
        nodes: Vec<NavMeshNode>,
        edges: Vec<NavMeshEdge>,
        obstacles: Vec<Obstacle>,
    ) -> Self {
        let mut bounds = Aabb::EMPTY;
        for v in &vertices {
            bounds.expand(*v);
        }
        let entries: Vec<CenterEntry> = nodes
            .iter()
            .map(|n| CenterEntry {
                point: [n.center.x, n.center.y],
                id: n.id,
            })
            .collect();
        let active_nodes = nodes.len();
        Self {
            vertices,
            nodes,
            edges,
            obstacles,
            bounds,
            active_nodes,
            center_index: RTree::bulk_load(entries),
        }
    }

    // ── Table accessors ───────────────────────────────────────────────────

    pub fn node(&self, id: NodeId) -> Option<&NavMeshNode> {
        self.nodes.get(id.index())
    }

    /// Direct node access for internal callers holding a validated id.
    #[inline]
    pub(crate) fn node_unchecked(&self, id: NodeId) -> &NavMeshNode {
        &self.nodes[id.index()]
    }

    /// Direct edge access for internal callers holding a validated id.
    #[inline]
    pub(crate) fn edge_unchecked(&self, id: EdgeId) -> &NavMeshEdge {
        &self.edges[id.index()]
    }

    pub fn edge(&self, id: EdgeId) -> Option<&NavMeshEdge> {
        self.edges.get(id.index())
    }

    pub fn obstacle(&self, id: ObstacleId) -> Option<&Obstacle> {
        self.obstacles.get(id.index())
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of non-tombstoned nodes.
    pub fn active_node_count(&self) -> usize {
        self.active_nodes
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn obstacle_count(&self) -> usize {
        self.obstacles.len()
    }

    /// Bounding box of the whole mesh.
    pub fn bounds(&self) -> Aabb {
        self.bounds
    }

    /// Iterator over non-tombstoned nodes in ascending id order.
    pub fn active_nodes(&self) -> impl Iterator<Item = &NavMeshNode> {
        self.nodes.iter().filter(|n| !n.deleted)
    }

    /// Portal-adjacent neighbours of `node`: `(portal, neighbour)` pairs.
    /// Tombstoned neighbours are skipped.
    pub fn neighbors(&self, node: NodeId) -> impl Iterator<Item = (EdgeId, NodeId)> + '_ {
        let edges: &[EdgeId] = self
            .nodes
            .get(node.index())
            .map(|n| n.edges.as_slice())
            .unwrap_or(&[]);
        edges.iter().filter_map(move |&eid| {
            let edge = &self.edges[eid.index()];
            let other = edge.other(node)?;
            if self.nodes[other.index()].deleted {
                None
            } else {
                Some((eid, other))
            }
        })
    }

    // ── Point location ────────────────────────────────────────────────────

    /// Blind point location: linear scan over non-tombstoned nodes, first
    /// (lowest-id) containing node wins.  `NodeId::INVALID` when `p` is
    /// outside every node.
    pub fn node_at(&self, p: Vec2) -> NodeId {
        if self.active_nodes == 0 {
            return NodeId::INVALID;
        }
        for node in self.active_nodes() {
            if node.contains_point(&self.vertices, p) {
                return node.id;
            }
        }
        NodeId::INVALID
    }

    /// `true` if node `id` exists, is live and contains `p`.
    pub fn node_contains(&self, id: NodeId, p: Vec2) -> bool {
        match self.nodes.get(id.index()) {
            Some(n) if !n.deleted => n.contains_point(&self.vertices, p),
            _ => false,
        }
    }

    /// Elevation at `p` evaluated on node `id`'s plane.
    pub fn elevation(&self, id: NodeId, p: Vec2) -> Option<f32> {
        self.nodes.get(id.index()).map(|n| n.elevation(p))
    }

    /// The nearest non-tombstoned node centre to `p`, by squared Euclidean
    /// distance; ties resolve to the lowest node id.  `None` only when every
    /// node is tombstoned.
    pub fn closest_node_center(&self, p: Vec2) -> Option<(NodeId, Vec2)> {
        let mut iter = self
            .center_index
            .nearest_neighbor_iter_with_distance_2(&[p.x, p.y])
            .filter(|(e, _)| !self.nodes[e.id.index()].deleted);

        let (first, best_d2) = iter.next()?;
        let mut best = first.id;
        // The R-tree does not order equal-distance entries; absorb the tie
        // group and keep the lowest id.
        for (entry, d2) in iter {
            if d2 > best_d2 {
                break;
            }
            best = best.min(entry.id);
        }
        let center = self.nodes[best.index()].center;
        Some((best, center))
    }

    // ── Tombstoning ───────────────────────────────────────────────────────

    /// Tombstone a node.  Returns `false` when the id is out of range or the
    /// node was already tombstoned.  Queries skip tombstoned nodes; the route
    /// cache is *not* invalidated (authoring-time use only).
    pub fn remove_node(&mut self, id: NodeId) -> bool {
        match self.nodes.get_mut(id.index()) {
            Some(n) if !n.deleted => {
                n.deleted = true;
                self.active_nodes -= 1;
                true
            }
            _ => false,
        }
    }
}
