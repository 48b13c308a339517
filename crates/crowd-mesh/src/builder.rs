//! Programmatic mesh construction.
//!
//! The builder accepts vertices, node polygons, portals and obstacles in any
//! order; [`build`](NavMeshBuilder::build) derives everything else: node
//! centres, bounding boxes, elevation planes, portal back-references and
//! obstacle↔node assignment.
//!
//! Portals can be declared explicitly (the mesh-file path) or inferred from
//! shared vertex pairs with [`infer_portals`](NavMeshBuilder::infer_portals)
//! (convenient for hand-built test meshes).
//!
//! # Example
//!
//! ```
//! use crowd_core::Vec2;
//! use crowd_mesh::NavMeshBuilder;
//!
//! // Two unit squares sharing an edge.
//! let mut b = NavMeshBuilder::new();
//! let v: Vec<_> = [
//!     (0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0),
//!     (2.0, 0.0), (2.0, 1.0),
//! ]
//! .iter()
//! .map(|&(x, y)| b.add_vertex(Vec2::new(x, y)))
//! .collect();
//! b.add_node(&[v[0], v[1], v[2], v[3]]).unwrap();
//! b.add_node(&[v[1], v[4], v[5], v[2]]).unwrap();
//! b.infer_portals();
//! let mesh = b.build().unwrap();
//! assert_eq!(mesh.node_count(), 2);
//! assert_eq!(mesh.edge_count(), 1);
//! ```

use std::collections::HashMap;

use crowd_core::{Aabb, EdgeId, NodeId, ObstacleId, Vec2, VertexId};

use crate::error::{MeshError, MeshResult};
use crate::mesh::{NavMesh, NavMeshEdge, NavMeshNode};
use crate::obstacle::Obstacle;

struct RawPortal {
    nodes: (NodeId, NodeId),
    endpoints: (VertexId, VertexId),
}

struct RawObstacle {
    p0: Vec2,
    p1: Vec2,
    prev: ObstacleId,
    next: ObstacleId,
}

/// Incremental builder for [`NavMesh`].
#[derive(Default)]
pub struct NavMeshBuilder {
    vertices: Vec<Vec2>,
    elevations: Vec<f32>,
    polygons: Vec<Vec<VertexId>>,
    portals: Vec<RawPortal>,
    obstacles: Vec<RawObstacle>,
    infer: bool,
}

impl NavMeshBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a vertex at elevation 0 and return its id (sequential from 0).
    pub fn add_vertex(&mut self, pos: Vec2) -> VertexId {
        self.add_vertex_with_elevation(pos, 0.0)
    }

    /// Add a vertex with an explicit elevation, used to derive node planes.
    pub fn add_vertex_with_elevation(&mut self, pos: Vec2, z: f32) -> VertexId {
        let id = VertexId(self.vertices.len() as u32);
        self.vertices.push(pos);
        self.elevations.push(z);
        id
    }

    /// Add a convex polygon node from counter-clockwise vertex ids.
    pub fn add_node(&mut self, vertices: &[VertexId]) -> MeshResult<NodeId> {
        if vertices.len() < 3 {
            return Err(MeshError::Invalid(format!(
                "node {} has {} vertices; need at least 3",
                self.polygons.len(),
                vertices.len()
            )));
        }
        for &v in vertices {
            if v.index() >= self.vertices.len() {
                return Err(MeshError::Invalid(format!(
                    "node {} references unknown vertex {v}",
                    self.polygons.len()
                )));
            }
        }
        let id = NodeId(self.polygons.len() as u32);
        self.polygons.push(vertices.to_vec());
        Ok(id)
    }

    /// Declare a portal between `a` and `b` with endpoint vertices `va`/`vb`.
    pub fn add_portal(
        &mut self,
        a: NodeId,
        b: NodeId,
        va: VertexId,
        vb: VertexId,
    ) -> MeshResult<EdgeId> {
        for node in [a, b] {
            if node.index() >= self.polygons.len() {
                return Err(MeshError::Invalid(format!(
                    "portal references unknown node {node}"
                )));
            }
        }
        for v in [va, vb] {
            if v.index() >= self.vertices.len() {
                return Err(MeshError::Invalid(format!(
                    "portal references unknown vertex {v}"
                )));
            }
        }
        let id = EdgeId(self.portals.len() as u32);
        self.portals.push(RawPortal {
            nodes: (a, b),
            endpoints: (va, vb),
        });
        Ok(id)
    }

    /// Infer portals from polygon edges shared (as vertex pairs) by exactly
    /// two nodes.  Runs at [`build`](Self::build) time, after all nodes are
    /// in.  Explicitly added portals are kept as-is.
    pub fn infer_portals(&mut self) {
        self.infer = true;
    }

    /// Add one obstacle segment with explicit loop links.  Ids are sequential
    /// from 0, so links may point at segments added later.
    pub fn add_obstacle(
        &mut self,
        p0: Vec2,
        p1: Vec2,
        prev: ObstacleId,
        next: ObstacleId,
    ) -> ObstacleId {
        let id = ObstacleId(self.obstacles.len() as u32);
        self.obstacles.push(RawObstacle { p0, p1, prev, next });
        id
    }

    /// Add a closed obstacle loop wound counter-clockwise around the obstacle
    /// interior.  Segments and their `prev`/`next` links are derived.
    pub fn add_obstacle_loop(&mut self, corners: &[Vec2]) -> MeshResult<Vec<ObstacleId>> {
        let n = corners.len();
        if n < 2 {
            return Err(MeshError::Invalid(format!(
                "obstacle loop needs at least 2 corners, got {n}"
            )));
        }
        let base = self.obstacles.len() as u32;
        let ids: Vec<ObstacleId> = (0..n).map(|i| ObstacleId(base + i as u32)).collect();
        for i in 0..n {
            self.obstacles.push(RawObstacle {
                p0: corners[i],
                p1: corners[(i + 1) % n],
                prev: ids[(i + n - 1) % n],
                next: ids[(i + 1) % n],
            });
        }
        Ok(ids)
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn node_count(&self) -> usize {
        self.polygons.len()
    }

    /// Consume the builder and produce a [`NavMesh`].
    pub fn build(mut self) -> MeshResult<NavMesh> {
        if self.infer {
            self.run_portal_inference();
        }

        // ── Nodes: centres, bounds, planes ────────────────────────────────
        let mut nodes = Vec::with_capacity(self.polygons.len());
        for (i, poly) in self.polygons.iter().enumerate() {
            let mut center = Vec2::ZERO;
            let mut bounds = Aabb::EMPTY;
            for &v in poly {
                let p = self.vertices[v.index()];
                center += p;
                bounds.expand(p);
            }
            center = center * (1.0 / poly.len() as f32);
            let plane = derive_plane(
                [0, 1, 2].map(|k| {
                    let v = poly[k];
                    (self.vertices[v.index()], self.elevations[v.index()])
                }),
            );
            nodes.push(NavMeshNode::new(
                NodeId(i as u32),
                poly.clone(),
                center,
                bounds,
                plane,
            ));
        }

        // ── Portals: positions + node back-references ─────────────────────
        let mut edges = Vec::with_capacity(self.portals.len());
        for (i, raw) in self.portals.iter().enumerate() {
            let id = EdgeId(i as u32);
            let edge = NavMeshEdge {
                id,
                nodes: raw.nodes,
                p0: self.vertices[raw.endpoints.0.index()],
                p1: self.vertices[raw.endpoints.1.index()],
            };
            nodes[raw.nodes.0.index()].edges.push(id);
            nodes[raw.nodes.1.index()].edges.push(id);
            edges.push(edge);
        }

        // ── Obstacles: normals + node assignment ──────────────────────────
        let mut obstacles = Vec::with_capacity(self.obstacles.len());
        for (i, raw) in self.obstacles.iter().enumerate() {
            let count = self.obstacles.len();
            for (what, link) in [("prev", raw.prev), ("next", raw.next)] {
                if link.index() >= count {
                    return Err(MeshError::Invalid(format!(
                        "obstacle {i} has dangling {what} link {link}"
                    )));
                }
            }
            obstacles.push(Obstacle {
                id: ObstacleId(i as u32),
                p0: raw.p0,
                p1: raw.p1,
                normal: Obstacle::outward_normal(raw.p0, raw.p1),
                prev: raw.prev,
                next: raw.next,
            });
        }
        for obstacle in &obstacles {
            let mid = obstacle.midpoint();
            if let Some(node) = nodes
                .iter_mut()
                .find(|n| n.contains_point(&self.vertices, mid))
            {
                node.obstacles.push(obstacle.id);
            }
        }

        Ok(NavMesh::new(self.vertices, nodes, edges, obstacles))
    }

    /// Scan polygon edges for vertex pairs shared by two nodes and declare a
    /// portal for each, skipping pairs already covered explicitly.
    fn run_portal_inference(&mut self) {
        let mut declared: HashMap<(VertexId, VertexId), ()> = HashMap::new();
        for p in &self.portals {
            declared.insert(edge_key(p.endpoints.0, p.endpoints.1), ());
        }

        let mut owners: HashMap<(VertexId, VertexId), Vec<NodeId>> = HashMap::new();
        for (i, poly) in self.polygons.iter().enumerate() {
            let n = poly.len();
            for k in 0..n {
                let key = edge_key(poly[k], poly[(k + 1) % n]);
                owners.entry(key).or_default().push(NodeId(i as u32));
            }
        }

        let mut shared: Vec<((VertexId, VertexId), Vec<NodeId>)> = owners
            .into_iter()
            .filter(|(key, nodes)| nodes.len() == 2 && !declared.contains_key(key))
            .collect();
        // HashMap iteration order is arbitrary; sort for a reproducible mesh.
        shared.sort_by_key(|&((a, b), _)| (a, b));

        for ((va, vb), nodes) in shared {
            self.portals.push(RawPortal {
                nodes: (nodes[0], nodes[1]),
                endpoints: (va, vb),
            });
        }
    }
}

#[inline]
fn edge_key(a: VertexId, b: VertexId) -> (VertexId, VertexId) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Elevation plane `z = a·x + b·y + c` through three vertices.  Degenerate
/// (collinear) triples fall back to a horizontal plane at the first vertex's
/// elevation.
fn derive_plane(verts: [(Vec2, f32); 3]) -> [f32; 3] {
    let [(p1, z1), (p2, z2), (p3, z3)] = verts;
    let d = (p2.x - p1.x) * (p3.y - p1.y) - (p3.x - p1.x) * (p2.y - p1.y);
    if d.abs() < 1e-9 {
        return [0.0, 0.0, z1];
    }
    let a = ((z2 - z1) * (p3.y - p1.y) - (z3 - z1) * (p2.y - p1.y)) / d;
    let b = ((p2.x - p1.x) * (z3 - z1) - (p3.x - p1.x) * (z2 - z1)) / d;
    let c = z1 - a * p1.x - b * p1.y;
    [a, b, c]
}
