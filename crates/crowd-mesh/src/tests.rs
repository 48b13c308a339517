//! Unit tests for crowd-mesh.
//!
//! All tests use hand-crafted meshes so they run without any mesh file.

#[cfg(test)]
mod helpers {
    use crowd_core::Vec2;

    use crate::{NavMesh, NavMeshBuilder};

    /// A 40×40 square centred at the origin, split into four 20×20 quads.
    ///
    /// Vertex grid (x, y ∈ {-20, 0, 20}):
    ///
    /// ```text
    ///   6 ─ 7 ─ 8          nodes:  2 │ 3
    ///   3 ─ 4 ─ 5                  ──┼──
    ///   0 ─ 1 ─ 2                  0 │ 1
    /// ```
    ///
    /// Portal inference yields 4 portals, all of width 20.
    pub fn square_mesh() -> NavMesh {
        let mut b = NavMeshBuilder::new();
        let mut v = Vec::new();
        for y in [-20.0, 0.0, 20.0] {
            for x in [-20.0, 0.0, 20.0] {
                v.push(b.add_vertex(Vec2::new(x, y)));
            }
        }
        b.add_node(&[v[0], v[1], v[4], v[3]]).unwrap(); // SW
        b.add_node(&[v[1], v[2], v[5], v[4]]).unwrap(); // SE
        b.add_node(&[v[3], v[4], v[7], v[6]]).unwrap(); // NW
        b.add_node(&[v[4], v[5], v[8], v[7]]).unwrap(); // NE
        b.infer_portals();
        b.build().unwrap()
    }

    /// An L-shaped corridor: A = (0,0)-(10,10), B = (10,0)-(20,10),
    /// C = (10,10)-(20,20).  The inner corner sits at (10, 10).
    pub fn l_corridor() -> NavMesh {
        let mut b = NavMeshBuilder::new();
        let p = |b: &mut NavMeshBuilder, x: f32, y: f32| b.add_vertex(Vec2::new(x, y));
        let a0 = p(&mut b, 0.0, 0.0);
        let a1 = p(&mut b, 10.0, 0.0);
        let a2 = p(&mut b, 10.0, 10.0);
        let a3 = p(&mut b, 0.0, 10.0);
        let b1 = p(&mut b, 20.0, 0.0);
        let b2 = p(&mut b, 20.0, 10.0);
        let c2 = p(&mut b, 20.0, 20.0);
        let c3 = p(&mut b, 10.0, 20.0);
        b.add_node(&[a0, a1, a2, a3]).unwrap(); // A
        b.add_node(&[a1, b1, b2, a2]).unwrap(); // B
        b.add_node(&[a2, b2, c2, c3]).unwrap(); // C
        b.infer_portals();
        b.build().unwrap()
    }
}

// ── Builder ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod builder {
    use crowd_core::{NodeId, ObstacleId, Vec2};

    use crate::{MeshError, NavMeshBuilder};

    #[test]
    fn node_needs_three_vertices() {
        let mut b = NavMeshBuilder::new();
        let v0 = b.add_vertex(Vec2::ZERO);
        let v1 = b.add_vertex(Vec2::UNIT_X);
        assert!(matches!(b.add_node(&[v0, v1]), Err(MeshError::Invalid(_))));
    }

    #[test]
    fn node_rejects_unknown_vertex() {
        let mut b = NavMeshBuilder::new();
        let v0 = b.add_vertex(Vec2::ZERO);
        let v1 = b.add_vertex(Vec2::UNIT_X);
        let bogus = crowd_core::VertexId(99);
        assert!(b.add_node(&[v0, v1, bogus]).is_err());
    }

    #[test]
    fn portal_inference_finds_shared_edges() {
        let mesh = super::helpers::square_mesh();
        assert_eq!(mesh.node_count(), 4);
        assert_eq!(mesh.edge_count(), 4);
        // Every portal in the square mesh has width 20.
        for i in 0..mesh.edge_count() {
            let e = mesh.edge(crowd_core::EdgeId(i as u32)).unwrap();
            assert!((e.width() - 20.0).abs() < 1e-5);
        }
    }

    #[test]
    fn node_centers_and_bounds() {
        let mesh = super::helpers::square_mesh();
        let n0 = mesh.node(NodeId(0)).unwrap();
        assert_eq!(n0.center, Vec2::new(-10.0, -10.0));
        assert_eq!(n0.bounds.min, Vec2::new(-20.0, -20.0));
        assert_eq!(n0.bounds.max, Vec2::new(0.0, 0.0));
        assert_eq!(mesh.bounds().min, Vec2::new(-20.0, -20.0));
        assert_eq!(mesh.bounds().max, Vec2::new(20.0, 20.0));
    }

    #[test]
    fn obstacle_loop_links_wrap() {
        let mut b = NavMeshBuilder::new();
        let v: Vec<_> = [(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)]
            .iter()
            .map(|&(x, y)| b.add_vertex(Vec2::new(x, y)))
            .collect();
        b.add_node(&[v[0], v[1], v[2], v[3]]).unwrap();
        let ids = b
            .add_obstacle_loop(&[
                Vec2::new(4.0, 4.0),
                Vec2::new(6.0, 4.0),
                Vec2::new(5.0, 6.0),
            ])
            .unwrap();
        let mesh = b.build().unwrap();
        assert_eq!(ids.len(), 3);
        let first = mesh.obstacle(ids[0]).unwrap();
        assert_eq!(first.prev, ids[2]);
        assert_eq!(first.next, ids[1]);
        // The loop's segments land in the containing node.
        assert_eq!(mesh.node(NodeId(0)).unwrap().obstacles.len(), 3);
        // Normals are unit length.
        assert!((first.normal.length() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn dangling_obstacle_link_is_rejected() {
        let mut b = NavMeshBuilder::new();
        let v: Vec<_> = [(0.0, 0.0), (1.0, 0.0), (1.0, 1.0)]
            .iter()
            .map(|&(x, y)| b.add_vertex(Vec2::new(x, y)))
            .collect();
        b.add_node(&v).unwrap();
        b.add_obstacle(Vec2::ZERO, Vec2::UNIT_X, ObstacleId(5), ObstacleId(0));
        assert!(matches!(b.build(), Err(MeshError::Invalid(_))));
    }

    #[test]
    fn elevation_plane_from_sloped_vertices() {
        // z = x over the polygon → plane (1, 0, 0).
        let mut b = NavMeshBuilder::new();
        let v: Vec<_> = [(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)]
            .iter()
            .map(|&(x, y): &(f32, f32)| b.add_vertex_with_elevation(Vec2::new(x, y), x))
            .collect();
        b.add_node(&v).unwrap();
        let mesh = b.build().unwrap();
        let z = mesh.elevation(NodeId(0), Vec2::new(3.0, 7.0)).unwrap();
        assert!((z - 3.0).abs() < 1e-5);
        let grad = mesh.node(NodeId(0)).unwrap().gradient();
        assert!((grad - Vec2::UNIT_X).length() < 1e-5);
    }
}

// ── Point location ────────────────────────────────────────────────────────────

#[cfg(test)]
mod location {
    use crowd_core::{NodeId, Vec2};

    #[test]
    fn blind_scan_finds_containing_node() {
        let mesh = super::helpers::square_mesh();
        assert_eq!(mesh.node_at(Vec2::new(-10.0, -10.0)), NodeId(0));
        assert_eq!(mesh.node_at(Vec2::new(10.0, -10.0)), NodeId(1));
        assert_eq!(mesh.node_at(Vec2::new(-10.0, 10.0)), NodeId(2));
        assert_eq!(mesh.node_at(Vec2::new(10.0, 10.0)), NodeId(3));
        assert_eq!(mesh.node_at(Vec2::new(100.0, 100.0)), NodeId::INVALID);
    }

    #[test]
    fn boundary_points_resolve_to_lowest_id() {
        let mesh = super::helpers::square_mesh();
        // The exact centre lies on all four nodes; the blind scan picks the
        // first containing node.
        assert_eq!(mesh.node_at(Vec2::ZERO), NodeId(0));
    }

    #[test]
    fn tombstoned_nodes_are_skipped() {
        let mut mesh = super::helpers::square_mesh();
        assert!(mesh.remove_node(NodeId(0)));
        assert!(!mesh.remove_node(NodeId(0))); // already tombstoned
        assert_eq!(mesh.active_node_count(), 3);
        // Deep interior of node 0 is now "off-mesh".
        assert_eq!(mesh.node_at(Vec2::new(-10.0, -10.0)), NodeId::INVALID);
        // The shared centre now resolves to the next live node.
        assert_eq!(mesh.node_at(Vec2::ZERO), NodeId(1));
    }

    #[test]
    fn closest_center_snaps_outside_points() {
        let mesh = super::helpers::square_mesh();
        let (node, center) = mesh.closest_node_center(Vec2::new(100.0, 100.0)).unwrap();
        assert_eq!(node, NodeId(3));
        assert_eq!(center, Vec2::new(10.0, 10.0));
    }

    #[test]
    fn closest_center_tie_breaks_to_lowest_id() {
        let mesh = super::helpers::square_mesh();
        // The origin is equidistant from all four centres.
        let (node, _) = mesh.closest_node_center(Vec2::ZERO).unwrap();
        assert_eq!(node, NodeId(0));
    }

    #[test]
    fn closest_center_skips_tombstones() {
        let mut mesh = super::helpers::square_mesh();
        mesh.remove_node(NodeId(3));
        let (node, _) = mesh.closest_node_center(Vec2::new(100.0, 100.0)).unwrap();
        assert_ne!(node, NodeId(3));
    }
}

// ── ASCII loader ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod ascii {
    use crowd_core::{NodeId, Vec2};

    use crate::ascii::load_reader;
    use crate::MeshError;

    const TWO_SQUARES: &str = "\
crowdmesh
# two unit squares sharing the edge (1,0)-(1,1)
vertices 6
0 0
1 0 0.5
1 1
0 1
2 0
2 1
nodes 2
4 0 1 2 3
4 1 4 5 2
portals 1
0 1 1 2
obstacles 0
";

    #[test]
    fn loads_two_square_mesh() {
        let mesh = load_reader(TWO_SQUARES.as_bytes()).unwrap();
        assert_eq!(mesh.vertex_count(), 6);
        assert_eq!(mesh.node_count(), 2);
        assert_eq!(mesh.edge_count(), 1);
        assert_eq!(mesh.node_at(Vec2::new(0.5, 0.5)), NodeId(0));
        assert_eq!(mesh.node_at(Vec2::new(1.5, 0.5)), NodeId(1));
        let edge = mesh.edge(crowd_core::EdgeId(0)).unwrap();
        assert!((edge.width() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn rejects_bad_magic() {
        let err = load_reader("roadmesh\nvertices 0\n".as_bytes()).unwrap_err();
        assert!(matches!(err, MeshError::Parse { line: 1, .. }));
    }

    #[test]
    fn reports_line_of_bad_vertex() {
        let text = "crowdmesh\nvertices 1\n0 zero\nnodes 0\nportals 0\nobstacles 0\n";
        let err = load_reader(text.as_bytes()).unwrap_err();
        assert!(matches!(err, MeshError::Parse { line: 3, .. }), "{err}");
    }

    #[test]
    fn truncated_file_is_an_error() {
        let err = load_reader("crowdmesh\nvertices 2\n0 0\n".as_bytes()).unwrap_err();
        assert!(matches!(err, MeshError::Parse { .. }));
    }
}

// ── Localizer ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod localizer {
    use std::sync::Arc;

    use crowd_core::{AgentId, NodeId, Vec2};

    use crate::NavMeshLocalizer;

    fn localizer() -> NavMeshLocalizer {
        NavMeshLocalizer::new(Arc::new(super::helpers::square_mesh()), 0.05)
    }

    #[test]
    fn cascade_stays_in_known_node() {
        let loc = localizer();
        assert_eq!(loc.locate(Vec2::new(-5.0, -5.0), NodeId(0)), NodeId(0));
    }

    #[test]
    fn cascade_checks_neighbors_then_blind() {
        let loc = localizer();
        // Moved from node 0 into adjacent node 1.
        assert_eq!(loc.locate(Vec2::new(10.0, -10.0), NodeId(0)), NodeId(1));
        // Moved from node 0 into the diagonal node 3 (not portal-adjacent):
        // only the blind scan finds it.
        assert_eq!(loc.test_neighbors(NodeId(0), Vec2::new(10.0, 10.0)), NodeId::INVALID);
        assert_eq!(loc.locate(Vec2::new(10.0, 10.0), NodeId(0)), NodeId(3));
    }

    #[test]
    fn cascade_reports_off_mesh() {
        let loc = localizer();
        assert_eq!(loc.locate(Vec2::new(50.0, 0.0), NodeId(1)), NodeId::INVALID);
    }

    #[test]
    fn update_agent_position_is_idempotent() {
        let mut loc = localizer();
        let a = AgentId(0);
        loc.update_agent_position(a, NodeId::INVALID, NodeId(0));
        loc.update_agent_position(a, NodeId(0), NodeId(0));
        loc.update_agent_position(a, NodeId(0), NodeId(0));
        assert_eq!(loc.node_of(a), NodeId(0));
        assert_eq!(loc.agents_in_node(NodeId(0)).collect::<Vec<_>>(), vec![a]);
    }

    #[test]
    fn occupancy_follows_moves() {
        let mut loc = localizer();
        let a = AgentId(0);
        let b = AgentId(1);
        loc.update_agent_position(a, NodeId::INVALID, NodeId(0));
        loc.update_agent_position(b, NodeId::INVALID, NodeId(0));
        loc.update_agent_position(a, NodeId(0), NodeId(1));
        assert_eq!(loc.agents_in_node(NodeId(0)).collect::<Vec<_>>(), vec![b]);
        assert_eq!(loc.agents_in_node(NodeId(1)).collect::<Vec<_>>(), vec![a]);

        loc.remove_agent(b);
        assert_eq!(loc.agents_in_node(NodeId(0)).count(), 0);
        assert_eq!(loc.node_of(b), NodeId::INVALID);
    }

    #[test]
    fn closest_available_point_snaps() {
        let loc = localizer();
        // On-mesh points come back unchanged.
        let p = Vec2::new(3.0, 3.0);
        assert_eq!(loc.closest_available_point(p), p);
        // Off-mesh points snap to the nearest node centre.
        let snapped = loc.closest_available_point(Vec2::new(100.0, 100.0));
        assert_eq!(snapped, Vec2::new(10.0, 10.0));
    }
}

// ── Planner ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod planner {
    use std::sync::Arc;

    use crowd_core::{NodeId, Vec2};

    use crate::{MeshError, NavMeshBuilder, PathPlanner};

    fn planner() -> PathPlanner {
        PathPlanner::new(Arc::new(super::helpers::square_mesh()), 0.05)
    }

    #[test]
    fn same_node_route_is_empty() {
        let mut p = planner();
        let route = p.route(NodeId(0), NodeId(0), 0.38).unwrap();
        assert!(route.is_empty());
        assert_eq!(route.source, NodeId(0));
        assert_eq!(route.destination, NodeId(0));
    }

    #[test]
    fn diagonal_route_crosses_two_portals() {
        let mut p = planner();
        let route = p.route(NodeId(0), NodeId(3), 0.38).unwrap();
        assert_eq!(route.len(), 2);
        // Both corners cost the same; the deterministic tie-break settles the
        // lower node id (1) first, so the route runs SW → SE → NE.
        assert_eq!(route.node_before(0), NodeId(0));
        assert_eq!(route.node_before(1), NodeId(1));
        assert_eq!(route.node_before(2), NodeId(3));
    }

    #[test]
    fn portal_orientation_matches_travel_direction() {
        let mut p = planner();
        let route = p.route(NodeId(0), NodeId(1), 0.38).unwrap();
        let portal = route.portals[0];
        // Travelling +x through the portal on x = 0: left endpoint has the
        // larger y.
        assert!(portal.left.y > portal.right.y);
        let dir = Vec2::UNIT_X;
        assert!(dir.det(portal.left - Vec2::new(-10.0, -10.0)) > 0.0);
    }

    #[test]
    fn cache_returns_same_route() {
        let mut p = planner();
        let a = p.route(NodeId(0), NodeId(3), 0.38).unwrap();
        let b = p.route(NodeId(0), NodeId(3), 0.38).unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(p.cached_route_count(), 1);
        // An unrelated query does not disturb the cached entry.
        let _ = p.route(NodeId(1), NodeId(2), 0.38).unwrap();
        let c = p.route(NodeId(0), NodeId(3), 0.38).unwrap();
        assert!(Arc::ptr_eq(&a, &c));
    }

    #[test]
    fn widths_in_same_bucket_share_a_route() {
        let mut p = planner();
        let a = p.route(NodeId(0), NodeId(1), 0.041).unwrap();
        let b = p.route(NodeId(0), NodeId(1), 0.050).unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        let c = p.route(NodeId(0), NodeId(1), 0.051).unwrap();
        assert!(!Arc::ptr_eq(&a, &c));
    }

    #[test]
    fn narrow_portal_blocks_wide_agents() {
        // Two squares joined by a portal of width 0.5.
        let mut b = NavMeshBuilder::new();
        let v: Vec<_> = [
            (0.0, 0.0),
            (1.0, 0.0),
            (1.0, 0.5), // narrow portal top
            (1.0, 1.0),
            (0.0, 1.0),
            (2.0, 0.0),
            (2.0, 1.0),
        ]
        .iter()
        .map(|&(x, y)| b.add_vertex(Vec2::new(x, y)))
        .collect();
        b.add_node(&[v[0], v[1], v[2], v[3], v[4]]).unwrap();
        b.add_node(&[v[1], v[5], v[6], v[3], v[2]]).unwrap();
        b.add_portal(NodeId(0), NodeId(1), v[1], v[2]).unwrap();
        let mut p = PathPlanner::new(Arc::new(b.build().unwrap()), 0.05);

        assert!(p.route(NodeId(0), NodeId(1), 0.4).is_ok());
        let err = p.route(NodeId(0), NodeId(1), 0.8).unwrap_err();
        assert!(matches!(err, MeshError::NoRoute { .. }));
        // The failure is not cached: a narrower request still succeeds.
        assert!(p.route(NodeId(0), NodeId(1), 0.3).is_ok());
    }

    #[test]
    fn unknown_nodes_are_rejected() {
        let mut p = planner();
        assert!(matches!(
            p.route(NodeId(0), NodeId(99), 0.38),
            Err(MeshError::NodeNotFound(_))
        ));
    }
}

// ── Portal path ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod path {
    use std::sync::Arc;

    use crowd_core::{Goal, GoalId, GoalShape, NodeId, Vec2};

    use crate::{NavMeshLocalizer, PortalPath};

    fn path_on_square(
        from: NodeId,
        goal_shape: GoalShape,
        radius: f32,
    ) -> (PortalPath, NavMeshLocalizer) {
        let mut loc = NavMeshLocalizer::new(Arc::new(super::helpers::square_mesh()), 0.05);
        let goal = Goal::new(GoalId(0), goal_shape);
        let goal_node = loc.find_node_blind(goal.centroid());
        let route = loc
            .planner()
            .route(from, goal_node, 2.0 * radius)
            .unwrap();
        (PortalPath::new(goal, route, radius), loc)
    }

    #[test]
    fn funnel_finds_inner_corner() {
        let mut loc = NavMeshLocalizer::new(Arc::new(super::helpers::l_corridor()), 0.05);
        let goal = Goal::new(GoalId(0), GoalShape::Point(Vec2::new(15.0, 18.0)));
        let route = loc.planner().route(NodeId(0), NodeId(2), 0.0).unwrap();
        let mut path = PortalPath::new(goal, route, 0.0);

        let dir = path.preferred_direction(Vec2::new(2.0, 5.0), Vec2::UNIT_X, -1.0);
        // The corridor bends around (10, 10); the waypoint is that corner.
        assert_eq!(path.waypoint(), Some(Vec2::new(10.0, 10.0)));
        let expected = (Vec2::new(10.0, 10.0) - Vec2::new(2.0, 5.0)).normalize_or_zero();
        assert!((dir - expected).length() < 1e-5);
    }

    #[test]
    fn straight_corridor_aims_at_goal() {
        let (mut path, _loc) =
            path_on_square(NodeId(0), GoalShape::Point(Vec2::new(10.0, -10.0)), 0.19);
        let pos = Vec2::new(-10.0, -10.0);
        let dir = path.preferred_direction(pos, Vec2::UNIT_X, -1.0);
        assert!((dir - Vec2::UNIT_X).length() < 1e-4);
    }

    #[test]
    fn heading_cone_clamps_reversals() {
        let (mut path, _loc) =
            path_on_square(NodeId(0), GoalShape::Point(Vec2::new(10.0, -10.0)), 0.19);
        // Goal is at +x but the agent faces -x with a 90° half-angle cone:
        // the direction is clamped onto the cone edge.
        let pos = Vec2::new(-10.0, -10.0);
        let dir = path.preferred_direction(pos, -Vec2::UNIT_X, 0.0);
        assert!(dir.dot(-Vec2::UNIT_X).abs() < 1e-4, "clamped to the cone edge");
    }

    #[test]
    fn crossing_portals_advances_monotonically() {
        let (mut path, mut loc) =
            path_on_square(NodeId(0), GoalShape::Point(Vec2::new(10.0, 10.0)), 0.19);
        assert_eq!(path.current_portal(), 0);

        // In the source node.
        assert_eq!(path.update_location(Vec2::new(-10.0, -10.0), &mut loc), NodeId(0));
        assert_eq!(path.current_portal(), 0);

        // Crossed into SE.
        assert_eq!(path.update_location(Vec2::new(5.0, -10.0), &mut loc), NodeId(1));
        assert_eq!(path.current_portal(), 1);

        // Wobble back toward the portal: the index must not rewind.
        assert_eq!(path.update_location(Vec2::new(0.5, -10.0), &mut loc), NodeId(1));
        assert_eq!(path.current_portal(), 1);

        // Crossed into NE (the destination).
        assert_eq!(path.update_location(Vec2::new(10.0, 5.0), &mut loc), NodeId(3));
        assert_eq!(path.current_portal(), 2);
    }

    #[test]
    fn goal_containment_marks_done() {
        let (mut path, mut loc) = path_on_square(
            NodeId(0),
            GoalShape::Disk {
                center: Vec2::new(-10.0, -10.0),
                radius: 3.0,
            },
            0.19,
        );
        assert!(!path.is_done());
        path.update_location(Vec2::new(-10.0, -8.0), &mut loc);
        assert!(path.is_done());
        assert_eq!(
            path.preferred_direction(Vec2::new(-10.0, -8.0), Vec2::UNIT_X, -1.0),
            Vec2::ZERO
        );
    }

    #[test]
    fn teleport_ahead_resyncs_onto_route() {
        let (mut path, mut loc) =
            path_on_square(NodeId(0), GoalShape::Point(Vec2::new(10.0, 10.0)), 0.19);
        // Jump straight into the destination node without crossing portals in
        // order; the localizer finds NE and the path resyncs.
        let node = path.update_location(Vec2::new(15.0, 15.0), &mut loc);
        assert_eq!(node, NodeId(3));
        assert_eq!(path.current_node(), NodeId(3));
    }

    #[test]
    fn straying_off_route_replans() {
        let (mut path, mut loc) =
            path_on_square(NodeId(0), GoalShape::Point(Vec2::new(10.0, 10.0)), 0.19);
        let before = Arc::clone(path.route());
        // The planned route is SW → SE → NE; drift into NW instead.
        let node = path.update_location(Vec2::new(-10.0, 10.0), &mut loc);
        assert_eq!(node, NodeId(2));
        assert!(!Arc::ptr_eq(&before, path.route()));
        assert_eq!(path.route().source, NodeId(2));
        assert_eq!(path.route().destination, NodeId(3));
    }

    #[test]
    fn off_mesh_position_reports_invalid_and_keeps_route() {
        let (mut path, mut loc) =
            path_on_square(NodeId(0), GoalShape::Point(Vec2::new(10.0, 10.0)), 0.19);
        let before = Arc::clone(path.route());
        let node = path.update_location(Vec2::new(500.0, 0.0), &mut loc);
        assert_eq!(node, NodeId::INVALID);
        assert!(Arc::ptr_eq(&before, path.route()));
    }
}
