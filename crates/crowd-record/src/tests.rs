//! Unit tests for crowd-record.

#[cfg(test)]
mod helpers {
    use crowd_behavior::{component_ids, OrcaComponent};
    use crowd_core::{GoalShape, SimConfig, Vec2};
    use crowd_mesh::NavMeshBuilder;
    use crowd_sim::{Simulator, SimulatorBuilder};

    /// A two-agent simulator on a single 40×40 node, run for `ticks` steps.
    pub fn recorded_sim(ticks: u64) -> Simulator {
        let mut b = NavMeshBuilder::new();
        let v: Vec<_> = [(-20.0, -20.0), (20.0, -20.0), (20.0, 20.0), (-20.0, 20.0)]
            .iter()
            .map(|&(x, y)| b.add_vertex(Vec2::new(x, y)))
            .collect();
        b.add_node(&v).unwrap();
        let mesh = b.build().unwrap();

        let mut sim = SimulatorBuilder::new()
            .config(SimConfig {
                sensitivity_radius: 2.0,
                ..SimConfig::default()
            })
            .with_nav_mesh_built(mesh)
            .with_op(OrcaComponent::new())
            .build()
            .unwrap();

        for pos in [Vec2::new(-5.0, 0.0), Vec2::new(5.0, 0.0)] {
            let a = sim
                .add_agent(
                    pos,
                    component_ids::ORCA,
                    component_ids::NAVMESH_TACTIC,
                    component_ids::NOOP_STRATEGY,
                )
                .unwrap();
            sim.set_agent_goal(a, GoalShape::Point(Vec2::new(0.0, 10.0)));
        }
        for _ in 0..ticks {
            sim.do_step();
        }
        sim
    }
}

#[cfg(test)]
mod csv_out {
    use std::fs;

    use crate::CsvRecorder;

    #[test]
    fn dumps_snapshots_and_summaries() {
        let sim = super::helpers::recorded_sim(10);
        let dir = tempfile::tempdir().unwrap();

        let recorder = CsvRecorder::new(dir.path()).unwrap();
        recorder.write_recording(sim.recording()).unwrap();

        let snapshots = fs::read_to_string(dir.path().join("agent_snapshots.csv")).unwrap();
        let lines: Vec<&str> = snapshots.lines().collect();
        // Header + 2 agents × 10 ticks.
        assert_eq!(lines.len(), 1 + 20);
        assert_eq!(
            lines[0],
            "agent_id,tick,x,y,vel_x,vel_y,orient_x,orient_y,radius"
        );
        assert!(lines[1].starts_with("0,1,"));
        assert!(lines[2].starts_with("1,1,"));

        let summaries = fs::read_to_string(dir.path().join("tick_summaries.csv")).unwrap();
        let lines: Vec<&str> = summaries.lines().collect();
        assert_eq!(lines.len(), 1 + 10);
        assert_eq!(lines[0], "tick,time_secs,agent_count,mean_speed");
        let fields: Vec<&str> = lines[1].split(',').collect();
        assert_eq!(fields[0], "1");
        assert_eq!(fields[2], "2");
        let mean_speed: f32 = fields[3].parse().unwrap();
        assert!((mean_speed - 0.05).abs() < 1e-4, "mean speed {mean_speed}");
    }

    #[test]
    fn streams_as_an_observer() {
        let mut sim = super::helpers::recorded_sim(0);
        let dir = tempfile::tempdir().unwrap();
        let mut recorder = CsvRecorder::new(dir.path()).unwrap();

        sim.run(5, &mut recorder);
        assert!(recorder.take_error().is_none());
        // on_run_end flushed; a second finish is a no-op.
        recorder.finish().unwrap();

        let snapshots = fs::read_to_string(dir.path().join("agent_snapshots.csv")).unwrap();
        assert_eq!(snapshots.lines().count(), 1 + 10);
    }
}

#[cfg(test)]
mod trajectory {
    use crate::write_trajectories;

    #[test]
    fn wide_format_has_one_line_per_tick() {
        let sim = super::helpers::recorded_sim(8);
        let mut buf = Vec::new();
        write_trajectories(sim.recording(), &mut buf).unwrap();

        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 8);
        // Two agents → four columns.
        assert_eq!(lines[0].split(',').count(), 4);
        // First agent starts left of the origin.
        assert!(lines[0].starts_with('-'));
    }
}
