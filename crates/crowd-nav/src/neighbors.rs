//! Fixed-radius nearest-neighbour index over a uniform grid.
//!
//! Rebuilt from scratch every tick; holds no state across ticks.
//!
//! # Algorithm
//!
//! 1. Compute the bounding box of all positions (running max seeded with
//!    `-∞`, so all-negative coordinate sets work).
//! 2. Translate by `-min` so every coordinate is non-negative.
//! 3. Bucket agents into square cells of side `radius`.
//! 4. For each agent, test candidates from its cell and the 8 surrounding
//!    cells; emit those with `0 < distance ≤ radius`.
//!
//! # Determinism
//!
//! Candidate cells are scanned in fixed row-major order and cell contents
//! preserve input order, so identical inputs produce identical neighbour
//! lists — with or without the `parallel` feature, which only fans the
//! per-agent queries out and collects them back in input order.

use std::collections::HashMap;

use crowd_core::{Aabb, AgentId, Vec2};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Per-tick neighbour sets: each registered agent maps to the agents within
/// the sensitivity radius (unordered semantics, self excluded).
#[derive(Debug, Default)]
pub struct NeighborIndex {
    sets: HashMap<AgentId, Vec<AgentId>>,
}

impl NeighborIndex {
    /// An index with no agents at all.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build the index for `agents` (id/position pairs) and a sensitivity
    /// `radius`.
    ///
    /// Zero agents produce an empty map; `radius ≤ 0` produces an empty
    /// neighbour set for every agent.
    pub fn build(agents: &[(AgentId, Vec2)], radius: f32) -> Self {
        if agents.is_empty() {
            return Self::empty();
        }
        if radius <= 0.0 {
            return Self {
                sets: agents.iter().map(|&(id, _)| (id, Vec::new())).collect(),
            };
        }

        // Bounding box and grid bucketing.
        let mut bounds = Aabb::EMPTY;
        for &(_, pos) in agents {
            bounds.expand(pos);
        }
        let origin = bounds.min;

        let mut cells: HashMap<(i64, i64), Vec<usize>> = HashMap::new();
        for (i, &(_, pos)) in agents.iter().enumerate() {
            cells.entry(cell_of(pos, origin, radius)).or_default().push(i);
        }

        let query = |i: usize| -> (AgentId, Vec<AgentId>) {
            let (id, pos) = agents[i];
            let (cx, cy) = cell_of(pos, origin, radius);
            let r_sq = radius * radius;
            let mut found = Vec::new();
            for dy in -1..=1 {
                for dx in -1..=1 {
                    let Some(bucket) = cells.get(&(cx + dx, cy + dy)) else {
                        continue;
                    };
                    for &j in bucket {
                        if j == i {
                            continue;
                        }
                        let (other_id, other_pos) = agents[j];
                        let d_sq = pos.distance_squared(other_pos);
                        if d_sq > 0.0 && d_sq <= r_sq {
                            found.push(other_id);
                        }
                    }
                }
            }
            (id, found)
        };

        #[cfg(not(feature = "parallel"))]
        let sets = (0..agents.len()).map(query).collect();

        #[cfg(feature = "parallel")]
        let sets = (0..agents.len())
            .into_par_iter()
            .map(query)
            .collect::<Vec<_>>()
            .into_iter()
            .collect();

        Self { sets }
    }

    /// The neighbours of `agent`; empty for unknown agents.
    pub fn neighbors_of(&self, agent: AgentId) -> &[AgentId] {
        self.sets.get(&agent).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of agents the index was built over.
    pub fn agent_count(&self) -> usize {
        self.sets.len()
    }
}

#[inline]
fn cell_of(pos: Vec2, origin: Vec2, radius: f32) -> (i64, i64) {
    let shifted = pos - origin;
    ((shifted.x / radius) as i64, (shifted.y / radius) as i64)
}
