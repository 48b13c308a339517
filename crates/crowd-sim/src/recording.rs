//! In-memory tick history.
//!
//! The simulator appends one [`TickSnapshot`] at the end of every tick.
//! Hosts read the history through
//! [`Simulator::recording`](crate::Simulator::recording); export lives in
//! `crowd-record`.

use crowd_core::{AgentId, Vec2};

/// One agent's state at the end of a tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AgentSnapshot {
    pub id: AgentId,
    pub pos: Vec2,
    pub vel: Vec2,
    pub orient: Vec2,
    pub radius: f32,
}

/// All agents at the end of one tick, in ascending id order.
#[derive(Clone, Debug, PartialEq)]
pub struct TickSnapshot {
    /// Tick counter after the step completed (the first step records 1).
    pub tick: u64,
    /// Simulated seconds elapsed at that point.
    pub time: f64,
    pub agents: Vec<AgentSnapshot>,
}

/// The simulator's full tick history.
#[derive(Default)]
pub struct Recording {
    ticks: Vec<TickSnapshot>,
}

impl Recording {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record(&mut self, snapshot: TickSnapshot) {
        self.ticks.push(snapshot);
    }

    /// Number of recorded ticks.
    pub fn len(&self) -> usize {
        self.ticks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ticks.is_empty()
    }

    /// Snapshot of the `i`-th recorded tick.
    pub fn tick(&self, i: usize) -> Option<&TickSnapshot> {
        self.ticks.get(i)
    }

    /// The most recent snapshot.
    pub fn latest(&self) -> Option<&TickSnapshot> {
        self.ticks.last()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TickSnapshot> {
        self.ticks.iter()
    }

    /// One agent's positions over time as `(tick, pos)` pairs.  Ticks where
    /// the agent did not exist are skipped.
    pub fn trajectory(&self, agent: AgentId) -> Vec<(u64, Vec2)> {
        self.ticks
            .iter()
            .filter_map(|t| {
                t.agents
                    .iter()
                    .find(|a| a.id == agent)
                    .map(|a| (t.tick, a.pos))
            })
            .collect()
    }
}
