//! `crowd-record` — file export for simulation recordings.
//!
//! The simulator keeps its tick history in memory
//! ([`Recording`][crowd_sim::Recording]); this crate turns a recording (or a
//! live run, via the observer bridge) into CSV files:
//!
//! | Output                | Contents                                        |
//! |-----------------------|-------------------------------------------------|
//! | `agent_snapshots.csv` | One row per agent per tick (position, velocity, |
//! |                       | orientation, radius)                            |
//! | `tick_summaries.csv`  | One row per tick (agent count, mean speed)      |
//! | trajectory export     | The classic wide `x,y` pairs-per-line layout    |

pub mod csv_out;
pub mod error;
pub mod row;
pub mod trajectory;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use csv_out::CsvRecorder;
pub use error::{RecordError, RecordResult};
pub use row::{AgentSnapshotRow, TickSummaryRow};
pub use trajectory::write_trajectories;
