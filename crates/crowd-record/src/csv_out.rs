//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `agent_snapshots.csv`
//! - `tick_summaries.csv`
//!
//! Use [`CsvRecorder::write_recording`] to dump a finished
//! [`Recording`][crowd_sim::Recording] in one call, or attach the recorder
//! as a [`SimObserver`] to stream rows while the simulation runs.  Observer
//! callbacks cannot return errors, so streaming failures are stored and
//! retrieved afterwards with [`take_error`](CsvRecorder::take_error).

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crowd_sim::{Recording, SimObserver, TickSnapshot};

use crate::error::{RecordError, RecordResult};
use crate::row::{AgentSnapshotRow, TickSummaryRow};

/// Writes simulation recordings to two CSV files.
pub struct CsvRecorder {
    snapshots: Writer<File>,
    summaries: Writer<File>,
    last_error: Option<RecordError>,
    finished: bool,
}

impl CsvRecorder {
    /// Open (or create) the two CSV files in `dir` and write header rows.
    pub fn new(dir: &Path) -> RecordResult<Self> {
        let mut snapshots = Writer::from_path(dir.join("agent_snapshots.csv"))?;
        snapshots.write_record([
            "agent_id", "tick", "x", "y", "vel_x", "vel_y", "orient_x", "orient_y", "radius",
        ])?;

        let mut summaries = Writer::from_path(dir.join("tick_summaries.csv"))?;
        summaries.write_record(["tick", "time_secs", "agent_count", "mean_speed"])?;

        Ok(Self {
            snapshots,
            summaries,
            last_error: None,
            finished: false,
        })
    }

    /// Write every tick of `recording` and flush.
    pub fn write_recording(mut self, recording: &Recording) -> RecordResult<()> {
        for tick in recording.iter() {
            self.write_tick(tick)?;
        }
        self.finish()
    }

    /// Take the stored streaming error (if any) after a `run` completes.
    pub fn take_error(&mut self) -> Option<RecordError> {
        self.last_error.take()
    }

    /// Flush both files.  Idempotent.
    pub fn finish(&mut self) -> RecordResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.snapshots.flush()?;
        self.summaries.flush()?;
        Ok(())
    }

    fn write_tick(&mut self, tick: &TickSnapshot) -> RecordResult<()> {
        for agent in &tick.agents {
            let row = AgentSnapshotRow {
                agent_id: agent.id.0,
                tick: tick.tick,
                x: agent.pos.x,
                y: agent.pos.y,
                vel_x: agent.vel.x,
                vel_y: agent.vel.y,
                orient_x: agent.orient.x,
                orient_y: agent.orient.y,
                radius: agent.radius,
            };
            self.snapshots.write_record(&[
                row.agent_id.to_string(),
                row.tick.to_string(),
                row.x.to_string(),
                row.y.to_string(),
                row.vel_x.to_string(),
                row.vel_y.to_string(),
                row.orient_x.to_string(),
                row.orient_y.to_string(),
                row.radius.to_string(),
            ])?;
        }

        let mean_speed = if tick.agents.is_empty() {
            0.0
        } else {
            tick.agents.iter().map(|a| a.vel.length()).sum::<f32>() / tick.agents.len() as f32
        };
        let summary = TickSummaryRow {
            tick: tick.tick,
            time_secs: tick.time,
            agent_count: tick.agents.len(),
            mean_speed,
        };
        self.summaries.write_record(&[
            summary.tick.to_string(),
            summary.time_secs.to_string(),
            summary.agent_count.to_string(),
            summary.mean_speed.to_string(),
        ])?;
        Ok(())
    }

    fn store_err(&mut self, result: RecordResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl SimObserver for CsvRecorder {
    fn on_tick_end(&mut self, _tick: u64, snapshot: &TickSnapshot) {
        let result = self.write_tick(snapshot);
        self.store_err(result);
    }

    fn on_run_end(&mut self, _final_tick: u64) {
        let result = self.finish();
        self.store_err(result);
    }
}
