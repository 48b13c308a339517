//! Wide-format trajectory export.
//!
//! One line per tick, one `x,y` pair per agent, matching the layout the
//! original embedding host dumped as `traj.csv` for plotting:
//!
//! ```text
//! x0,y0,x1,y1,...  # tick 1
//! x0,y0,x1,y1,...  # tick 2
//! ```
//!
//! Agents appear in ascending id order.  Ticks where the population changed
//! simply have a different number of columns; plotting tools that assume a
//! fixed population should export only runs without mid-run registration.

use std::io::Write;

use crowd_sim::Recording;

use crate::error::RecordResult;

/// Write `recording` to `out` in wide trajectory format.
pub fn write_trajectories<W: Write>(recording: &Recording, out: &mut W) -> RecordResult<()> {
    let mut writer = csv::WriterBuilder::new().flexible(true).from_writer(out);
    for tick in recording.iter() {
        if tick.agents.is_empty() {
            continue;
        }
        let mut fields = Vec::with_capacity(tick.agents.len() * 2);
        for agent in &tick.agents {
            fields.push(agent.pos.x.to_string());
            fields.push(agent.pos.y.to_string());
        }
        writer.write_record(&fields)?;
    }
    writer.flush()?;
    Ok(())
}
