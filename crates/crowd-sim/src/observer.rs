//! Simulation observer trait for progress reporting and data collection.

use crate::recording::TickSnapshot;

/// Callbacks invoked by [`Simulator::run`][crate::Simulator::run] at key
/// points in the tick loop.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example — progress printer
///
/// ```rust,ignore
/// struct ProgressPrinter { interval: u64 }
///
/// impl SimObserver for ProgressPrinter {
///     fn on_tick_end(&mut self, tick: u64, snapshot: &TickSnapshot) {
///         if tick % self.interval == 0 {
///             println!("tick {tick}: {} agents", snapshot.agents.len());
///         }
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called immediately before a tick's phases run.
    fn on_tick_start(&mut self, _tick: u64) {}

    /// Called after a tick completes, with the snapshot just recorded.
    fn on_tick_end(&mut self, _tick: u64, _snapshot: &TickSnapshot) {}

    /// Called once after the final tick of a `run`.
    fn on_run_end(&mut self, _final_tick: u64) {}
}

/// A [`SimObserver`] that does nothing.  Use when you need to call `run` but
/// don't want callbacks.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
