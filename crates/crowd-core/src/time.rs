//! Simulation time model and run configuration.
//!
//! # Design
//!
//! Time is a monotonically increasing tick counter; one tick advances the
//! simulation by a fixed `time_step` in seconds.  Keeping the counter as an
//! integer makes "how many ticks have run" exact and comparisons O(1); the
//! fractional simulated time is derived on demand.

use std::fmt;

// ── SimClock ──────────────────────────────────────────────────────────────────

/// Monotonic simulation clock: tick counter plus the fixed step duration.
///
/// Cheap to copy; holds no heap data.
#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimClock {
    /// Seconds advanced per tick.
    pub time_step: f32,
    /// Ticks completed since the simulation started.
    pub current_tick: u64,
}

impl SimClock {
    pub fn new(time_step: f32) -> Self {
        Self {
            time_step,
            current_tick: 0,
        }
    }

    /// Advance the clock by one tick.
    #[inline]
    pub fn advance(&mut self) {
        self.current_tick += 1;
    }

    /// Simulated seconds elapsed since tick 0.
    #[inline]
    pub fn elapsed_secs(&self) -> f64 {
        self.current_tick as f64 * self.time_step as f64
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{} ({:.2}s)", self.current_tick, self.elapsed_secs())
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Top-level simulation configuration.
///
/// Every field has a sensible default; hosts typically override only the
/// fields they care about:
///
/// ```
/// use crowd_core::SimConfig;
///
/// let config = SimConfig {
///     sensitivity_radius: 2.0,
///     ..SimConfig::default()
/// };
/// assert_eq!(config.time_step, 0.1);
/// ```
#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimConfig {
    /// Seconds per tick.
    pub time_step: f32,

    /// Cutoff distance for the neighbour index.  Agents further apart than
    /// this never see each other.  Non-positive values disable neighbour
    /// detection entirely.
    pub sensitivity_radius: f32,

    /// Cosine of the half-angle of the heading-deviation cone applied to
    /// preferred directions.  The default `cos(π) = -1` permits any heading.
    pub heading_dev_cos: f32,

    /// Quantisation step for the route cache's width key.  Requested clearance
    /// widths are rounded up to the next multiple before planning, so nearby
    /// widths share one cached route.
    pub route_width_bucket: f32,
}

impl SimConfig {
    /// Construct a `SimClock` pre-configured for this run.
    pub fn make_clock(&self) -> SimClock {
        SimClock::new(self.time_step)
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            time_step: 0.1,
            sensitivity_radius: 1.0,
            heading_dev_cos: -1.0,
            route_width_bucket: 0.05,
        }
    }
}
