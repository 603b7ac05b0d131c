//! Scene time model.
//!
//! # Design
//!
//! Time is a monotonically increasing `Tick` counter advanced once per frame
//! callback.  `SimClock` maps ticks to seconds at a fixed rate:
//!
//!   elapsed_secs = tick / tick_rate_hz
//!
//! Using an integer tick as the canonical time unit keeps all deferred-event
//! arithmetic exact.  Durations given in seconds (idle dwell, routine holds)
//! are converted with [`SimClock::ticks_for_secs`], which rounds up so an
//! event never fires early.

use std::fmt;

use crate::{DioError, DioResult};

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute scene tick counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// Return the tick `n` steps after `self`, saturating at `u64::MAX`.
    #[inline]
    pub fn offset(self, n: u64) -> Tick {
        Tick(self.0.saturating_add(n))
    }
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u64) -> Tick {
        self.offset(rhs)
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// Converts between tick counts and seconds at a fixed frame rate.
#[derive(Clone, Debug)]
pub struct SimClock {
    /// Ticks per second.  Default: 60 (one tick per display refresh).
    pub tick_rate_hz: u32,
    /// The current tick, advanced by [`SimClock::advance`] each frame.
    pub current_tick: Tick,
}

impl SimClock {
    pub fn new(tick_rate_hz: u32) -> Self {
        Self {
            tick_rate_hz: tick_rate_hz.max(1),
            current_tick: Tick::ZERO,
        }
    }

    #[inline]
    pub fn advance(&mut self) {
        self.current_tick = self.current_tick + 1;
    }

    /// Elapsed seconds since tick 0.
    #[inline]
    pub fn elapsed_secs(&self) -> f64 {
        self.secs_at(self.current_tick)
    }

    /// Seconds at which `tick` starts.
    #[inline]
    pub fn secs_at(&self, tick: Tick) -> f64 {
        tick.0 as f64 / self.tick_rate_hz as f64
    }

    /// How many ticks span `secs` seconds?  Rounds up; negative or NaN
    /// durations count as zero.
    pub fn ticks_for_secs(&self, secs: f64) -> u64 {
        if secs.is_nan() || secs <= 0.0 {
            return 0;
        }
        // Trim float noise so 4.0 s at 60 Hz is 240 ticks, not 241.
        let raw = secs * self.tick_rate_hz as f64;
        (raw - 1e-9).ceil().max(0.0) as u64
    }
}

// ── SceneConfig ───────────────────────────────────────────────────────────────

/// Top-level run configuration.
///
/// Typically loaded from a JSON file by the application and passed to the
/// scene builder.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SceneConfig {
    /// Frame rate of the tick loop.
    pub tick_rate_hz: u32,

    /// Total ticks to run.  At 60 Hz, 3 600 ticks is one minute.
    pub total_ticks: u64,

    /// Master RNG seed.  The same seed always produces identical runs.
    pub seed: u64,

    /// Write a trace row every N ticks.  0 disables trace snapshots.
    pub trace_interval_ticks: u64,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            tick_rate_hz:         60,
            total_ticks:          3_600,
            seed:                 42,
            trace_interval_ticks: 1,
        }
    }
}

impl SceneConfig {
    /// The tick at which the run ends (exclusive upper bound).
    #[inline]
    pub fn end_tick(&self) -> Tick {
        Tick(self.total_ticks)
    }

    /// Construct a `SimClock` for this run.
    pub fn make_clock(&self) -> SimClock {
        SimClock::new(self.tick_rate_hz)
    }

    pub fn validate(&self) -> DioResult<()> {
        if self.tick_rate_hz == 0 {
            return Err(DioError::Config("tick_rate_hz must be at least 1".into()));
        }
        Ok(())
    }
}
