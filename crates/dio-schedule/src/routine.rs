//! Scripted animation routines for characters that don't wander.
//!
//! # Loop model
//!
//! A `Routine` is an ordered list of steps played in a loop.  Entering a step
//! cross-fades to its `action`; the step then holds for its [`Hold`] before
//! the next one starts:
//!
//! ```text
//! sleepidle (5–10 s, random) → sleeping (17.7 s) → sleepidle → …
//! sitting (forever)
//! ```
//!
//! A `Forever` hold ends the loop: the character keeps that pose until it
//! is despawned.

use dio_core::{AgentRng, SimClock};

use crate::{ScheduleError, ScheduleResult};

// ── Hold ──────────────────────────────────────────────────────────────────────

/// How long a routine step lasts.
#[derive(Clone, Debug, PartialEq)]
pub enum Hold {
    /// Exactly this many seconds.
    Fixed(f64),
    /// Uniformly random in `[min, max]` seconds, redrawn every time the step
    /// is entered.
    Between { min: f64, max: f64 },
    /// Never advance.
    Forever,
}

impl Hold {
    fn validate(&self) -> ScheduleResult<()> {
        let ok = |v: f64| v.is_finite() && v >= 0.0;
        match *self {
            Hold::Fixed(secs) if !ok(secs) => Err(ScheduleError::InvalidRoutine(format!(
                "hold of {secs} s must be finite and >= 0"
            ))),
            Hold::Between { min, max } if !(ok(min) && ok(max) && min <= max) => {
                Err(ScheduleError::InvalidRoutine(format!(
                    "hold range {min}..{max} s is not a valid non-negative range"
                )))
            }
            _ => Ok(()),
        }
    }

    /// Draw a concrete duration in seconds; `None` for `Forever`.
    pub fn sample_secs(&self, rng: &mut AgentRng) -> Option<f64> {
        match *self {
            Hold::Fixed(secs) => Some(secs),
            Hold::Between { min, max } if min < max => Some(rng.gen_range(min..=max)),
            Hold::Between { min, .. } => Some(min),
            Hold::Forever => None,
        }
    }
}

// ── RoutineStep ───────────────────────────────────────────────────────────────

/// One pose in a routine.
#[derive(Clone, Debug, PartialEq)]
pub struct RoutineStep {
    /// Animation clip requested from the character's player.
    pub action:    String,
    pub hold:      Hold,
    /// Cross-fade duration when entering this step.
    pub fade_secs: f64,
}

impl RoutineStep {
    pub fn new(action: impl Into<String>, hold: Hold, fade_secs: f64) -> Self {
        Self { action: action.into(), hold, fade_secs }
    }
}

// ── Routine ───────────────────────────────────────────────────────────────────

/// A looping sequence of [`RoutineStep`]s.
#[derive(Clone, Debug, PartialEq)]
pub struct Routine {
    steps: Vec<RoutineStep>,
}

impl Routine {
    /// Build a routine.  Fails on an empty step list, a bad hold, or a
    /// negative fade.
    pub fn new(steps: Vec<RoutineStep>) -> ScheduleResult<Self> {
        if steps.is_empty() {
            return Err(ScheduleError::InvalidRoutine("routine has no steps".into()));
        }
        for step in &steps {
            step.hold.validate()?;
            if !(step.fade_secs.is_finite() && step.fade_secs >= 0.0) {
                return Err(ScheduleError::InvalidRoutine(format!(
                    "step {:?}: fade of {} s must be finite and >= 0",
                    step.action, step.fade_secs
                )));
            }
        }
        Ok(Self { steps })
    }

    /// A single pose held forever (sitting, lying, a looping idle).
    pub fn hold_forever(action: impl Into<String>, fade_secs: f64) -> ScheduleResult<Self> {
        Self::new(vec![RoutineStep::new(action, Hold::Forever, fade_secs)])
    }

    pub fn steps(&self) -> &[RoutineStep] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Always `false`; a routine has at least one step.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn step(&self, index: usize) -> Option<&RoutineStep> {
        self.steps.get(index)
    }

    /// Index of the step after `index`, wrapping to the start.
    #[inline]
    pub fn next_index(&self, index: usize) -> usize {
        (index + 1) % self.steps.len()
    }

    /// Ticks step `index` lasts, drawn fresh from its hold.
    ///
    /// `None` for a `Forever` hold or an out-of-range index.  Finite holds
    /// last at least one tick so a routine of zero-length steps still yields
    /// to the rest of the frame.
    pub fn hold_ticks(&self, index: usize, clock: &SimClock, rng: &mut AgentRng) -> Option<u64> {
        let secs = self.steps.get(index)?.hold.sample_secs(rng)?;
        Some(clock.ticks_for_secs(secs).max(1))
    }
}
