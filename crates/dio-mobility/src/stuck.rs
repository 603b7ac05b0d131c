//! Detects walks that stopped making progress.

use dio_core::{NavTuning, math::horizontal_distance};

use crate::AgentState;

/// Counts consecutive ticks in which a walking agent moved no more than
/// `epsilon`, and fires once the count exceeds `threshold`.  Only movement
/// strictly greater than `epsilon` counts as progress.
///
/// Typical cause: the target sits where obstacle repulsion cancels the goal
/// step, so the agent stalls in place.
#[derive(Clone, Debug, PartialEq)]
pub struct StuckDetector {
    pub epsilon:   f64,
    pub threshold: u32,
}

impl StuckDetector {
    pub fn new(epsilon: f64, threshold: u32) -> Self {
        Self { epsilon, threshold }
    }

    pub fn from_tuning(tuning: &NavTuning) -> Self {
        Self::new(tuning.stuck_epsilon, tuning.stuck_threshold)
    }

    /// Record this tick's movement.  Returns `true` when the agent should
    /// give up on its target; the counter is reset in that case.
    ///
    /// Call once per tick while a target is active, after integrating.
    pub fn observe(&self, state: &mut AgentState) -> bool {
        let moved = horizontal_distance(state.last_tick_position, state.position);
        state.last_tick_position = state.position;
        if moved > self.epsilon {
            state.stuck_ticks = 0;
            return false;
        }
        state.stuck_ticks += 1;
        if state.stuck_ticks > self.threshold {
            state.stuck_ticks = 0;
            return true;
        }
        false
    }
}

impl Default for StuckDetector {
    fn default() -> Self {
        Self::from_tuning(&NavTuning::default())
    }
}
